use thiserror::Error;

/// Errors returned by the checked histogram operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("histogram contains no samples")]
    Empty,
    #[error("quantile {0} is outside of the range 0.0..=1.0")]
    InvalidQuantile(f32),
    #[error("expected {expected} counters but got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
