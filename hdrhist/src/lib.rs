//! `hdrhist` is a small footprint [hdr histogram](https://hdrhistogram.github.io/HdrHistogram/).
//!
//! It collects `u64` samples across the full `u64` range with a precision of
//! 5 most significant bits. Adding a sample takes constant time (a handful of
//! cycles) and the histogram never allocates or reallocates.
//!
//! Small values are counted exactly in a linear region. Larger values are
//! grouped into one bucket per power of two, each split into linear
//! sub-buckets. See the [`config`] module for the exact layout.
//!
//! The recorded distribution can be read back as:
//!
//! * [`Histogram::ccdf`] - the complementary cumulative distribution function
//! * [`Histogram::ccdf_upper_bound`] / [`Histogram::ccdf_lower_bound`] -
//!   conservative envelopes of the ccdf for plotting
//! * [`Histogram::quantiles`] / [`Histogram::summary`] - quantile estimates
//!   reported as bounding ranges
//!
//! ```
//! use hdrhist::Histogram;
//!
//! let mut histogram = Histogram::new();
//! for latency in [120, 130, 145, 2_000] {
//!     histogram.add_value(latency);
//! }
//!
//! for q in histogram.summary() {
//!     println!("{}: {:?}", q.quantile(), q.range());
//! }
//! ```
//!
//! Query views borrow the histogram, so it cannot be modified while they are
//! alive. The histogram itself has no internal synchronization, wrap it in a
//! lock if it needs to be shared between threads.

pub mod config;

mod bound;
mod bucket;
mod ccdf;
mod errors;
mod quantiles;
mod standard;

pub use bound::{Bound, CcdfBound};
pub use bucket::{Bucket, Iter};
pub use ccdf::{Ccdf, CcdfElement};
pub use errors::Error;
pub use quantiles::{Quantile, Quantiles};
pub use standard::{Histogram, SUMMARY_QUANTILES};
