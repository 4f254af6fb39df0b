use crate::{Ccdf, CcdfElement};

/// Selects which envelope of the ccdf a [`CcdfBound`] produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Hold each fraction until the next value.
    Upper,
    /// Report each fraction from the previous value.
    Lower,
}

/// A conservative envelope of the ccdf, suitable for plotting with linear
/// interpolation without crossing the true step function.
///
/// Each element pairs one ccdf element with its successor, so the sequence is
/// one shorter than the underlying ccdf.
#[derive(Clone)]
pub struct CcdfBound<'a> {
    ccdf: Ccdf<'a>,
    bound: Bound,
    current: Option<CcdfElement>,
}

impl<'a> CcdfBound<'a> {
    pub(crate) fn new(mut ccdf: Ccdf<'a>, bound: Bound) -> Self {
        let current = ccdf.next();

        Self {
            ccdf,
            bound,
            current,
        }
    }

    /// Returns the total number of samples in the histogram.
    pub fn samples(&self) -> u64 {
        self.ccdf.samples()
    }
}

impl Iterator for CcdfBound<'_> {
    type Item = CcdfElement;

    fn next(&mut self) -> Option<CcdfElement> {
        let prev = self.current?;
        self.current = self.ccdf.next();
        let next = self.current?;

        Some(match self.bound {
            Bound::Upper => CcdfElement {
                value: next.value,
                fraction: prev.fraction,
                count: prev.count,
            },
            Bound::Lower => CcdfElement {
                value: prev.value,
                fraction: next.fraction,
                count: next.count,
            },
        })
    }
}
