use crate::Ccdf;

/// An estimated quantile. The true value at `quantile` lies within
/// `lower_bound..upper_bound`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quantile {
    pub(crate) quantile: f32,
    pub(crate) lower_bound: u64,
    pub(crate) upper_bound: u64,
}

impl Quantile {
    /// Returns the requested quantile.
    pub fn quantile(&self) -> f32 {
        self.quantile
    }

    /// Returns the inclusive lower bound of the quantile's value.
    pub fn lower_bound(&self) -> u64 {
        self.lower_bound
    }

    /// Returns the exclusive upper bound of the quantile's value.
    ///
    /// When the quantile falls in the topmost cell the bound saturates to
    /// `u64::MAX`, so a sample of exactly `u64::MAX` lies outside of
    /// [`Quantile::range`].
    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// Returns the range which contains the quantile's value.
    pub fn range(&self) -> core::ops::Range<u64> {
        self.lower_bound..self.upper_bound
    }
}

impl From<Quantile> for (f32, u64, u64) {
    fn from(q: Quantile) -> Self {
        (q.quantile, q.lower_bound, q.upper_bound)
    }
}

/// Estimates a list of quantiles in a single forward pass over the ccdf.
#[derive(Clone)]
pub struct Quantiles<'a> {
    ccdf: Ccdf<'a>,
    quantiles: Vec<f32>,
    next_quantile: usize,
    prev_value: u64,
    current_value: u64,
    current_fraction: f64,
}

impl<'a> Quantiles<'a> {
    pub(crate) fn new(ccdf: Ccdf<'a>, mut quantiles: Vec<f32>) -> Self {
        // sort the requested quantiles so we can find them in a single pass
        if !quantiles.windows(2).all(|w| w[0] <= w[1]) {
            log::debug!("sorting {} unordered quantiles", quantiles.len());
            quantiles.sort_by(f32::total_cmp);
        }

        Self {
            ccdf,
            quantiles,
            next_quantile: 0,
            prev_value: 0,
            current_value: 0,
            current_fraction: 1.0,
        }
    }

    /// Returns the total number of samples in the histogram.
    pub fn samples(&self) -> u64 {
        self.ccdf.samples()
    }
}

impl Iterator for Quantiles<'_> {
    type Item = Quantile;

    fn next(&mut self) -> Option<Quantile> {
        let quantile = *self.quantiles.get(self.next_quantile)?;
        let target = 1.0 - quantile as f64;

        // walk the ccdf until the survival fraction reaches the target. the
        // first cell always has a fraction of 1.0 and must be passed so the
        // 0.0 quantile reports the minimum's cell. if we run out, the last
        // pair of values seen is reported
        while self.current_fraction > target || self.current_fraction >= 1.0 {
            let Some(element) = self.ccdf.next() else {
                break;
            };
            self.prev_value = self.current_value;
            self.current_value = element.value;
            self.current_fraction = element.fraction;
        }

        self.next_quantile += 1;

        Some(Quantile {
            quantile,
            lower_bound: self.prev_value,
            upper_bound: self.current_value,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.quantiles.len() - self.next_quantile;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Quantiles<'_> {}
