use crate::config::{value_to_cell, BUCKETS, LOW_BITS, TOTAL_CELLS};
use crate::{Bound, Ccdf, CcdfBound, Error, Iter, Quantile, Quantiles};

/// The quantiles reported by [`Histogram::summary`].
pub const SUMMARY_QUANTILES: [f32; 7] = [0.25, 0.50, 0.75, 0.95, 0.99, 0.999, 1.0];

/// A small footprint histogram that collects `u64` samples with 5 bits of
/// precision across the entire `u64` range.
///
/// The counters live inline, so recording a sample is a handful of
/// instructions and never allocates.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    counts: [[u64; LOW_BITS]; BUCKETS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Construct an empty histogram.
    pub const fn new() -> Self {
        Self {
            counts: [[0; LOW_BITS]; BUCKETS],
        }
    }

    /// Add a sample to the histogram.
    ///
    /// This is guaranteed to be constant time and never allocates.
    #[inline]
    pub fn add_value(&mut self, value: u64) {
        self.add_values(value, 1)
    }

    /// Add `count` samples of the same value to the histogram.
    #[inline]
    pub fn add_values(&mut self, value: u64, count: u64) {
        let (bucket, low) = value_to_cell(value);
        self.counts[bucket][low] = self.counts[bucket][low].wrapping_add(count);
    }

    /// Combine this histogram with another by summing the per-cell counts.
    ///
    /// The result is not normalized. Only combine histograms which have
    /// captured a comparable number of samples, otherwise the larger one will
    /// dominate the derived distribution.
    pub fn combine(&mut self, other: &Histogram) {
        for (ours, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            for (a, b) in ours.iter_mut().zip(theirs.iter()) {
                *a = a.wrapping_add(*b);
            }
        }
    }

    /// Returns the total number of samples recorded.
    pub fn total_count(&self) -> u64 {
        self.counts
            .iter()
            .flatten()
            .fold(0, |total, count| total.wrapping_add(*count))
    }

    /// Returns the raw counters, indexed by `[bucket][sub_bucket]`.
    pub fn counts(&self) -> &[[u64; LOW_BITS]; BUCKETS] {
        &self.counts
    }

    /// Returns an iterator across every bucket of the histogram.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Output the complementary cumulative distribution function (ccdf) of
    /// the samples.
    ///
    /// Returns an iterator over increasing sample values such that, for every
    /// element, `fraction` is the ratio of samples >= `value` and `count` is
    /// the number of samples >= the current `value` and < the next `value`.
    pub fn ccdf(&self) -> Ccdf<'_> {
        Ccdf::new(self)
    }

    /// Outputs an upper bound of the ccdf of the samples.
    ///
    /// These points can be plotted with linear interpolation and will never
    /// report intermediate sample values that underestimate quantiles. All the
    /// actual quantile values are below the reported curve.
    pub fn ccdf_upper_bound(&self) -> CcdfBound<'_> {
        CcdfBound::new(self.ccdf(), Bound::Upper)
    }

    /// Outputs a lower bound of the ccdf of the samples.
    ///
    /// These points can be plotted with linear interpolation and will never
    /// report intermediate sample values that overestimate quantiles. All the
    /// actual quantile values are above the reported curve.
    pub fn ccdf_lower_bound(&self) -> CcdfBound<'_> {
        CcdfBound::new(self.ccdf(), Bound::Lower)
    }

    /// Output estimated quantiles as `(quantile, lower_bound, upper_bound)`.
    ///
    /// Each quantile's value is somewhere >= `lower_bound` and < `upper_bound`.
    /// The requested quantiles are reported in ascending order.
    pub fn quantiles<I: IntoIterator<Item = f32>>(&self, quantiles: I) -> Quantiles<'_> {
        Quantiles::new(self.ccdf(), quantiles.into_iter().collect())
    }

    /// Output a summary of estimated quantiles, see [`SUMMARY_QUANTILES`].
    pub fn summary(&self) -> Quantiles<'_> {
        self.quantiles(SUMMARY_QUANTILES)
    }

    /// Estimate a single quantile in the range `0.0..=1.0`.
    pub fn quantile(&self, quantile: f32) -> Result<Quantile, Error> {
        if !(0.0..=1.0).contains(&quantile) {
            return Err(Error::InvalidQuantile(quantile));
        }

        let mut quantiles = self.quantiles([quantile]);

        if quantiles.samples() == 0 {
            return Err(Error::Empty);
        }

        quantiles.next().ok_or(Error::Empty)
    }

    /// Output a text summary of estimated quantiles.
    pub fn summary_string(&self) -> String {
        let mut values_lower: Vec<String> = vec!["╭ ".to_string()];
        let mut values_upper: Vec<String> = vec!["| ".to_string()];
        let mut points: Vec<String> = vec!["╰ ".to_string()];

        for quantile in self.summary() {
            let p = quantile.quantile();

            if p == 0.25 {
                points.push("[".to_string());
            } else if p == 0.95 {
                points.push("]".to_string());
            } else if p < 0.95 {
                points.push(" ".to_string());
            } else {
                points.push("-".to_string());
            }

            values_lower.push(" ".to_string());
            values_upper.push(" ".to_string());

            if p < 0.95 {
                points.push(format!("    {:<5}    ", p));
            } else if p != 1.0 {
                points.push(format!("--- {:<5} ---", p));
            } else {
                points.push("---| max     ".to_string());
            }

            values_lower.push(format!(" {:^11.6e} ", quantile.lower_bound() as f64));
            values_upper.push(format!(" {:^11.6e} ", quantile.upper_bound() as f64));
        }

        let mut res = values_lower;
        res.push("╮\n".to_string());
        res.extend(values_upper);
        res.push("|\n".to_string());
        res.extend(points);
        res.push("╯".to_string());
        res.join("")
    }

    pub(crate) fn get_count(&self, index: usize) -> u64 {
        self.counts
            .get(index / LOW_BITS)
            .map(|row| row[index % LOW_BITS])
            .unwrap_or(0)
    }
}

impl TryFrom<&[u64]> for Histogram {
    type Error = Error;

    /// Rebuild a histogram from its counters flattened in `[bucket][sub_bucket]`
    /// order.
    fn try_from(counts: &[u64]) -> Result<Self, Error> {
        if counts.len() != TOTAL_CELLS {
            return Err(Error::InvalidLength {
                expected: TOTAL_CELLS,
                actual: counts.len(),
            });
        }

        let mut histogram = Histogram::new();
        for (row, chunk) in histogram
            .counts
            .iter_mut()
            .zip(counts.chunks_exact(LOW_BITS))
        {
            row.copy_from_slice(chunk);
        }

        Ok(histogram)
    }
}

impl TryFrom<Vec<u64>> for Histogram {
    type Error = Error;

    fn try_from(counts: Vec<u64>) -> Result<Self, Error> {
        Self::try_from(counts.as_slice())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Histogram {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.counts.iter().flatten())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Histogram {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let counts = <Vec<u64> as serde::Deserialize>::deserialize(deserializer)?;

        Histogram::try_from(counts).map_err(|e| {
            log::debug!("rejecting serialized histogram: {e}");
            <D::Error as serde::de::Error>::custom(e)
        })
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Histogram {
    fn schema_name() -> String {
        "Histogram".to_owned()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <Vec<u64> as schemars::JsonSchema>::json_schema(gen)
    }
}
