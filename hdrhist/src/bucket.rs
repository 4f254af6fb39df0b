//! Buckets describe a single counter of the histogram: the range of values it
//! covers and the number of samples recorded within that range.

use crate::config::{index_to_lower_bound, index_to_upper_bound, TOTAL_CELLS};
use crate::Histogram;

/// A quantized range of values and the count of samples that fall into it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bucket {
    pub(crate) count: u64,
    pub(crate) lower: u64,
    pub(crate) upper: u64,
}

impl Bucket {
    /// Returns the number of samples within the bucket's range.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the range for the bucket.
    pub fn range(&self) -> std::ops::RangeInclusive<u64> {
        std::ops::RangeInclusive::new(self.lower, self.upper)
    }

    /// Returns the inclusive lower bound for the bucket.
    pub fn lower(&self) -> u64 {
        self.lower
    }

    /// Returns the inclusive upper bound for the bucket.
    pub fn upper(&self) -> u64 {
        self.upper
    }
}

/// An iterator over every bucket of a histogram, in ascending value order.
pub struct Iter<'a> {
    histogram: &'a Histogram,
    index: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(histogram: &'a Histogram) -> Self {
        Self {
            histogram,
            index: 0,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = Bucket;

    fn next(&mut self) -> Option<Bucket> {
        if self.index >= TOTAL_CELLS {
            return None;
        }

        let bucket = Bucket {
            count: self.histogram.get_count(self.index),
            lower: index_to_lower_bound(self.index),
            upper: index_to_upper_bound(self.index),
        };

        self.index += 1;

        Some(bucket)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = TOTAL_CELLS.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Histogram {
    type Item = Bucket;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_cell() {
        let histogram = Histogram::new();
        assert_eq!(histogram.iter().len(), TOTAL_CELLS);

        let first = histogram.iter().next().unwrap();
        assert_eq!(first.range(), 0..=0);

        let last = histogram.iter().last().unwrap();
        assert_eq!(last.upper(), u64::MAX);
    }

    #[test]
    fn counts() {
        let mut histogram = Histogram::new();
        histogram.add_value(1024);
        histogram.add_value(1030);
        histogram.add_value(7);

        let nonzero: Vec<Bucket> = histogram.iter().filter(|b| b.count() > 0).collect();
        assert_eq!(
            nonzero,
            vec![
                Bucket {
                    count: 1,
                    lower: 7,
                    upper: 7
                },
                Bucket {
                    count: 2,
                    lower: 1024,
                    upper: 1087
                },
            ]
        );

        let total: u64 = (&histogram).into_iter().map(|b| b.count()).sum();
        assert_eq!(total, 3);
    }
}
