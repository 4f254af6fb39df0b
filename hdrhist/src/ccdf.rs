use crate::config::{index_to_lower_bound, TOTAL_CELLS};
use crate::Histogram;
use core::ops::Range;

/// A point on the complementary cumulative distribution function.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CcdfElement {
    pub(crate) value: u64,
    pub(crate) fraction: f64,
    pub(crate) count: u64,
}

impl CcdfElement {
    /// Returns the smallest value represented by this element.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns the ratio of samples >= `value`.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Returns the number of samples recorded for this element.
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Walks the cells of a histogram in ascending value order, producing the
/// ccdf of the recorded samples.
///
/// The sequence spans from the first non-empty cell through the last non-empty
/// cell, including any empty cells between them, and ends with one extra
/// element where the fraction reaches zero. An empty histogram produces no
/// elements.
///
/// The value of that last element is the exclusive upper bound of the last
/// non-empty cell. For the topmost cell this would be `2^64`, so it saturates
/// to `u64::MAX` instead.
#[derive(Clone)]
pub struct Ccdf<'a> {
    histogram: &'a Histogram,
    cells: Range<usize>,
    total: u64,
    cumulative: u64,
}

impl<'a> Ccdf<'a> {
    pub(crate) fn new(histogram: &'a Histogram) -> Self {
        let mut total = 0_u64;
        let mut first = None;
        let mut last = 0;

        for index in 0..TOTAL_CELLS {
            let count = histogram.get_count(index);
            if count > 0 {
                first.get_or_insert(index);
                last = index;
            }
            total = total.wrapping_add(count);
        }

        // one past the last non-empty cell is where the fraction hits zero,
        // that cell is emitted too
        let cells = match first {
            Some(first) => first..(last + 2),
            None => 0..0,
        };

        log::trace!(
            "ccdf over {total} samples spanning cells {}..{}",
            cells.start,
            cells.end
        );

        Self {
            histogram,
            cells,
            total,
            cumulative: 0,
        }
    }

    /// Returns the total number of samples in the histogram.
    pub fn samples(&self) -> u64 {
        self.total
    }
}

impl Iterator for Ccdf<'_> {
    type Item = CcdfElement;

    fn next(&mut self) -> Option<CcdfElement> {
        let index = self.cells.next()?;

        let count = self.histogram.get_count(index);
        let fraction = self.total.wrapping_sub(self.cumulative) as f64 / self.total as f64;
        self.cumulative = self.cumulative.wrapping_add(count);

        Some(CcdfElement {
            value: index_to_lower_bound(index),
            fraction,
            count,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl ExactSizeIterator for Ccdf<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::index_to_upper_bound;

    #[test]
    fn empty() {
        let histogram = Histogram::new();
        let mut ccdf = histogram.ccdf();
        assert_eq!(ccdf.samples(), 0);
        assert_eq!(ccdf.next(), None);
    }

    #[test]
    fn single_value() {
        let mut histogram = Histogram::new();
        histogram.add_value(1_000_000);

        let ccdf = histogram.ccdf().collect::<Vec<_>>();
        assert_eq!(ccdf.len(), 2);
        assert_eq!(
            ccdf.iter()
                .find(|e| e.value() >= 1_000_000)
                .map(|e| e.fraction()),
            Some(0.0)
        );
        assert_eq!(
            ccdf.iter()
                .take_while(|e| e.value() < 1_000_000)
                .last()
                .map(|e| e.fraction()),
            Some(1.0)
        );

        // exactly one transition from 1.0 to 0.0
        let transitions = ccdf
            .windows(2)
            .filter(|w| w[0].fraction() == 1.0 && w[1].fraction() == 0.0)
            .count();
        assert_eq!(transitions, 1);
    }

    #[test]
    fn contiguous_and_monotonic() {
        let mut histogram = Histogram::new();
        for value in [3, 3, 17, 400, 401, 90_000, 123_456_789] {
            histogram.add_value(value);
        }

        let ccdf = histogram.ccdf().collect::<Vec<_>>();
        assert_eq!(ccdf.first().map(|e| e.value()), Some(3));
        assert_eq!(ccdf.first().map(|e| e.count()), Some(2));

        for pair in ccdf.windows(2) {
            assert!(pair[0].value() < pair[1].value());
            assert!(pair[0].fraction() >= pair[1].fraction());
            // no cells are skipped
            assert_eq!(
                crate::config::value_to_index(pair[0].value()) + 1,
                crate::config::value_to_index(pair[1].value())
            );
        }

        let counted: u64 = ccdf.iter().map(|e| e.count()).sum();
        assert_eq!(counted, 7);
        assert_eq!(ccdf.last().map(|e| e.fraction()), Some(0.0));
    }

    #[test]
    fn fractions() {
        let mut histogram = Histogram::new();
        histogram.add_values(1, 3);
        histogram.add_value(2);

        let ccdf = histogram.ccdf();
        assert_eq!(ccdf.len(), 3);
        assert_eq!(
            ccdf.collect::<Vec<_>>(),
            vec![
                CcdfElement {
                    value: 1,
                    fraction: 1.0,
                    count: 3
                },
                CcdfElement {
                    value: 2,
                    fraction: 0.25,
                    count: 1
                },
                CcdfElement {
                    value: 3,
                    fraction: 0.0,
                    count: 0
                },
            ]
        );
    }

    #[test]
    // the sequence must end right after the last non-empty cell regardless
    // of where that cell sits within its bucket
    fn terminates_after_last_cell() {
        for index in 0..TOTAL_CELLS {
            let lower = index_to_lower_bound(index);
            let upper = index_to_upper_bound(index);

            let mut histogram = Histogram::new();
            histogram.add_value(0);
            histogram.add_value(upper);

            let ccdf = histogram.ccdf().collect::<Vec<_>>();
            let n = ccdf.len();

            let terminal = ccdf[n - 1];
            assert_eq!(terminal.fraction(), 0.0, "cell {index}");
            assert_eq!(terminal.count(), 0, "cell {index}");
            assert_eq!(terminal.value(), upper.saturating_add(1), "cell {index}");

            let last = ccdf[n - 2];
            assert_eq!(last.value(), lower, "cell {index}");
            assert_eq!(last.count(), if index == 0 { 2 } else { 1 }, "cell {index}");
            assert!(last.fraction() > 0.0, "cell {index}");

            assert_eq!(n, index + 2, "cell {index}");
        }
    }

    #[test]
    fn restart_by_reconstruction() {
        let mut histogram = Histogram::new();
        histogram.add_value(100);
        histogram.add_value(200);

        let mut ccdf = histogram.ccdf();
        while ccdf.next().is_some() {}
        assert_eq!(ccdf.next(), None);

        assert_eq!(histogram.ccdf().count(), histogram.ccdf().len());
        assert!(histogram.ccdf().next().is_some());
    }
}
