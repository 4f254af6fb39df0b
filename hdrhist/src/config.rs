//! The fixed bucketing layout shared by the histogram and its query views.
//!
//! Values below `2^(PRECISION_BITS + 1)` are stored exactly. Above that, each
//! power of two range gets its own bucket which is split into `LOW_BITS`
//! linear sub-buckets, giving `PRECISION_BITS + 1` significant bits of
//! precision across the whole `u64` range.

/// The number of bits kept beyond the implicit leading bit.
pub const PRECISION_BITS: u32 = 4;

/// The number of exponential buckets.
pub const BUCKETS: usize = 64 - PRECISION_BITS as usize + 1;

/// The number of linear sub-buckets within each bucket.
pub const LOW_BITS: usize = 1 << PRECISION_BITS;

/// The total number of counters in a histogram.
pub const TOTAL_CELLS: usize = BUCKETS * LOW_BITS;

const LOW_MASK: u64 = LOW_BITS as u64 - 1;

/// Returns the `(bucket, sub_bucket)` pair for a value.
///
/// `leading_zeros` is defined for zero, which falls through to cell `(0, 0)`
/// without a dedicated branch.
#[inline]
pub const fn value_to_cell(value: u64) -> (usize, usize) {
    let msb = u64::BITS - value.leading_zeros();
    let bucket = msb.saturating_sub(PRECISION_BITS);
    let shift = bucket.saturating_sub(1);
    let low = (value >> shift) & LOW_MASK;
    (bucket as usize, low as usize)
}

/// Returns the row-major index of the counter for a value.
#[inline]
pub const fn value_to_index(value: u64) -> usize {
    let (bucket, low) = value_to_cell(value);
    bucket * LOW_BITS + low
}

/// Returns the smallest value that lands in the cell at `index`.
///
/// The index one past the last cell has no representable lower bound (it
/// would be `2^64`), so it saturates to `u64::MAX`.
pub const fn index_to_lower_bound(index: usize) -> u64 {
    if index >= TOTAL_CELLS {
        return u64::MAX;
    }

    let bucket = (index / LOW_BITS) as u32;
    let low = (index % LOW_BITS) as u64;

    if bucket == 0 {
        low
    } else {
        (1 << (bucket + PRECISION_BITS - 1)) + (low << (bucket - 1))
    }
}

/// Returns the largest value that lands in the cell at `index`.
pub const fn index_to_upper_bound(index: usize) -> u64 {
    if index >= TOTAL_CELLS {
        return u64::MAX;
    }

    let bucket = (index / LOW_BITS) as u32;
    let width_minus_one = if bucket == 0 {
        0
    } else {
        (1 << (bucket - 1)) - 1
    };

    index_to_lower_bound(index) + width_minus_one
}
