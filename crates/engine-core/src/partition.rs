use crate::error::PartitionError;
use model::core::range::{KeyRange, TOKEN_MAX, TOKEN_MIN};
use tracing::debug;

/// Splits the signed 64-bit token space into `splits` contiguous sub-ranges
/// and returns the `splits + 1` boundaries.
///
/// The span is computed in floating point, since `TOKEN_MAX - TOKEN_MIN`
/// does not fit an `i64`. Sub-range sizes may therefore differ by a few
/// tokens; the last boundary is always exactly [`TOKEN_MAX`].
pub fn split_range(splits: usize) -> Result<Vec<i64>, PartitionError> {
    if splits == 0 {
        return Err(PartitionError::InvalidSplitCount(splits));
    }

    debug!(splits, "Splitting {TOKEN_MIN}..={TOKEN_MAX}");

    let min = TOKEN_MIN as f64;
    let max = TOKEN_MAX as f64;
    let span = (max - min) / splits as f64;

    let mut boundaries = Vec::with_capacity(splits + 1);
    boundaries.push(TOKEN_MIN);
    for i in 1..splits {
        let next = min + i as f64 * span;
        if next >= max {
            break;
        }
        // `as` saturates, so rounding can never leave the i64 domain.
        boundaries.push(next as i64);
    }
    boundaries.push(TOKEN_MAX);

    Ok(boundaries)
}

/// Same partitioning as [`split_range`], paired up into ranges.
pub fn key_ranges(splits: usize) -> Result<Vec<KeyRange>, PartitionError> {
    let boundaries = split_range(splits)?;
    Ok(boundaries
        .windows(2)
        .map(|pair| KeyRange {
            min: pair[0],
            max: pair[1],
        })
        .collect())
}
