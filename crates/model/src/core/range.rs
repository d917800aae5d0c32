use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest value of the signed 64-bit partition key space.
pub const TOKEN_MIN: i64 = i64::MIN;
/// Highest value of the signed 64-bit partition key space.
pub const TOKEN_MAX: i64 = i64::MAX;

/// A contiguous slice of the partition key space.
///
/// Neighbouring ranges produced by the partitioner share their boundary:
/// `ranges[i].max == ranges[i + 1].min`. A range owns its upper bound, and
/// only the very first range (starting at [`TOKEN_MIN`]) also owns its lower
/// bound. See [`KeyRange::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRange {
    pub min: i64,
    pub max: i64,
}

impl KeyRange {
    pub fn new(min: i64, max: i64) -> Result<Self, ModelError> {
        if min > max {
            return Err(ModelError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The whole key space as one range.
    pub fn full() -> Self {
        Self {
            min: TOKEN_MIN,
            max: TOKEN_MAX,
        }
    }

    /// Whether `token` belongs to this range under the shared-boundary rule.
    pub fn contains(&self, token: i64) -> bool {
        if self.min == TOKEN_MIN && token == TOKEN_MIN {
            return true;
        }
        token > self.min && token <= self.max
    }

    /// Number of tokens spanned, saturating at `u64::MAX`.
    pub fn width(&self) -> u64 {
        let width = self.max as i128 - self.min as i128;
        width.clamp(0, u64::MAX as i128) as u64
    }
}

impl fmt::Display for KeyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}
