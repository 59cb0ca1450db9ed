//! Match ID - opaque store-assigned match identifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier for a match record
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MatchId(i64);

impl MatchId {
    /// Create a MatchId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MatchId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<MatchId> for i64 {
    fn from(id: MatchId) -> Self {
        id.0
    }
}
