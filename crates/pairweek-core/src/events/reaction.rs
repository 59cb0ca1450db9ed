//! Typed reaction event
//!
//! The platform adapter translates raw reaction callbacks into this single
//! discriminated message and delivers it to one dispatcher; match-lookup
//! logic lives in exactly one place downstream.

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// The two reaction markers the protocol understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkerKind {
    Confirm,
    Decline,
}

impl MarkerKind {
    /// The platform emoji representing this marker
    pub const fn as_emoji(self) -> &'static str {
        match self {
            Self::Confirm => "\u{2705}", // white_check_mark
            Self::Decline => "\u{274c}", // x
        }
    }

    /// Parse a platform emoji; anything else is not a protocol marker
    pub fn from_emoji(emoji: &str) -> Option<Self> {
        match emoji {
            "\u{2705}" => Some(Self::Confirm),
            "\u{274c}" => Some(Self::Decline),
            _ => None,
        }
    }
}

/// A reaction added in a collaboration space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    /// The space the reaction was added in
    pub space_handle: Snowflake,
    /// Who reacted
    pub user_id: Snowflake,
    /// Which marker was used
    pub marker: MarkerKind,
}
