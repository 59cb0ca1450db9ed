//! Reaction events delivered by the platform adapter

mod reaction;

pub use reaction::{MarkerKind, ReactionEvent};
