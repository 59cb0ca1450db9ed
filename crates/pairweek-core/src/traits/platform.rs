//! Collaboration-platform port
//!
//! The messaging platform is an opaque external service: it creates
//! discussion spaces, posts messages, seeds reaction markers, and delivers
//! direct notifications. Every call is best-effort from the engine's point
//! of view; failures surface as `DomainError::{PermissionDenied,
//! SpaceNotFound, Transient}` and are handled at the caller's unit-of-work
//! boundary.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::events::MarkerKind;
use crate::value_objects::Snowflake;

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait CollabPlatform: Send + Sync {
    /// Create an ephemeral discussion space in a community.
    /// Returns the space handle.
    async fn create_space(
        &self,
        community_id: Snowflake,
        title: &str,
    ) -> PlatformResult<Snowflake>;

    /// Post a message to a space. Returns the message ref.
    async fn post(&self, space_handle: Snowflake, text: &str) -> PlatformResult<Snowflake>;

    /// Seed a reaction marker on a message so participants can tap it
    async fn add_marker(
        &self,
        space_handle: Snowflake,
        message_ref: Snowflake,
        marker: MarkerKind,
    ) -> PlatformResult<()>;

    /// Send a direct notification to a user (best-effort)
    async fn notify_direct(&self, user_id: Snowflake, text: &str) -> PlatformResult<()>;
}
