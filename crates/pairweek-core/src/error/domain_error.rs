//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{MatchId, Snowflake};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Pool membership not found for user {0}")]
    PoolMemberNotFound(Snowflake),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Collaboration space not found: {0}")]
    SpaceNotFound(Snowflake),

    // =========================================================================
    // Adapter Errors
    // =========================================================================
    /// The platform refused the action; abandoned for this run, no retry
    #[error("Permission denied by platform: {0}")]
    PermissionDenied(String),

    /// Network/rate-limit class failure; the next periodic run retries
    #[error("Transient platform failure: {0}")]
    Transient(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Get an error code string for logs and reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::PoolMemberNotFound(_) => "UNKNOWN_POOL_MEMBER",
            Self::MatchNotFound(_) => "UNKNOWN_MATCH",
            Self::SpaceNotFound(_) => "UNKNOWN_SPACE",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::Transient(_) => "TRANSIENT_FAILURE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error (cleanup signal, never escalated)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PoolMemberNotFound(_) | Self::MatchNotFound(_) | Self::SpaceNotFound(_)
        )
    }

    /// Check if this is a permission error
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// Check if this is a transient adapter failure
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}
