//! Error handling utilities for repositories

use pairweek_core::{DomainError, MatchId, Snowflake};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Create a "pool member not found" error
pub fn pool_member_not_found(id: Snowflake) -> DomainError {
    DomainError::PoolMemberNotFound(id)
}

/// Create a "match not found" error
pub fn match_not_found(id: MatchId) -> DomainError {
    DomainError::MatchNotFound(id)
}
