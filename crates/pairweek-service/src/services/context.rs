//! Service context - dependency container for services
//!
//! Holds the repositories, the collaboration platform adapter and the
//! matching policy needed by services.

use std::sync::Arc;

use pairweek_common::MatchingConfig;
use pairweek_core::{CollabPlatform, MatchRepository, PoolRepository};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - The opt-in pool store
/// - The match store
/// - The collaboration platform adapter
/// - The matching policy knobs (reminder cap, sit-out window, ...)
#[derive(Clone)]
pub struct ServiceContext {
    pool_repo: Arc<dyn PoolRepository>,
    match_repo: Arc<dyn MatchRepository>,
    platform: Arc<dyn CollabPlatform>,
    matching: MatchingConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool_repo: Arc<dyn PoolRepository>,
        match_repo: Arc<dyn MatchRepository>,
        platform: Arc<dyn CollabPlatform>,
        matching: MatchingConfig,
    ) -> Self {
        Self {
            pool_repo,
            match_repo,
            platform,
            matching,
        }
    }

    /// Get the pool repository
    pub fn pool_repo(&self) -> &dyn PoolRepository {
        self.pool_repo.as_ref()
    }

    /// Get the match repository
    pub fn match_repo(&self) -> &dyn MatchRepository {
        self.match_repo.as_ref()
    }

    /// Get the collaboration platform adapter
    pub fn platform(&self) -> &dyn CollabPlatform {
        self.platform.as_ref()
    }

    /// Get the matching policy
    pub fn matching(&self) -> &MatchingConfig {
        &self.matching
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool_repo", &"...")
            .field("match_repo", &"...")
            .field("platform", &"...")
            .field("matching", &self.matching)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool_repo: Option<Arc<dyn PoolRepository>>,
    match_repo: Option<Arc<dyn MatchRepository>>,
    platform: Option<Arc<dyn CollabPlatform>>,
    matching: MatchingConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool_repo: None,
            match_repo: None,
            platform: None,
            matching: MatchingConfig::default(),
        }
    }

    pub fn pool_repo(mut self, repo: Arc<dyn PoolRepository>) -> Self {
        self.pool_repo = Some(repo);
        self
    }

    pub fn match_repo(mut self, repo: Arc<dyn MatchRepository>) -> Self {
        self.match_repo = Some(repo);
        self
    }

    pub fn platform(mut self, platform: Arc<dyn CollabPlatform>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn matching(mut self, matching: MatchingConfig) -> Self {
        self.matching = matching;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool_repo
                .ok_or_else(|| super::error::ServiceError::validation("pool_repo is required"))?,
            self.match_repo
                .ok_or_else(|| super::error::ServiceError::validation("match_repo is required"))?,
            self.platform
                .ok_or_else(|| super::error::ServiceError::validation("platform is required"))?,
            self.matching,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
