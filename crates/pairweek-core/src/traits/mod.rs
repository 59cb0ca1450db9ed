//! Ports - interfaces the domain requires from infrastructure

mod platform;
mod repositories;

pub use platform::{CollabPlatform, PlatformResult};
pub use repositories::{MatchRepository, PoolRepository, RepoResult};
