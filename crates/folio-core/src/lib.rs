//! Shared configuration and domain model for the folio portfolio service.

pub mod app_config;
pub mod config;
pub mod snapshot;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use snapshot::{
    Engagement, FileAsset, ImageAsset, PortfolioSnapshot, Profile, SiteMetadata, SkillEntry,
    SocialChannel,
};

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
