//! Layered settings for the crew.
//!
//! Defaults, then `.campaign-crew/config.yaml` and `local.yaml`, then an
//! optional `--config` file, then `CAMPAIGN_CREW_*` environment variables.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, CONFIG_DIR, ENV_PREFIX};
