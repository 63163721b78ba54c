use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to in-memory defaults when `init_config()` was never called,
/// so library users can run lookups without touching the filesystem.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads configuration from `path` (or `nwo-lookup.toml` in the current
/// directory when `None`) plus `NWO__*` environment overrides. Calling it
/// again replaces the stored configuration.
///
/// # Examples
/// ```no_run
/// use nwo_lookup::config::init_config;
/// init_config(None).unwrap();
/// ```
pub fn init_config(path: Option<&str>) -> Result<Arc<StaticConfig>> {
    let loaded = Arc::new(StaticConfig::load(path)?);
    CONFIG
        .get_or_init(|| ArcSwap::new(Arc::clone(&loaded)))
        .store(Arc::clone(&loaded));
    Ok(loaded)
}
