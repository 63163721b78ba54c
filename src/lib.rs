//! NWO Lookup - IP intelligence lookup tool
//!
//! Queries several public IP-geolocation APIs concurrently, tolerates any
//! subset of them failing, and merges their heterogeneous answers into one
//! canonical record using a fixed provider precedence.
//!
//! # Features
//! - **cli**: Colorized terminal presenter, interactive and demo modes (default)
//!
//! # Architecture
//! - `services::geoip`: provider client, aggregator, lookup orchestration
//! - `config`: static configuration (TOML + environment)
//! - `interfaces`: terminal presenter
//! - `system`: logging and signal handling
//! - `utils`: IP literal validation helpers
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use nwo_lookup::config::StaticConfig;
//! use nwo_lookup::services::LookupService;
//! use nwo_lookup::services::geoip::TracingProgress;
//!
//! # async fn run() -> nwo_lookup::errors::Result<()> {
//! let service = LookupService::from_config(&StaticConfig::default())?;
//! let report = service.lookup("8.8.8.8", Arc::new(TracingProgress)).await?;
//! println!("{:?}", report.record().city);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod services;
pub mod system;
pub mod utils;
