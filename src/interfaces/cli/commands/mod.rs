//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_gen;
mod demo;
mod interactive;
mod lookup;

pub use config_gen::config_generate;
pub use demo::{DEMO_IPS, run_demo};
pub use interactive::{InteractiveInput, classify_input, interactive};
pub use lookup::{LookupStatus, perform_lookup, single_lookup};
