//! User interfaces
//!
//! The colorized terminal presenter is the only consumer of lookup reports
//! shipped with the binary.

#[cfg(feature = "cli")]
pub mod cli;
