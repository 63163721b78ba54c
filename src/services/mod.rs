//! Service layer
//!
//! Lookup logic shared by the CLI presenter and library users.

pub mod geoip;

pub use geoip::{LookupReport, LookupService};
