//! Configuration module
//!
//! Describes where the service under test lives and which paths it serves.

mod file;

pub use file::{Endpoint, ServiceConfig};
