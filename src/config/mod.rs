// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod api;
pub mod config;
pub mod credentials;
pub mod logging;

pub use api::*;
pub use config::*;
pub use credentials::*;
pub use logging::*;
