//! Typed wrappers over the Zero Waste REST resources.
//!
//! Every call goes through `AuthClient`, so all of them share bearer
//! injection and the single-flight token refresh.

pub mod admin;
pub mod challenges;
pub mod endpoints;
pub mod events;
pub mod goals;
pub mod profile;
pub mod waste;
