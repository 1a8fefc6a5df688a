//! Domain layer for Campaign Crew
//!
//! This module contains the crew's roles, the conversation model, run
//! outcomes and the port traits for external providers.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ProviderError, ProviderResult};
