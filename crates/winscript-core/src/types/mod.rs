//! Type definitions for catalog records and runtime configuration

mod catalog_types;
mod runtime_config;

pub use catalog_types::*;
pub use runtime_config::*;
