//! Common test infrastructure for winscript-catalog tests
//!
//! - `mock_store`: wiremock helpers serving the four catalog tables
//! - `fixtures`: table rows shared across tests

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_store;

pub use fixtures::*;
pub use mock_store::*;
