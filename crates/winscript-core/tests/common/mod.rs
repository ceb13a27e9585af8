//! Common test infrastructure for winscript-core tests
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

pub mod builders;

pub use builders::*;
