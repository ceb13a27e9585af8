//! # winscript-core
//!
//! Core library for winscript providing:
//! - Catalog record types (applications, options, optimizations, tweaks)
//! - Selection state with toggle semantics
//! - URL state tokens and the address-bar sync protocol
//! - The Java version table and its installer template
//! - PowerShell script assembly
//! - Hierarchical runtime configuration

pub mod config;
pub mod error;
pub mod java;
pub mod script;
pub mod selection;
pub mod templates;
pub mod types;
pub mod url_state;
pub mod utils;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use script::{GenerateScriptRequest, GenerateScriptResponse, ScriptAssembler};
pub use selection::{AppKey, SelectionState};
pub use types::{Application, ApplicationOption, Catalog, Optimization, RuntimeConfig, Tweak};
pub use url_state::{UrlState, UrlStateSync};
