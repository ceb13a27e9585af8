//! # winscript-catalog
//!
//! Loads the catalog of applications, optimizations and tweaks, either from
//! the hosted store (four full-table reads over HTTP) or from a local JSON or
//! YAML file, and publishes the load progress as a [`LoadState`].

pub mod join;
pub mod local;
pub mod remote;
pub mod state;

pub use join::{join, JoinReport, RawTables};
pub use local::load_local;
pub use remote::RemoteCatalogLoader;
pub use state::{CatalogHandle, LoadState};
