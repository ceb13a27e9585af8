//! Runtime configuration loading

mod hierarchical_loader;

pub use hierarchical_loader::{HierarchicalConfigLoader, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
