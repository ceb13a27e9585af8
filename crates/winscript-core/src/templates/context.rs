//! Template contexts for script rendering

use serde::Serialize;

use crate::java::VersionEntry;

/// Context for the Java installer template
#[derive(Debug, Clone, Serialize)]
pub struct JavaTemplateContext {
    pub version: String,
    pub zip_url: String,
    pub sha_url: String,
    /// Folder the archive extracts to, e.g. `jdk-21.0.2`
    pub jdk_folder: String,
}

impl JavaTemplateContext {
    pub fn from_entry(entry: &VersionEntry) -> Self {
        Self {
            version: entry.version.to_string(),
            zip_url: entry.zip_url.to_string(),
            sha_url: entry.sha_url.to_string(),
            jdk_folder: entry.jdk_folder_name(),
        }
    }
}

/// One application block of the installation script
#[derive(Debug, Clone, Serialize)]
pub struct AppBlock {
    /// Comment line naming the install
    pub heading: String,
    pub name: String,
    pub download_url: String,
    pub install_args: String,
    /// Pre-rendered Java section; replaces the generic installer block
    pub java_script: Option<String>,
}

/// One optimization block
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationBlock {
    pub name: String,
    pub script: String,
}

/// One tweak block
#[derive(Debug, Clone, Serialize)]
pub struct TweakBlock {
    pub name: String,
    /// Description lines already prefixed with `# `
    pub description_comment: String,
    /// Command with backticks doubled
    pub command: String,
}

/// Context for the installation script template
#[derive(Debug, Clone, Serialize)]
pub struct InstallScriptContext {
    pub total_steps: usize,
    pub apps: Vec<AppBlock>,
    pub optimizations: Vec<OptimizationBlock>,
    pub tweaks: Vec<TweakBlock>,
}
