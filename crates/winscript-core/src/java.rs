//! Java version table
//!
//! Static table of the OpenJDK GA builds published on `download.java.net`,
//! and the installer script rendered for one of them.

use serde::Serialize;

use crate::error::Result;
use crate::templates::{JavaTemplateContext, ScriptTemplates};

/// One downloadable OpenJDK build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    /// Version string, matched exactly (e.g. "21.0.2")
    pub version: &'static str,

    /// Windows x64 ZIP archive
    pub zip_url: &'static str,

    /// SHA256 checksum file for the archive
    pub sha_url: &'static str,
}

impl VersionEntry {
    /// Name of the folder the archive extracts to
    ///
    /// A trailing ".0.0" patch suffix is dropped, matching the vendor's
    /// archive layout (`jdk-22` rather than `jdk-22.0.0`).
    pub fn jdk_folder_name(&self) -> String {
        format!("jdk-{}", self.version.strip_suffix(".0.0").unwrap_or(self.version))
    }
}

macro_rules! openjdk {
    ($version:literal, $path:literal) => {
        VersionEntry {
            version: $version,
            zip_url: concat!("https://download.java.net/java/GA/", $path),
            sha_url: concat!("https://download.java.net/java/GA/", $path, ".sha256"),
        }
    };
}

static VERSIONS: &[VersionEntry] = &[
    openjdk!(
        "22.0.2",
        "jdk22.0.2/c9ecb94cd31b495da20a27d4581645e8/9/GPL/openjdk-22.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "21.0.2",
        "jdk21.0.2/f2283984656d49d69e91c558476027ac/13/GPL/openjdk-21.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "20.0.2",
        "jdk20.0.2/6e380f22cbe7469fa75fb448bd903d8e/9/GPL/openjdk-20.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "19.0.2",
        "jdk19.0.2/fdb695a9d9064ad6b064dc6df578380c/7/GPL/openjdk-19.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "18.0.2",
        "jdk18.0.2/f6ad4b4450fd4d298113270ec84f30ee/9/GPL/openjdk-18.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "17.0.2",
        "jdk17.0.2/dfd4a8d0985749f896bed50d7138ee7f/8/GPL/openjdk-17.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "16.0.2",
        "jdk16.0.2/d4a915d82b4c4fbb9bde534da945d746/7/GPL/openjdk-16.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "15.0.2",
        "jdk15.0.2/0d1cfde4252546c6931946de8db48ee2/7/GPL/openjdk-15.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "14.0.2",
        "jdk14.0.2/205943a0976c4ed48cb16f1043c5c647/12/GPL/openjdk-14.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "13.0.2",
        "jdk13.0.2/d4173c853231432d94f001e99d882ca7/8/GPL/openjdk-13.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "12.0.2",
        "jdk12.0.2/e482c34c86bd4bf8b56c0b35558996b9/10/GPL/openjdk-12.0.2_windows-x64_bin.zip"
    ),
    openjdk!(
        "11.0.2",
        "jdk11/9/GPL/openjdk-11.0.2_windows-x64_bin.zip"
    ),
];

/// All supported versions, newest first
pub fn versions() -> &'static [VersionEntry] {
    VERSIONS
}

/// Look up a version by exact string equality
pub fn resolve(version: &str) -> Option<&'static VersionEntry> {
    VERSIONS.iter().find(|entry| entry.version == version)
}

/// Comment emitted in place of an installer for an unknown version
pub fn missing_version_comment(version: &str) -> String {
    format!("# Error: Java version {} not found", version)
}

/// Render the installer script for `version`
///
/// An unknown version yields an error comment rather than an error, so
/// whole-script assembly can carry on and surface the problem inline.
pub fn render(version: &str) -> Result<String> {
    render_with(&ScriptTemplates::new()?, version)
}

/// Render with an existing template registry
pub fn render_with(templates: &ScriptTemplates, version: &str) -> Result<String> {
    match resolve(version) {
        Some(entry) => templates.render_java(&JavaTemplateContext::from_entry(entry)),
        None => {
            tracing::warn!("Java version {} is not in the version table", version);
            Ok(missing_version_comment(version))
        }
    }
}
