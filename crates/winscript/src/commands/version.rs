//! Version command

use anyhow::Result;
use serde::Serialize;
use winscript_core::{java, templates};

use crate::cli::VersionArgs;
use crate::output;

/// Build metadata plus what this binary can generate
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: String,
    pub commit: Option<String>,
    /// Built from a tree with uncommitted changes
    pub dirty: bool,
    pub build_date: Option<String>,
    pub target: Option<String>,
    pub profile: Option<String>,
    /// Java builds the installer can emit, newest first
    pub java_versions: Vec<&'static str>,
    pub templates: Vec<&'static str>,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("WINSCRIPT_GIT_SHA").map(String::from),
            dirty: option_env!("WINSCRIPT_GIT_DIRTY").is_some(),
            build_date: option_env!("WINSCRIPT_BUILD_DATE").map(String::from),
            target: option_env!("WINSCRIPT_TARGET").map(String::from),
            profile: option_env!("WINSCRIPT_PROFILE").map(String::from),
            java_versions: java::versions().iter().map(|entry| entry.version).collect(),
            templates: templates::template_names().to_vec(),
        }
    }

    /// Range of Java versions, e.g. "22.0.2 .. 11.0.2 (12 builds)"
    fn java_range(&self) -> String {
        match (self.java_versions.first(), self.java_versions.last()) {
            (Some(newest), Some(oldest)) => format!(
                "{} .. {} ({} builds)",
                newest,
                oldest,
                self.java_versions.len()
            ),
            _ => "none".to_string(),
        }
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "winscript {}", self.version)?;
        if let Some(commit) = &self.commit {
            let marker = if self.dirty { "-dirty" } else { "" };
            write!(f, " ({commit}{marker})")?;
        }
        if let Some(target) = &self.target {
            write!(f, " {target}")?;
        }
        Ok(())
    }
}

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{info}");
    if let Some(date) = &info.build_date {
        output::kv("Build date", date);
    }
    if let Some(profile) = &info.profile {
        output::kv("Profile", profile);
    }
    output::kv("Java builds", &info.java_range());
    output::kv("Templates", &info.templates.join(", "));

    Ok(())
}
