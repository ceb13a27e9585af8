//! Catalog record types
//!
//! These mirror the rows of the four hosted tables. Field names follow the
//! store's snake_case columns; unknown columns (timestamps and the like) are
//! ignored on deserialization.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Display name that triggers the Java installer template
pub const JAVA_APP_NAME: &str = "Java";

/// Catalog id of the Java application
pub const JAVA_APP_ID: &str = "java";

/// An installable Windows application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Opaque identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Category used for grouping
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,

    /// Short description
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,

    /// Icon reference
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: String,

    /// Installer download URL (overridden by the selected option)
    pub download_url: String,

    /// Silent-install arguments (overridden by the selected option)
    #[serde(default, deserialize_with = "nullable")]
    pub install_args: String,

    /// Mutually exclusive install variants
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationOption>,

    /// Selected version, only meaningful for the Java application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// An install variant of an application (e.g. a Java major release)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationOption {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub application_id: String,
    pub download_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub install_args: String,
}

/// A free-form PowerShell optimization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Optimization {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,

    /// Raw PowerShell body, emitted verbatim
    pub script: String,
}

/// A named single PowerShell command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweak {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub long_description: String,

    /// Command string, possibly multi-statement
    pub command: String,
}

/// Treat a `null` column like a missing one
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn semver_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+\.\d+\.\d+)").expect("static regex is valid"))
}

impl Application {
    /// Whether this application defines install variants
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Whether this is the Java application handled by the version table
    pub fn is_java(&self) -> bool {
        self.name == JAVA_APP_NAME
    }

    /// Build the selection entry for one of this application's options
    ///
    /// The returned instance carries the option's download URL and install
    /// arguments. For Java the version is taken from the first `x.y.z` in the
    /// option name, falling back to the option's install arguments.
    pub fn select_option(&self, option: &ApplicationOption) -> Application {
        let mut selected = self.clone();
        selected.download_url = option.download_url.clone();
        selected.install_args = option.install_args.clone();

        if self.id == JAVA_APP_ID || self.is_java() {
            let version = semver_pattern()
                .captures(&option.name)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| option.install_args.clone());
            selected.version = Some(version);
        }

        selected
    }

    /// The option whose download URL matches this instance, if any
    pub fn selected_option(&self) -> Option<&ApplicationOption> {
        self.options
            .iter()
            .find(|opt| opt.download_url == self.download_url)
    }

    /// Label of the chosen variant for display
    pub fn variant_label(&self) -> &str {
        self.selected_option()
            .map(|opt| opt.name.as_str())
            .unwrap_or("Standard version")
    }

    /// Whether `download_url` is the default or one of the options
    pub fn accepts_download_url(&self, download_url: &str) -> bool {
        self.download_url == download_url
            || self.options.iter().any(|opt| opt.download_url == download_url)
    }
}

/// The loaded catalog: applications (with their options joined),
/// optimizations and tweaks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub optimizations: Vec<Optimization>,
    #[serde(default)]
    pub tweaks: Vec<Tweak>,
}

/// Applications sharing a category, in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub applications: Vec<&'a Application>,
}

impl Catalog {
    /// Whether anything at all was loaded
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty() && self.optimizations.is_empty() && self.tweaks.is_empty()
    }

    pub fn application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|app| app.id == id)
    }

    pub fn optimization(&self, id: &str) -> Option<&Optimization> {
        self.optimizations.iter().find(|opt| opt.id == id)
    }

    pub fn tweak(&self, id: &str) -> Option<&Tweak> {
        self.tweaks.iter().find(|t| t.id == id)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for app in &self.applications {
            if !seen.contains(&app.category.as_str()) {
                seen.push(&app.category);
            }
        }
        seen
    }

    /// Applications grouped by category, filtered by a search term
    ///
    /// The term matches case-insensitively against name and description.
    /// Categories left without any match are omitted.
    pub fn search(&self, term: &str) -> Vec<CategoryGroup<'_>> {
        let needle = term.to_lowercase();
        self.categories()
            .into_iter()
            .map(|category| CategoryGroup {
                category,
                applications: self
                    .applications
                    .iter()
                    .filter(|app| app.category == category)
                    .filter(|app| {
                        app.name.to_lowercase().contains(&needle)
                            || app.description.to_lowercase().contains(&needle)
                    })
                    .collect(),
            })
            .filter(|group| !group.applications.is_empty())
            .collect()
    }
}
