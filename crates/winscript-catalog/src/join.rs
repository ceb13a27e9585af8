//! Joining the four catalog tables
//!
//! Options are attached to their application by `application_id`. Every
//! record set is deduplicated by id, first occurrence wins.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use winscript_core::{Application, ApplicationOption, Catalog, Optimization, Tweak};

/// The four tables as read from the store
///
/// Applications may already carry inline `options`; those are kept ahead of
/// the rows from `application_options`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTables {
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub application_options: Vec<ApplicationOption>,
    #[serde(default)]
    pub optimizations: Vec<Optimization>,
    #[serde(default)]
    pub tweaks: Vec<Tweak>,
}

/// Records dropped while joining
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinReport {
    pub duplicate_applications: usize,
    pub duplicate_options: usize,
    /// Options whose `application_id` matches no application
    pub orphan_options: usize,
    pub duplicate_optimizations: usize,
    pub duplicate_tweaks: usize,
}

impl JoinReport {
    pub fn total_dropped(&self) -> usize {
        self.duplicate_applications
            + self.duplicate_options
            + self.orphan_options
            + self.duplicate_optimizations
            + self.duplicate_tweaks
    }
}

fn dedup_by_id<T>(items: Vec<T>, id: impl Fn(&T) -> &str) -> (Vec<T>, usize) {
    let total = items.len();
    let mut seen = HashSet::new();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| seen.insert(id(item).to_string()))
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}

/// Join the raw tables into a catalog
pub fn join(tables: RawTables) -> (Catalog, JoinReport) {
    let mut report = JoinReport::default();

    let (mut applications, dropped) = dedup_by_id(tables.applications, |a| a.id.as_str());
    report.duplicate_applications = dropped;

    let (options, dropped) = dedup_by_id(tables.application_options, |o| o.id.as_str());
    report.duplicate_options = dropped;

    let app_ids: HashSet<&str> = applications.iter().map(|a| a.id.as_str()).collect();
    let mut by_app: HashMap<String, Vec<ApplicationOption>> = HashMap::new();
    for option in options {
        if app_ids.contains(option.application_id.as_str()) {
            by_app
                .entry(option.application_id.clone())
                .or_default()
                .push(option);
        } else {
            debug!(
                "Option {} references unknown application {}",
                option.id, option.application_id
            );
            report.orphan_options += 1;
        }
    }

    for app in &mut applications {
        if let Some(joined) = by_app.remove(&app.id) {
            let existing = std::mem::take(&mut app.options);
            let (merged, dropped) =
                dedup_by_id(existing.into_iter().chain(joined).collect(), |o| o.id.as_str());
            report.duplicate_options += dropped;
            app.options = merged;
        }
    }

    let (optimizations, dropped) = dedup_by_id(tables.optimizations, |o| o.id.as_str());
    report.duplicate_optimizations = dropped;

    let (tweaks, dropped) = dedup_by_id(tables.tweaks, |t| t.id.as_str());
    report.duplicate_tweaks = dropped;

    if report.total_dropped() > 0 {
        warn!("Dropped {} catalog records while joining: {:?}", report.total_dropped(), report);
    }

    (
        Catalog {
            applications,
            optimizations,
            tweaks,
        },
        report,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: &str) -> Application {
        Application {
            id: id.to_string(),
            name: id.to_string(),
            category: String::new(),
            description: String::new(),
            image_url: String::new(),
            download_url: format!("https://example.com/{id}"),
            install_args: String::new(),
            options: Vec::new(),
            version: None,
        }
    }

    fn option(id: &str, app_id: &str) -> ApplicationOption {
        ApplicationOption {
            id: id.to_string(),
            name: id.to_string(),
            application_id: app_id.to_string(),
            download_url: format!("https://example.com/{app_id}/{id}"),
            install_args: String::new(),
        }
    }

    #[test]
    fn test_options_attach_in_table_order() {
        let (catalog, report) = join(RawTables {
            applications: vec![app("java"), app("vlc")],
            application_options: vec![option("j21", "java"), option("j17", "java")],
            ..Default::default()
        });

        let ids: Vec<_> = catalog.applications[0].options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["j21", "j17"]);
        assert!(catalog.applications[1].options.is_empty());
        assert_eq!(report.total_dropped(), 0);
    }

    #[test]
    fn test_duplicates_and_orphans_are_counted() {
        let mut second = app("java");
        second.name = "Java (duplicate)".to_string();

        let (catalog, report) = join(RawTables {
            applications: vec![app("java"), second],
            application_options: vec![
                option("j21", "java"),
                option("j21", "java"),
                option("x", "missing"),
            ],
            ..Default::default()
        });

        assert_eq!(catalog.applications.len(), 1);
        assert_eq!(catalog.applications[0].name, "java");
        assert_eq!(catalog.applications[0].options.len(), 1);
        assert_eq!(
            report,
            JoinReport {
                duplicate_applications: 1,
                duplicate_options: 1,
                orphan_options: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_inline_options_are_kept_first() {
        let mut java = app("java");
        java.options = vec![option("inline", "java")];

        let (catalog, _) = join(RawTables {
            applications: vec![java],
            application_options: vec![option("inline", "java"), option("j17", "java")],
            ..Default::default()
        });

        let ids: Vec<_> = catalog.applications[0].options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["inline", "j17"]);
    }
}
