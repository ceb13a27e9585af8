//! Selection state
//!
//! The set of chosen applications, optimizations and tweaks. Each set keeps
//! insertion order and is keyed by an explicit derived key, so membership
//! checks do not scan the whole selection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::{Application, Optimization, Tweak};

/// Identity of a selected application: the same application can appear
/// once per distinct download URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppKey {
    pub id: String,
    pub download_url: String,
}

impl AppKey {
    pub fn new(id: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            download_url: download_url.into(),
        }
    }

    /// Derive the key of an application instance
    pub fn of(app: &Application) -> Self {
        Self::new(&app.id, &app.download_url)
    }
}

/// Selected applications, optimizations and tweaks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    applications: IndexMap<AppKey, Application>,
    optimizations: IndexMap<String, Optimization>,
    tweaks: IndexMap<String, Tweak>,
    revision: u64,
}

impl SelectionState {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle an application instance
    ///
    /// Removes it when an entry with the same (id, download URL) exists.
    /// Otherwise, for an option-bearing application every other entry with
    /// the same id is dropped first, so at most one variant stays active.
    pub fn toggle_application(&mut self, app: Application) -> &Self {
        let key = AppKey::of(&app);

        if self.applications.shift_remove(&key).is_some() {
            trace!("Deselected application {} ({})", key.id, key.download_url);
        } else {
            if app.has_options() {
                self.applications.retain(|existing, _| existing.id != key.id);
            }
            trace!("Selected application {} ({})", key.id, key.download_url);
            self.applications.insert(key, app);
        }

        self.bump();
        self
    }

    /// Toggle an optimization by id
    pub fn toggle_optimization(&mut self, optimization: Optimization) -> &Self {
        if self.optimizations.shift_remove(&optimization.id).is_none() {
            self.optimizations
                .insert(optimization.id.clone(), optimization);
        }
        self.bump();
        self
    }

    /// Toggle a tweak by id
    pub fn toggle_tweak(&mut self, tweak: Tweak) -> &Self {
        if self.tweaks.shift_remove(&tweak.id).is_none() {
            self.tweaks.insert(tweak.id.clone(), tweak);
        }
        self.bump();
        self
    }

    /// Replace the application set
    ///
    /// Plain applications keep the first entry per key. An option-bearing
    /// application keeps only its last variant, as repeated toggles would.
    pub fn replace_applications(&mut self, apps: impl IntoIterator<Item = Application>) {
        self.applications.clear();
        for app in apps {
            let key = AppKey::of(&app);
            if app.has_options() {
                self.applications.retain(|existing, _| existing.id != key.id);
                self.applications.insert(key, app);
            } else {
                self.applications.entry(key).or_insert(app);
            }
        }
        self.bump();
    }

    /// Replace the optimization set, keeping the first entry per id
    pub fn replace_optimizations(&mut self, optimizations: impl IntoIterator<Item = Optimization>) {
        self.optimizations.clear();
        for opt in optimizations {
            self.optimizations.entry(opt.id.clone()).or_insert(opt);
        }
        self.bump();
    }

    /// Replace the tweak set, keeping the first entry per id
    pub fn replace_tweaks(&mut self, tweaks: impl IntoIterator<Item = Tweak>) {
        self.tweaks.clear();
        for tweak in tweaks {
            self.tweaks.entry(tweak.id.clone()).or_insert(tweak);
        }
        self.bump();
    }

    /// Drop every selection
    pub fn clear(&mut self) {
        self.applications.clear();
        self.optimizations.clear();
        self.tweaks.clear();
        self.bump();
    }

    pub fn is_application_selected(&self, id: &str, download_url: &str) -> bool {
        self.applications
            .contains_key(&AppKey::new(id, download_url))
    }

    pub fn is_optimization_selected(&self, id: &str) -> bool {
        self.optimizations.contains_key(id)
    }

    pub fn is_tweak_selected(&self, id: &str) -> bool {
        self.tweaks.contains_key(id)
    }

    /// Selected applications in insertion order
    pub fn applications(&self) -> impl Iterator<Item = &Application> {
        self.applications.values()
    }

    /// Selected optimizations in insertion order
    pub fn optimizations(&self) -> impl Iterator<Item = &Optimization> {
        self.optimizations.values()
    }

    /// Selected tweaks in insertion order
    pub fn tweaks(&self) -> impl Iterator<Item = &Tweak> {
        self.tweaks.values()
    }

    pub fn optimization_ids(&self) -> impl Iterator<Item = &str> {
        self.optimizations.keys().map(String::as_str)
    }

    pub fn tweak_ids(&self) -> impl Iterator<Item = &str> {
        self.tweaks.keys().map(String::as_str)
    }

    /// Total number of selected items
    pub fn len(&self) -> usize {
        self.applications.len() + self.optimizations.len() + self.tweaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter bumped on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Owned copies of the three lists, in selection order
    pub fn to_lists(&self) -> (Vec<Application>, Vec<Optimization>, Vec<Tweak>) {
        (
            self.applications.values().cloned().collect(),
            self.optimizations.values().cloned().collect(),
            self.tweaks.values().cloned().collect(),
        )
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
