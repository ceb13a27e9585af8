//! URL state tokens
//!
//! A selection is shared as a single query parameter holding standard base64
//! of the UTF-8 JSON `{apps, optimizations, tweaks}`. Decoding never fails
//! loudly: anything malformed reads as "no shared state".
//!
//! [`UrlStateSync`] runs the two address-bar protocols: apply the token once
//! the catalog is ready, then write the token back after the selection has
//! been quiet for the debounce window.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::error::Result;
use crate::selection::SelectionState;
use crate::types::{Application, Catalog, Optimization, Tweak, UrlStateConfig};

/// The shareable part of a selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlState {
    /// Selected application instances
    #[serde(default)]
    pub apps: Vec<Application>,

    /// Selected optimization ids
    #[serde(default)]
    pub optimizations: Vec<String>,

    /// Selected tweak ids; omitted when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tweaks: Vec<String>,
}

impl UrlState {
    /// Snapshot a selection, in selection order
    pub fn from_selection(selection: &SelectionState) -> Self {
        Self {
            apps: selection.applications().cloned().collect(),
            optimizations: selection.optimization_ids().map(str::to_string).collect(),
            tweaks: selection.tweak_ids().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty() && self.optimizations.is_empty() && self.tweaks.is_empty()
    }

    /// JSON, then UTF-8 bytes, then padded standard base64
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(STANDARD.encode(json.as_bytes()))
    }

    /// Inverse of [`UrlState::encode`]; `None` for any malformed token
    pub fn decode(token: &str) -> Option<Self> {
        let bytes = match STANDARD.decode(token.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("URL state token is not base64: {}", e);
                return None;
            }
        };

        let json = match String::from_utf8(bytes) {
            Ok(json) => json,
            Err(e) => {
                debug!("URL state token is not UTF-8: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(state) => Some(state),
            Err(e) => {
                debug!("URL state token is not a selection: {}", e);
                None
            }
        }
    }
}

/// Outcome of validating decoded entries against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
    pub kept: Vec<T>,
    pub dropped: usize,
}

impl<T> Validated<T> {
    fn tally(total: usize, kept: Vec<T>, kind: &str) -> Self {
        let dropped = total - kept.len();
        if dropped > 0 {
            warn!(
                "Dropped {} of {} {} from URL state (not in catalog)",
                dropped, total, kind
            );
        }
        Self { kept, dropped }
    }
}

/// Keep applications whose id exists and whose download URL is the default
/// or one of the options
///
/// Kept entries are rebuilt from the catalog record so install arguments
/// always come from the catalog, never from the token.
pub fn validate_applications(candidates: &[Application], catalog: &Catalog) -> Validated<Application> {
    let kept = candidates
        .iter()
        .filter_map(|candidate| {
            let app = catalog.application(&candidate.id)?;
            if !app.accepts_download_url(&candidate.download_url) {
                return None;
            }
            Some(
                app.options
                    .iter()
                    .find(|opt| opt.download_url == candidate.download_url)
                    .map(|opt| app.select_option(opt))
                    .unwrap_or_else(|| app.clone()),
            )
        })
        .collect();

    Validated::tally(candidates.len(), kept, "applications")
}

/// Resolve optimization ids, dropping unknown ones
pub fn validate_optimizations(ids: &[String], catalog: &Catalog) -> Validated<Optimization> {
    let kept = ids
        .iter()
        .filter_map(|id| catalog.optimization(id).cloned())
        .collect();
    Validated::tally(ids.len(), kept, "optimizations")
}

/// Resolve tweak ids, dropping unknown ones
pub fn validate_tweaks(ids: &[String], catalog: &Catalog) -> Validated<Tweak> {
    let kept = ids.iter().filter_map(|id| catalog.tweak(id).cloned()).collect();
    Validated::tally(ids.len(), kept, "tweaks")
}

/// Read the token from the query parameter `param`
pub fn read_token(url: &Url, param: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == param)
        // An unescaped '+' in a hand-pasted link arrives as a space
        .map(|(_, value)| value.replace(' ', "+"))
        .filter(|value| !value.is_empty())
}

/// Set the query parameter `param` to `token`, keeping every other parameter
pub fn write_token(url: &mut Url, param: &str, token: &str) {
    let others: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != param)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(others)
        .append_pair(param, token);
}

/// The location whose query carries the token
pub trait AddressBar: Send + Sync + 'static {
    fn current(&self) -> Url;

    /// Replace the current location without adding a history entry
    fn replace(&self, url: Url);
}

/// Keeps a selection and the address bar in step
pub struct UrlStateSync<A: AddressBar> {
    address: Arc<A>,
    param: String,
    debounce: Duration,
    initialized: bool,
    /// Selection revision behind the last scheduled write
    scheduled_revision: Option<u64>,
    pending: Option<JoinHandle<()>>,
}

impl<A: AddressBar> UrlStateSync<A> {
    pub fn new(address: Arc<A>, config: &UrlStateConfig) -> Self {
        Self {
            address,
            param: config.param.clone(),
            debounce: Duration::from_millis(config.debounce_ms),
            initialized: false,
            scheduled_revision: None,
            pending: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a debounced write is still waiting
    pub fn has_pending_write(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Apply the token in the address bar to `selection`
    ///
    /// Does nothing until the catalog is non-empty, and runs at most once
    /// after that. Each of the three sets is replaced only when validation
    /// leaves it non-empty. Returns whether this call performed the
    /// initialization.
    pub fn initialize(&mut self, selection: &mut SelectionState, catalog: &Catalog) -> bool {
        if self.initialized || catalog.is_empty() {
            return false;
        }
        self.initialized = true;

        let Some(state) = read_token(&self.address.current(), &self.param)
            .and_then(|token| UrlState::decode(&token))
        else {
            debug!("No usable URL state to restore");
            return true;
        };

        let apps = validate_applications(&state.apps, catalog);
        let optimizations = validate_optimizations(&state.optimizations, catalog);
        let tweaks = validate_tweaks(&state.tweaks, catalog);

        info!(
            "Restoring URL state: {} applications, {} optimizations, {} tweaks",
            apps.kept.len(),
            optimizations.kept.len(),
            tweaks.kept.len()
        );

        if !apps.kept.is_empty() {
            selection.replace_applications(apps.kept);
        }
        if !optimizations.kept.is_empty() {
            selection.replace_optimizations(optimizations.kept);
        }
        if !tweaks.kept.is_empty() {
            selection.replace_tweaks(tweaks.kept);
        }

        true
    }

    /// Write the token for `selection` once the debounce window passes
    ///
    /// Ignored before initialization, and when `selection` has not changed
    /// since the last scheduled write. Otherwise a pending write is
    /// cancelled and the window restarts.
    pub fn schedule(&mut self, selection: &SelectionState) {
        if !self.initialized {
            return;
        }
        if self.scheduled_revision == Some(selection.revision()) {
            trace!("Selection unchanged since revision {}", selection.revision());
            return;
        }

        let token = match UrlState::from_selection(selection).encode() {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to encode URL state: {}", e);
                return;
            }
        };

        if let Some(previous) = self.pending.take() {
            previous.abort();
        }
        self.scheduled_revision = Some(selection.revision());

        let address = Arc::clone(&self.address);
        let param = self.param.clone();
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let mut url = address.current();
            write_token(&mut url, &param, &token);
            debug!("Wrote URL state to address bar");
            address.replace(url);
        }));
    }
}

impl<A: AddressBar> Drop for UrlStateSync<A> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
