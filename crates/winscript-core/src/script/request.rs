//! Wire types of the script-generation endpoint

use serde::{Deserialize, Serialize};

use crate::types::{Application, Optimization, Tweak};

/// Body of `POST /api/generate-script`
///
/// Missing arrays are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScriptRequest {
    #[serde(default)]
    pub selected_apps: Vec<Application>,

    #[serde(default)]
    pub selected_optimizations: Vec<Optimization>,

    #[serde(default)]
    pub selected_tweaks: Vec<Tweak>,
}

/// Response of `POST /api/generate-script`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateScriptResponse {
    pub script: String,
}
