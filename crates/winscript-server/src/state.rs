//! Shared handler state

use std::sync::Arc;

use anyhow::{Context, Result};
use winscript_catalog::CatalogHandle;
use winscript_core::ScriptAssembler;

#[derive(Clone)]
pub struct ServerState {
    pub(crate) assembler: Arc<ScriptAssembler>,
    pub(crate) catalog: CatalogHandle,
    /// Query parameter carrying URL state tokens
    pub(crate) state_param: Arc<str>,
}

impl ServerState {
    pub fn new(catalog: CatalogHandle, state_param: &str) -> Result<Self> {
        let assembler = ScriptAssembler::new().context("Failed to load script templates")?;
        Ok(Self {
            assembler: Arc::new(assembler),
            catalog,
            state_param: Arc::from(state_param),
        })
    }
}
