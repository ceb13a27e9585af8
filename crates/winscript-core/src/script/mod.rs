//! PowerShell script assembly
//!
//! Turns the final selection lists into one installation script. The block
//! order is fixed: header, elevation preamble, progress counters, one block
//! per application, per optimization and per tweak, then the footer.
//! Assembly is deterministic: identical ordered inputs produce identical
//! bytes.

mod request;

pub use request::{GenerateScriptRequest, GenerateScriptResponse};

use tracing::{debug, trace};

use crate::error::Result;
use crate::java;
use crate::selection::SelectionState;
use crate::templates::{
    AppBlock, InstallScriptContext, OptimizationBlock, ScriptTemplates, TweakBlock,
};
use crate::types::{Application, Optimization, Tweak};

/// Double every backtick so the text survives inside a double-quoted
/// PowerShell string argument
pub fn escape_backticks(command: &str) -> String {
    command.replace('`', "``")
}

/// Prefix every line of `text` with `# `
fn comment_block(text: &str) -> String {
    text.lines()
        .map(|line| format!("# {}", line).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assembles installation scripts from selection lists
pub struct ScriptAssembler {
    templates: ScriptTemplates,
}

impl ScriptAssembler {
    /// Create an assembler with the embedded templates
    pub fn new() -> Result<Self> {
        Ok(Self {
            templates: ScriptTemplates::new()?,
        })
    }

    /// Assemble the script for the given selections, in the given order
    pub fn assemble(
        &self,
        apps: &[Application],
        optimizations: &[Optimization],
        tweaks: &[Tweak],
    ) -> Result<String> {
        debug!(
            "Assembling script: {} applications, {} optimizations, {} tweaks",
            apps.len(),
            optimizations.len(),
            tweaks.len()
        );

        let context = InstallScriptContext {
            total_steps: apps.len() + optimizations.len() + tweaks.len(),
            apps: apps
                .iter()
                .map(|app| self.app_block(app))
                .collect::<Result<Vec<_>>>()?,
            optimizations: optimizations
                .iter()
                .map(|opt| OptimizationBlock {
                    name: opt.name.clone(),
                    script: opt.script.clone(),
                })
                .collect(),
            tweaks: tweaks
                .iter()
                .map(|tweak| TweakBlock {
                    name: tweak.name.clone(),
                    description_comment: comment_block(&tweak.description),
                    command: escape_backticks(&tweak.command),
                })
                .collect(),
        };

        let script = self.templates.render_install_script(&context)?;
        trace!("Generated script:\n{}", script);
        Ok(script)
    }

    /// Assemble the script for everything in a selection state
    pub fn assemble_selection(&self, selection: &SelectionState) -> Result<String> {
        let (apps, optimizations, tweaks) = selection.to_lists();
        self.assemble(&apps, &optimizations, &tweaks)
    }

    /// Assemble the script for an endpoint request
    pub fn assemble_request(&self, request: &GenerateScriptRequest) -> Result<GenerateScriptResponse> {
        let script = self.assemble(
            &request.selected_apps,
            &request.selected_optimizations,
            &request.selected_tweaks,
        )?;
        Ok(GenerateScriptResponse { script })
    }

    fn app_block(&self, app: &Application) -> Result<AppBlock> {
        let (heading, java_script) = if app.is_java() {
            match app.version.as_deref() {
                Some(version) => (
                    format!("Installing {} version {}", app.name, version),
                    Some(java::render_with(&self.templates, version)?),
                ),
                None => (
                    format!("Installing {}", app.name),
                    Some("# Error: Java version not specified".to_string()),
                ),
            }
        } else {
            (format!("Installing {}", app.name), None)
        };

        Ok(AppBlock {
            heading,
            name: app.name.clone(),
            download_url: app.download_url.clone(),
            install_args: app.install_args.clone(),
            java_script,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_backticks_doubles_each() {
        assert_eq!(escape_backticks("a`b``c"), "a``b````c");
        assert_eq!(escape_backticks("plain"), "plain");
    }

    #[test]
    fn test_comment_block_prefixes_lines() {
        assert_eq!(comment_block("one\ntwo"), "# one\n# two");
        assert_eq!(comment_block("\nx"), "#\n# x");
        assert_eq!(comment_block(""), "");
    }
}
