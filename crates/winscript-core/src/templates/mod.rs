//! PowerShell templates
//!
//! Uses Tera templates embedded at compile time to render the assembled
//! installation script and the Java installer block.

mod context;

pub use context::{AppBlock, InstallScriptContext, JavaTemplateContext, OptimizationBlock, TweakBlock};

use tera::{Context, Tera};
use tracing::debug;

use crate::error::Result;

const INSTALL_SCRIPT: &str = "install-script.ps1";
const JAVA_INSTALL: &str = "java-install.ps1";
const JAVA_INSTALL_BODY: &str = "java-install-body.ps1";

/// Names of the templates compiled into the registry
pub fn template_names() -> &'static [&'static str] {
    &[INSTALL_SCRIPT, JAVA_INSTALL, JAVA_INSTALL_BODY]
}

/// Registry of the embedded script templates
pub struct ScriptTemplates {
    tera: Tera,
}

impl ScriptTemplates {
    /// Create a registry with the embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            (INSTALL_SCRIPT, include_str!("install-script.ps1.tera")),
            (JAVA_INSTALL, include_str!("java-install.ps1.tera")),
            (JAVA_INSTALL_BODY, include_str!("java-install-body.ps1.tera")),
        ])?;

        Ok(Self { tera })
    }

    /// Render the Java installer block for one version entry
    pub fn render_java(&self, context: &JavaTemplateContext) -> Result<String> {
        debug!("Rendering Java installer for version {}", context.version);
        let rendered = self
            .tera
            .render(JAVA_INSTALL, &Context::from_serialize(context)?)?;
        Ok(rendered.trim_end().to_string())
    }

    /// Render the complete installation script
    pub fn render_install_script(&self, context: &InstallScriptContext) -> Result<String> {
        let rendered = self
            .tera
            .render(INSTALL_SCRIPT, &Context::from_serialize(context)?)?;
        Ok(rendered)
    }
}
