//! Generate command

use anyhow::{anyhow, Context, Result};
use camino::Utf8Path;
use tracing::{info, warn};
use winscript_core::url_state::{validate_applications, validate_optimizations, validate_tweaks};
use winscript_core::{GenerateScriptRequest, ScriptAssembler, UrlState};

use super::{extract_token, load_catalog, load_runtime_config};
use crate::cli::GenerateArgs;
use crate::output;

pub async fn run(args: GenerateArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let request = match (&args.selection, &args.token) {
        (Some(path), _) => read_request(path)?,
        (None, Some(token)) => {
            let config = load_runtime_config(config_dir)?;
            let token = extract_token(token, &config.url_state.param);
            let state = UrlState::decode(&token)
                .ok_or_else(|| anyhow!("Token does not hold a valid selection"))?;
            let catalog = load_catalog(&config, &args.source).await?;
            request_from_state(&state, &catalog)
        }
        (None, None) => return Err(anyhow!("Either --selection or --token is required")),
    };

    let assembler = ScriptAssembler::new()?;
    let response = assembler.assemble_request(&request)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &response.script)
                .with_context(|| format!("Failed to write {}", path))?;
            output::success(&format!("Wrote script to {}", path));
        }
        None => print!("{}", response.script),
    }

    if args.copy {
        copy_to_clipboard(&response.script);
    }

    Ok(())
}

fn read_request(path: &Utf8Path) -> Result<GenerateScriptRequest> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path))
}

/// Build a request from a token, keeping only what the catalog still offers
fn request_from_state(
    state: &UrlState,
    catalog: &winscript_core::Catalog,
) -> GenerateScriptRequest {
    let apps = validate_applications(&state.apps, catalog);
    let optimizations = validate_optimizations(&state.optimizations, catalog);
    let tweaks = validate_tweaks(&state.tweaks, catalog);

    let dropped = apps.dropped + optimizations.dropped + tweaks.dropped;
    if dropped > 0 {
        output::warning(&format!(
            "{} selected item(s) are no longer in the catalog and were skipped",
            dropped
        ));
    }

    GenerateScriptRequest {
        selected_apps: apps.kept,
        selected_optimizations: optimizations.kept,
        selected_tweaks: tweaks.kept,
    }
}

/// Copy failures are reported but never fail the command
fn copy_to_clipboard(script: &str) {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(script));
    match result {
        Ok(()) => {
            info!("Copied {} bytes to the clipboard", script.len());
            output::success("Script copied to clipboard");
        }
        Err(e) => {
            warn!("Failed to copy script to clipboard: {}", e);
            output::warning("Could not copy the script to the clipboard");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winscript_core::{Application, Catalog, Optimization};

    fn catalog() -> Catalog {
        Catalog {
            applications: vec![Application {
                id: "git".to_string(),
                name: "Git".to_string(),
                category: "Development".to_string(),
                description: String::new(),
                image_url: String::new(),
                download_url: "https://downloads.example.com/git.exe".to_string(),
                install_args: "/VERYSILENT".to_string(),
                options: Vec::new(),
                version: None,
            }],
            optimizations: vec![Optimization {
                id: "telemetry".to_string(),
                name: "Disable telemetry".to_string(),
                description: String::new(),
                script: "Stop-Service DiagTrack".to_string(),
            }],
            tweaks: Vec::new(),
        }
    }

    #[test]
    fn test_request_from_state_drops_stale_entries() {
        let catalog = catalog();
        let state = UrlState {
            apps: catalog.applications.clone(),
            optimizations: vec!["telemetry".to_string(), "retired".to_string()],
            tweaks: vec!["gone".to_string()],
        };

        let request = request_from_state(&state, &catalog);
        assert_eq!(request.selected_apps.len(), 1);
        assert_eq!(request.selected_optimizations.len(), 1);
        assert!(request.selected_tweaks.is_empty());
    }

    #[test]
    fn test_read_request_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = camino::Utf8PathBuf::try_from(dir.path().join("selection.json")).unwrap();
        std::fs::write(
            &path,
            r#"{"selectedApps":[{"id":"git","name":"Git","download_url":"https://downloads.example.com/git.exe"}]}"#,
        )
        .unwrap();

        let request = read_request(&path).unwrap();
        assert_eq!(request.selected_apps[0].name, "Git");
        assert!(request.selected_optimizations.is_empty());
    }
}
