//! Token commands

use anyhow::{anyhow, Context, Result};
use camino::Utf8Path;
use serde::Serialize;
use url::Url;
use winscript_core::url_state::{
    validate_applications, validate_optimizations, validate_tweaks, write_token,
};
use winscript_core::{Application, UrlState};

use super::{extract_token, load_catalog, load_runtime_config};
use crate::cli::{TokenCommands, TokenDecodeArgs, TokenEncodeArgs};
use crate::output;

pub async fn run(cmd: TokenCommands, config_dir: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        TokenCommands::Encode(args) => encode(args, config_dir),
        TokenCommands::Decode(args) => decode(args, config_dir).await,
    }
}

fn encode(args: TokenEncodeArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let content = std::fs::read_to_string(&args.selection)
        .with_context(|| format!("Failed to read {}", args.selection))?;
    let state: UrlState = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", args.selection))?;
    let token = state.encode()?;

    match args.base_url {
        Some(base) => {
            let config = load_runtime_config(config_dir)?;
            let mut url =
                Url::parse(&base).with_context(|| format!("Invalid base URL '{}'", base))?;
            write_token(&mut url, &config.url_state.param, &token);
            println!("{}", url);
        }
        None => println!("{}", token),
    }
    Ok(())
}

#[derive(Serialize)]
struct DecodedJson<'a> {
    #[serde(flatten)]
    state: &'a UrlState,
    #[serde(skip_serializing_if = "Option::is_none")]
    dropped: Option<usize>,
}

async fn decode(args: TokenDecodeArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let config = load_runtime_config(config_dir)?;
    let token = extract_token(&args.token, &config.url_state.param);
    let mut state =
        UrlState::decode(&token).ok_or_else(|| anyhow!("Token does not hold a valid selection"))?;

    let mut dropped = None;
    if args.validate {
        let catalog = load_catalog(&config, &args.source).await?;
        let apps = validate_applications(&state.apps, &catalog);
        let optimizations = validate_optimizations(&state.optimizations, &catalog);
        let tweaks = validate_tweaks(&state.tweaks, &catalog);
        dropped = Some(apps.dropped + optimizations.dropped + tweaks.dropped);
        state = UrlState {
            apps: apps.kept,
            optimizations: optimizations.kept.into_iter().map(|o| o.id).collect(),
            tweaks: tweaks.kept.into_iter().map(|t| t.id).collect(),
        };
    }

    if args.json {
        let json = DecodedJson {
            state: &state,
            dropped,
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    output::header("Applications");
    if state.apps.is_empty() {
        println!("  (none)");
    }
    for app in &state.apps {
        output::kv(&app.name, &describe_variant(app));
    }

    output::header("Optimizations");
    println!("  {}", list_or_none(&state.optimizations));

    output::header("Tweaks");
    println!("  {}", list_or_none(&state.tweaks));

    if let Some(dropped) = dropped.filter(|d| *d > 0) {
        println!();
        output::warning(&format!("{} entries are not in the catalog", dropped));
    }
    Ok(())
}

fn describe_variant(app: &Application) -> String {
    match &app.version {
        Some(version) => format!("{} (version {})", app.variant_label(), version),
        None => app.variant_label().to_string(),
    }
}

fn list_or_none(ids: &[String]) -> String {
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winscript_core::ApplicationOption;

    fn java() -> Application {
        Application {
            id: "java".to_string(),
            name: "Java".to_string(),
            category: "Development".to_string(),
            description: String::new(),
            image_url: String::new(),
            download_url: "https://example.com/java".to_string(),
            install_args: String::new(),
            options: vec![ApplicationOption {
                id: "java-21".to_string(),
                name: "Java 21.0.2 (LTS)".to_string(),
                application_id: "java".to_string(),
                download_url: "https://example.com/java/21".to_string(),
                install_args: String::new(),
            }],
            version: None,
        }
    }

    #[test]
    fn test_describe_variant_uses_option_name() {
        let base = java();
        let selected = base.select_option(&base.options[0]);
        assert_eq!(describe_variant(&selected), "Java 21.0.2 (LTS) (version 21.0.2)");
        assert_eq!(describe_variant(&base), "Standard version");
    }

    #[test]
    fn test_list_or_none() {
        assert_eq!(list_or_none(&[]), "(none)");
        assert_eq!(list_or_none(&["a".to_string(), "b".to_string()]), "a, b");
    }
}
