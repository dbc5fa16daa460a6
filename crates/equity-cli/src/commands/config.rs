use clap::{Args, Subcommand};
use directories::ProjectDirs;
use serde_json::{json, Value};
use std::env;
use url::Url;

use equity_core::settings::{validate_endpoint, SettingsStore, DEFAULT_ENDPOINT};

/// Overrides the settings directory; mostly for tests and CI.
pub const SETTINGS_DIR_ENV: &str = "EQUITY_SETTINGS_DIR";
/// Overrides the stored endpoint for one run.
pub const ENDPOINT_ENV: &str = "EQUITY_API_ENDPOINT";

/// Arguments for endpoint configuration
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the endpoint in effect and where it came from
    Show,
    /// Validate and store a new endpoint
    SetEndpoint {
        /// Absolute http(s) URL of the extraction endpoint
        url: String,
    },
    /// Forget the stored endpoint
    Reset,
}

/// The settings file under the platform config directory.
pub fn settings_store() -> Result<SettingsStore, Box<dyn std::error::Error>> {
    if let Ok(dir) = env::var(SETTINGS_DIR_ENV) {
        return Ok(SettingsStore::in_dir(dir));
    }
    let dirs = ProjectDirs::from("dev", "equity", "equity-editor")
        .ok_or("could not determine a configuration directory")?;
    Ok(SettingsStore::in_dir(dirs.config_dir()))
}

/// Endpoint in effect: flag, then environment, then stored value, then the placeholder.
pub fn resolve_endpoint(flag: Option<&str>) -> Result<(Url, &'static str), Box<dyn std::error::Error>> {
    if let Some(raw) = flag {
        return Ok((validate_endpoint(raw)?, "flag"));
    }
    if let Ok(raw) = env::var(ENDPOINT_ENV) {
        return Ok((validate_endpoint(&raw)?, "environment"));
    }
    if let Some(url) = settings_store()?.stored_endpoint()? {
        return Ok((url, "settings"));
    }
    Ok((validate_endpoint(DEFAULT_ENDPOINT)?, "default"))
}

pub fn run_config(args: ConfigArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = settings_store()?;
    match args.action {
        ConfigAction::Show => {
            let (endpoint, source) = resolve_endpoint(None)?;
            Ok(json!({
                "endpoint": endpoint.as_str(),
                "source": source,
                "settings_file": store.path().display().to_string(),
            }))
        }
        ConfigAction::SetEndpoint { url } => {
            let url = validate_endpoint(&url)?;
            store.save_endpoint(&url)?;
            Ok(json!({
                "endpoint": url.as_str(),
                "settings_file": store.path().display().to_string(),
            }))
        }
        ConfigAction::Reset => {
            store.clear_endpoint()?;
            Ok(json!({
                "endpoint": DEFAULT_ENDPOINT,
                "settings_file": store.path().display().to_string(),
            }))
        }
    }
}
