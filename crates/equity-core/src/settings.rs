//! Durable endpoint setting.
//!
//! The only persisted state: the extraction endpoint URL, stored under the
//! `equity_api_endpoint` key of a small JSON key-value file.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::EquityError;
use crate::EquityResult;

pub const ENDPOINT_KEY: &str = "equity_api_endpoint";
pub const DEFAULT_ENDPOINT: &str = "https://your-api.ngrok-free.dev/extract";
pub const SETTINGS_FILE: &str = "settings.json";

/// Parse and check an endpoint URL.
///
/// Blank input and anything that is not an absolute http(s) URL is a
/// configuration error.
pub fn validate_endpoint(raw: &str) -> EquityResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EquityError::Configuration(
            "endpoint URL must not be empty".into(),
        ));
    }
    let url = Url::parse(trimmed)
        .map_err(|e| EquityError::Configuration(format!("invalid URL '{trimmed}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(EquityError::Configuration(format!(
            "unsupported URL scheme '{other}'"
        ))),
    }
}

/// Key-value settings file on disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SettingsStore { path: path.into() }
    }

    /// Store located at `<dir>/settings.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> EquityResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            EquityError::Settings(format!("failed to read '{}': {e}", self.path.display()))
        })?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(EquityError::Settings(format!(
                "'{}' is not a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(EquityError::Settings(format!(
                "failed to parse '{}': {e}",
                self.path.display()
            ))),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> EquityResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, text).map_err(|e| {
            EquityError::Settings(format!("failed to write '{}': {e}", self.path.display()))
        })
    }

    /// The stored endpoint, if one was saved and is still a valid URL.
    pub fn stored_endpoint(&self) -> EquityResult<Option<Url>> {
        let map = self.read_map()?;
        match map.get(ENDPOINT_KEY).and_then(Value::as_str) {
            Some(raw) => match validate_endpoint(raw) {
                Ok(url) => Ok(Some(url)),
                Err(e) => {
                    log::warn!("ignoring stored endpoint: {e}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// The stored endpoint, or the placeholder when none is saved.
    pub fn load_endpoint(&self) -> EquityResult<Url> {
        match self.stored_endpoint()? {
            Some(url) => Ok(url),
            None => validate_endpoint(DEFAULT_ENDPOINT),
        }
    }

    /// Persist `url` under the endpoint key, keeping any other keys.
    pub fn save_endpoint(&self, url: &Url) -> EquityResult<()> {
        let mut map = self.read_map()?;
        map.insert(ENDPOINT_KEY.into(), Value::String(url.to_string()));
        self.write_map(&map)?;
        log::info!("saved endpoint {} to {}", url, self.path.display());
        Ok(())
    }

    /// Remove the stored endpoint so the placeholder applies again.
    pub fn clear_endpoint(&self) -> EquityResult<()> {
        let mut map = self.read_map()?;
        if map.remove(ENDPOINT_KEY).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_endpoint() {
        assert!(validate_endpoint("https://abc.ngrok-free.dev/extract").is_ok());
        assert!(matches!(
            validate_endpoint("   "),
            Err(EquityError::Configuration(_))
        ));
        assert!(matches!(
            validate_endpoint("not a url"),
            Err(EquityError::Configuration(_))
        ));
        assert!(matches!(
            validate_endpoint("ftp://host/file"),
            Err(EquityError::Configuration(_))
        ));
    }

    #[test]
    fn test_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::in_dir(dir.path());
        assert_eq!(store.load_endpoint().unwrap().as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::in_dir(dir.path().join("nested"));
        let url = validate_endpoint("http://localhost:8000/extract").unwrap();
        store.save_endpoint(&url).unwrap();

        let reopened = SettingsStore::in_dir(dir.path().join("nested"));
        assert_eq!(reopened.load_endpoint().unwrap(), url);

        reopened.clear_endpoint().unwrap();
        assert_eq!(reopened.stored_endpoint().unwrap(), None);
    }

    #[test]
    fn test_other_keys_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::in_dir(dir.path());
        fs::write(store.path(), r#"{"theme":"dark"}"#).unwrap();
        let url = validate_endpoint("https://example.com/x").unwrap();
        store.save_endpoint(&url).unwrap();
        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[ENDPOINT_KEY], "https://example.com/x");
    }

    #[test]
    fn test_corrupt_file_is_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::in_dir(dir.path());
        fs::write(store.path(), "{oops").unwrap();
        assert!(matches!(store.load_endpoint(), Err(EquityError::Settings(_))));
    }
}
