use clap::Args;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use url::Url;

use equity_core::error::EquityError;
use equity_core::session::Session;
use equity_core::settings::{validate_endpoint, DEFAULT_ENDPOINT};
use equity_core::{EditedField, EquityEditor, EquityResult, FieldKind, FieldValue, PersistenceSink, Year};

use crate::commands::config;
use crate::input;

/// Arguments for applying edits
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EditArgs {
    /// Path to JSON statement file (stdin or the sample when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Edit as COMPONENT_PATH:YEAR=VALUE, e.g. equity_components.paid_up_capital:current=400000000
    #[arg(long = "set", required = true)]
    pub set: Vec<String>,

    /// Store values as text instead of numbers
    #[arg(long)]
    pub text: bool,

    /// Write the edited document here
    #[arg(long)]
    pub write: Option<String>,

    /// Write the edit history here
    #[arg(long)]
    pub history: Option<String>,
}

/// One parsed `--set` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSpec {
    pub component_path: String,
    pub year: Year,
    pub raw_value: String,
}

impl EditSpec {
    pub fn parse(arg: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let (target, raw_value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected PATH:YEAR=VALUE, got '{arg}'"))?;
        let (component_path, year) = target
            .rsplit_once(':')
            .ok_or_else(|| format!("missing ':YEAR' in '{target}'"))?;
        if component_path.trim().is_empty() {
            return Err(format!("missing component path in '{arg}'").into());
        }
        Ok(EditSpec {
            component_path: component_path.trim().to_string(),
            year: year.parse()?,
            raw_value: raw_value.to_string(),
        })
    }
}

/// Writes the saved document and history to JSON files.
pub struct FileSink {
    pub document_path: Option<PathBuf>,
    pub history_path: Option<PathBuf>,
}

impl FileSink {
    fn write(path: &PathBuf, value: &impl serde::Serialize) -> EquityResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(value)?;
        fs::write(path, text)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

impl PersistenceSink for FileSink {
    fn persist(&mut self, document: &Value, history: &[EditedField]) -> EquityResult<()> {
        if self.document_path.is_none() && self.history_path.is_none() {
            return Err(EquityError::Settings("no output file configured".into()));
        }
        if let Some(path) = &self.document_path {
            Self::write(path, document)?;
        }
        if let Some(path) = &self.history_path {
            Self::write(path, &history)?;
        }
        Ok(())
    }
}

/// Editing never talks to the endpoint, so a broken endpoint setting only
/// falls back to the placeholder.
fn session_endpoint() -> Result<Url, Box<dyn std::error::Error>> {
    match config::resolve_endpoint(None) {
        Ok((url, _)) => Ok(url),
        Err(e) => {
            log::warn!("ignoring endpoint setting: {e}");
            Ok(validate_endpoint(DEFAULT_ENDPOINT)?)
        }
    }
}

pub fn run_edit(args: EditArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let edits = args
        .set
        .iter()
        .map(|s| EditSpec::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    let document = input::load_document(args.input.as_deref())?;
    let editor = EquityEditor::from_validated(document)?;
    let mut session = Session::new(editor, session_endpoint()?);

    let kind = if args.text { FieldKind::Text } else { FieldKind::Number };
    for edit in &edits {
        let value = FieldValue::parse_input(&edit.raw_value, kind)?;
        session.edit(&edit.component_path, edit.year, value)?;
    }

    let mut saved = false;
    if args.write.is_some() || args.history.is_some() {
        let mut sink = FileSink {
            document_path: args.write.map(PathBuf::from),
            history_path: args.history.map(PathBuf::from),
        };
        saved = session.save(&mut sink)?;
    }

    let editor = session.editor();
    Ok(json!({
        "edit_count": editor.edit_count(),
        "edited_keys": editor.edited_keys(),
        "history": editor.history(),
        "saved": saved,
    }))
}
