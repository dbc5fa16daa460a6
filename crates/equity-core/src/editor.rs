use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::EquityError;
use crate::path::{self, FieldPath, Year};
use crate::types::EquityDocument;
use crate::value::FieldValue;
use crate::EquityResult;

// ---------------------------------------------------------------------------
// History record
// ---------------------------------------------------------------------------

/// One accepted edit. Appended to the history, never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditedField {
    /// Full leaf path, e.g. `equity_components.paid_up_capital.current_year.value`
    pub path: String,
    pub timestamp: DateTime<Utc>,
    pub original_value: Value,
    pub new_value: Value,
}

// ---------------------------------------------------------------------------
// Persistence collaborator
// ---------------------------------------------------------------------------

/// Receives the document and the edit log when the user saves.
///
/// Whether a successful save should also mark the editor clean is the
/// implementor's decision; [`EquityEditor::commit`] never does it.
pub trait PersistenceSink {
    fn persist(&mut self, document: &Value, history: &[EditedField]) -> EquityResult<()>;
}

/// Sink that only records the save in the log.
#[derive(Debug, Default)]
pub struct LogSink {
    pub saves: usize,
}

impl PersistenceSink for LogSink {
    fn persist(&mut self, document: &Value, history: &[EditedField]) -> EquityResult<()> {
        self.saves += 1;
        log::info!(
            "saving edited statement ({} history entries, {} bytes)",
            history.len(),
            document.to_string().len()
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// State manager
// ---------------------------------------------------------------------------

/// Owns the live document and tracks every edit made to it.
///
/// The document sits behind an [`Arc`]; edits clone it, change the clone and
/// swap it in, so a [`snapshot`](Self::snapshot) taken earlier never changes.
#[derive(Debug, Clone)]
pub struct EquityEditor {
    document: Arc<Value>,
    edited_keys: BTreeSet<String>,
    history: Vec<EditedField>,
}

impl EquityEditor {
    /// Start editing a document without checking its shape.
    pub fn new(document: Value) -> Self {
        EquityEditor {
            document: Arc::new(document),
            edited_keys: BTreeSet::new(),
            history: Vec::new(),
        }
    }

    /// Start editing a document after validating it against the equity schema.
    pub fn from_validated(document: Value) -> EquityResult<Self> {
        EquityDocument::from_value(&document)?;
        Ok(Self::new(document))
    }

    pub fn sample() -> Self {
        Self::new(crate::sample::sample_document())
    }

    /// Set the `<year>_year.value` leaf under `component_path` to `new_value`.
    ///
    /// The `<year>_year` object must exist; a missing `value` key inside it is
    /// created. Fails with [`EquityError::PathResolution`] when an intermediate
    /// segment is missing, and in that case nothing changes.
    pub fn apply_edit(
        &mut self,
        component_path: &str,
        year: Year,
        new_value: FieldValue,
    ) -> EquityResult<EditedField> {
        let leaf = FieldPath::parse(&year.leaf_path(component_path))?;
        let new_json = new_value.to_json();

        let mut next = (*self.document).clone();
        let original_value = path::set(&mut next, &leaf, new_json.clone())?;

        log::debug!("edit {} : {} -> {}", leaf, original_value, new_json);

        self.document = Arc::new(next);
        self.edited_keys.insert(year.edited_key(component_path));
        let entry = EditedField {
            path: leaf.as_str().to_string(),
            timestamp: Utc::now(),
            original_value,
            new_value: new_json,
        };
        self.history.push(entry.clone());
        Ok(entry)
    }

    /// Number of distinct cells changed, not the number of edit events.
    pub fn edit_count(&self) -> usize {
        self.edited_keys.len()
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.edited_keys.is_empty()
    }

    pub fn is_edited(&self, component_path: &str, year: Year) -> bool {
        self.edited_keys.contains(&year.edited_key(component_path))
    }

    pub fn edited_keys(&self) -> &BTreeSet<String> {
        &self.edited_keys
    }

    pub fn history(&self) -> &[EditedField] {
        &self.history
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Immutable handle to the document as it is now.
    pub fn snapshot(&self) -> Arc<Value> {
        Arc::clone(&self.document)
    }

    /// Typed view of the current document.
    pub fn typed(&self) -> EquityResult<EquityDocument> {
        EquityDocument::from_value(&self.document)
    }

    /// Read any node by its dot-delimited path.
    pub fn value_at(&self, path: &str) -> EquityResult<&Value> {
        let path = FieldPath::parse(path)?;
        path::resolve(&self.document, &path)
    }

    /// True when an edit of `(component_path, year)` would resolve.
    pub fn is_editable(&self, component_path: &str, year: Year) -> bool {
        FieldPath::parse(&year.leaf_path(component_path))
            .map(|p| path::settable(&self.document, &p))
            .unwrap_or(false)
    }

    /// Load a freshly extracted document.
    ///
    /// The edited keys and history describe the previous document and are cleared.
    pub fn replace_document(&mut self, document: Value) -> EquityResult<()> {
        EquityDocument::from_value(&document)?;
        log::info!(
            "replacing document, discarding {} edits to the previous one",
            self.history.len()
        );
        self.document = Arc::new(document);
        self.edited_keys.clear();
        self.history.clear();
        Ok(())
    }

    /// Hand the document and history to `sink`. Tracking is left as is.
    pub fn commit(&self, sink: &mut dyn PersistenceSink) -> EquityResult<()> {
        if !self.has_pending_edits() {
            log::debug!("commit requested with no pending edits");
        }
        sink.persist(&self.document, &self.history)
    }
}

impl Default for EquityEditor {
    fn default() -> Self {
        Self::sample()
    }
}

impl TryFrom<Value> for EquityEditor {
    type Error = EquityError;

    fn try_from(document: Value) -> Result<Self, Self::Error> {
        Self::from_validated(document)
    }
}
