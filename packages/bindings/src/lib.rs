use napi::Result as NapiResult;
use napi_derive::napi;
use serde_json::{json, Value};

use equity_core::bilingual::{BilingualText, HoverLabel};
use equity_core::reconcile;
use equity_core::statement;
use equity_core::{EquityDocument, EquityEditor, FieldKind, FieldValue, Year};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_document(input_json: &str) -> NapiResult<Value> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// Live statement with edit tracking, owned by the JS side.
#[napi]
pub struct EquityEditorHandle {
    inner: EquityEditor,
}

#[napi]
impl EquityEditorHandle {
    #[napi(constructor)]
    pub fn new(document_json: String) -> napi::Result<Self> {
        let document = parse_document(&document_json)?;
        let inner = EquityEditor::from_validated(document).map_err(to_napi_error)?;
        Ok(EquityEditorHandle { inner })
    }

    /// Apply raw cell input; `year` is "current" or "previous". Returns the
    /// history entry as JSON.
    #[napi]
    pub fn apply_edit(
        &mut self,
        component_path: String,
        year: String,
        input: String,
        as_text: Option<bool>,
    ) -> NapiResult<String> {
        let year: Year = year.parse().map_err(to_napi_error)?;
        let kind = if as_text.unwrap_or(false) {
            FieldKind::Text
        } else {
            FieldKind::Number
        };
        let value = FieldValue::parse_input(&input, kind).map_err(to_napi_error)?;
        let entry = self
            .inner
            .apply_edit(&component_path, year, value)
            .map_err(to_napi_error)?;
        serde_json::to_string(&entry).map_err(to_napi_error)
    }

    #[napi]
    pub fn edit_count(&self) -> u32 {
        self.inner.edit_count() as u32
    }

    #[napi]
    pub fn has_pending_edits(&self) -> bool {
        self.inner.has_pending_edits()
    }

    #[napi]
    pub fn edited_keys(&self) -> Vec<String> {
        self.inner.edited_keys().iter().cloned().collect()
    }

    #[napi]
    pub fn document_json(&self) -> NapiResult<String> {
        serde_json::to_string(self.inner.document()).map_err(to_napi_error)
    }

    #[napi]
    pub fn history_json(&self) -> NapiResult<String> {
        serde_json::to_string(self.inner.history()).map_err(to_napi_error)
    }

    /// Display rows for every section, reflecting the edits so far.
    #[napi]
    pub fn rows_json(&self) -> NapiResult<String> {
        rows_for(&self.inner)
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Bilingual label that shows Arabic and swaps to English while hovered.
#[napi]
pub struct HoverLabelHandle {
    inner: HoverLabel,
}

#[napi]
impl HoverLabelHandle {
    #[napi(constructor)]
    pub fn new(arabic: String, english: String) -> Self {
        HoverLabelHandle {
            inner: HoverLabel::new(BilingualText::new(arabic, english)),
        }
    }

    #[napi]
    pub fn pointer_enter(&mut self) {
        self.inner.pointer_enter();
    }

    #[napi]
    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    #[napi]
    pub fn is_hovered(&self) -> bool {
        self.inner.is_hovered()
    }

    #[napi]
    pub fn shown(&self) -> String {
        self.inner.shown().to_string()
    }
}

// ---------------------------------------------------------------------------
// Statement helpers
// ---------------------------------------------------------------------------

#[napi]
pub fn sample_document() -> String {
    equity_core::sample::sample_document().to_string()
}

#[napi]
pub fn statement_rows(input_json: String) -> NapiResult<String> {
    let document = parse_document(&input_json)?;
    let editor = EquityEditor::from_validated(document).map_err(to_napi_error)?;
    rows_for(&editor)
}

#[napi]
pub fn check_retained_earnings(input_json: String) -> NapiResult<String> {
    let document = parse_document(&input_json)?;
    let doc = EquityDocument::from_value(&document).map_err(to_napi_error)?;
    let outcome = reconcile::check_retained_earnings(&doc);
    serde_json::to_string(&outcome).map_err(to_napi_error)
}

fn rows_for(editor: &EquityEditor) -> NapiResult<String> {
    let sections: Vec<Value> = statement::all_rows(editor)
        .map_err(to_napi_error)?
        .into_iter()
        .map(|(section, rows)| {
            json!({
                "section": section,
                "title": section.title(),
                "rows": rows,
            })
        })
        .collect();
    serde_json::to_string(&sections).map_err(to_napi_error)
}

