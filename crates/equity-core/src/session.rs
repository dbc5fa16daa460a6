//! Page-level state: the editor, the endpoint setting, the picked file and
//! the bilingual notices raised by user actions.
//!
//! Every failure is terminal for the action that caused it only. The session
//! always returns to its last valid state and reports what happened through
//! exactly one notice.

use serde::Serialize;
use url::Url;

use crate::bilingual::BilingualText;
use crate::editor::{EditedField, EquityEditor, PersistenceSink};
use crate::error::EquityError;
use crate::path::Year;
use crate::settings::{validate_endpoint, SettingsStore};
use crate::upload::UploadFile;
use crate::value::FieldValue;
use crate::EquityResult;

#[cfg(feature = "extract")]
use crate::extract::ExtractionClient;

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast-style message shown after an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: BilingualText,
    pub message: BilingualText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Notice {
    fn success(message: BilingualText) -> Self {
        Notice {
            level: NoticeLevel::Success,
            title: BilingualText::new("نجح", "Success"),
            message,
            detail: None,
        }
    }

    fn saved(message: BilingualText) -> Self {
        Notice {
            title: BilingualText::new("تم الحفظ", "Saved"),
            ..Notice::success(message)
        }
    }

    fn error(message: BilingualText, detail: Option<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            title: BilingualText::new("خطأ", "Error"),
            message,
            detail,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Progress of the extraction upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadState {
    /// No file picked
    Idle,
    /// A PDF is picked and can be sent
    Ready,
    /// A request is in flight
    Uploading,
}

#[derive(Debug)]
pub struct Session {
    editor: EquityEditor,
    endpoint: Url,
    store: Option<SettingsStore>,
    selected: Option<UploadFile>,
    upload: UploadState,
    notices: Vec<Notice>,
}

impl Session {
    pub fn new(editor: EquityEditor, endpoint: Url) -> Self {
        Session {
            editor,
            endpoint,
            store: None,
            selected: None,
            upload: UploadState::Idle,
            notices: Vec::new(),
        }
    }

    /// Restore the endpoint from `store` and save later changes back to it.
    pub fn with_store(editor: EquityEditor, store: SettingsStore) -> EquityResult<Self> {
        let endpoint = store.load_endpoint()?;
        let mut session = Self::new(editor, endpoint);
        session.store = Some(store);
        Ok(session)
    }

    pub fn editor(&self) -> &EquityEditor {
        &self.editor
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn upload_state(&self) -> UploadState {
        self.upload
    }

    pub fn selected_file(&self) -> Option<&UploadFile> {
        self.selected.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Whether the save action should be offered.
    pub fn can_save(&self) -> bool {
        self.editor.has_pending_edits()
    }

    // -- endpoint -----------------------------------------------------------

    /// Validate and store a new endpoint. On failure the previous one stays.
    pub fn set_endpoint(&mut self, raw: &str) -> EquityResult<()> {
        if raw.trim().is_empty() {
            self.notices.push(Notice::error(
                BilingualText::new("يرجى إدخال عنوان API صالح", "Please enter a valid API endpoint"),
                None,
            ));
            return Err(EquityError::Configuration(
                "endpoint URL must not be empty".into(),
            ));
        }

        let url = match validate_endpoint(raw) {
            Ok(url) => url,
            Err(e) => {
                self.notices.push(Notice::error(
                    BilingualText::new("عنوان URL غير صالح", "Invalid URL format"),
                    Some(e.to_string()),
                ));
                return Err(e);
            }
        };

        if let Some(store) = &self.store {
            if let Err(e) = store.save_endpoint(&url) {
                self.notices.push(Notice::error(
                    BilingualText::new("تعذر حفظ الإعدادات", "Could not save settings"),
                    Some(e.to_string()),
                ));
                return Err(e);
            }
        }

        self.endpoint = url;
        self.notices.push(Notice::saved(BilingualText::new(
            "تم حفظ عنوان API بنجاح",
            "API endpoint saved successfully",
        )));
        Ok(())
    }

    // -- file selection -----------------------------------------------------

    /// Pick a file for upload. Anything but a PDF is rejected with no state change.
    pub fn select_file(&mut self, file: UploadFile) -> EquityResult<()> {
        if self.upload == UploadState::Uploading {
            return Err(EquityError::InputValidation {
                field: "file".into(),
                reason: "an upload is already in progress".into(),
            });
        }
        if let Err(e) = file.ensure_pdf() {
            self.notices.push(Notice::error(
                BilingualText::new("يرجى تحميل ملف PDF فقط", "Please upload a PDF file only"),
                Some(e.to_string()),
            ));
            return Err(e);
        }
        log::debug!("selected '{}' ({})", file.name, file.size_label());
        self.selected = Some(file);
        self.upload = UploadState::Ready;
        Ok(())
    }

    pub fn clear_file(&mut self) {
        if self.upload != UploadState::Uploading {
            self.selected = None;
            self.upload = UploadState::Idle;
        }
    }

    // -- upload -------------------------------------------------------------

    /// Send the picked file to the configured endpoint.
    #[cfg(feature = "extract")]
    pub async fn upload(&mut self) -> EquityResult<()> {
        let client = ExtractionClient::new(self.endpoint.clone());
        self.upload_with(&client).await
    }

    /// Send the picked file through `client`.
    ///
    /// On success the extracted document replaces the current one and the
    /// picked file is cleared. On failure the document is left exactly as it
    /// was and the file stays picked so the user can retry.
    #[cfg(feature = "extract")]
    pub async fn upload_with(&mut self, client: &ExtractionClient) -> EquityResult<()> {
        let Some(file) = self.selected.as_ref() else {
            return Err(EquityError::InputValidation {
                field: "file".into(),
                reason: "no file selected".into(),
            });
        };

        self.upload = UploadState::Uploading;
        let outcome = client.extract(file).await;
        self.upload = UploadState::Ready;

        let result = outcome.and_then(|document| self.editor.replace_document(document));
        match result {
            Ok(()) => {
                self.selected = None;
                self.upload = UploadState::Idle;
                self.notices.push(Notice::success(BilingualText::new(
                    "تم استخراج البيانات بنجاح",
                    "Data extracted successfully",
                )));
                Ok(())
            }
            Err(e) => {
                log::error!("upload failed: {e}");
                self.notices.push(Notice::error(
                    BilingualText::new("فشل في استخراج البيانات", "Failed to extract data"),
                    Some(e.to_string()),
                ));
                Err(e)
            }
        }
    }

    // -- editing ------------------------------------------------------------

    /// Apply an edit and confirm it with a notice.
    ///
    /// A path that does not resolve is a defect in the caller, not a user
    /// error, so it is logged and returned without a notice.
    pub fn edit(
        &mut self,
        component_path: &str,
        year: Year,
        value: FieldValue,
    ) -> EquityResult<EditedField> {
        match self.editor.apply_edit(component_path, year, value) {
            Ok(entry) => {
                self.notices.push(Notice {
                    title: BilingualText::new("قيمة محدثة", "Value Updated"),
                    ..Notice::success(BilingualText::new(
                        "تم تحديث القيمة بنجاح",
                        "Value has been successfully updated",
                    ))
                });
                Ok(entry)
            }
            Err(e) => {
                log::error!("rejected edit of {component_path}.{year}: {e}");
                Err(e)
            }
        }
    }

    /// Save through `sink`. Returns `false` without doing anything when there
    /// is nothing to save.
    pub fn save(&mut self, sink: &mut dyn PersistenceSink) -> EquityResult<bool> {
        if !self.can_save() {
            return Ok(false);
        }
        let count = self.editor.edit_count();
        match self.editor.commit(sink) {
            Ok(()) => {
                self.notices.push(Notice::saved(BilingualText::new(
                    format!("تم حفظ {count} تعديل بنجاح"),
                    format!("Successfully saved {count} changes"),
                )));
                Ok(true)
            }
            Err(e) => {
                self.notices.push(Notice::error(
                    BilingualText::new("فشل الحفظ", "Save failed"),
                    Some(e.to_string()),
                ));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::LogSink;
    use crate::settings::DEFAULT_ENDPOINT;

    fn session() -> Session {
        let url = validate_endpoint(DEFAULT_ENDPOINT).unwrap();
        Session::new(EquityEditor::sample(), url)
    }

    #[test]
    fn test_bad_endpoint_keeps_previous() {
        let mut s = session();
        let before = s.endpoint().clone();
        assert!(s.set_endpoint("not a url").is_err());
        assert_eq!(s.endpoint(), &before);
        let n = s.last_notice().unwrap();
        assert!(n.is_error());
        assert_eq!(n.message.english, "Invalid URL format");

        assert!(s.set_endpoint("  ").is_err());
        assert_eq!(
            s.last_notice().unwrap().message.english,
            "Please enter a valid API endpoint"
        );
        assert_eq!(s.endpoint(), &before);
    }

    #[test]
    fn test_good_endpoint_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::in_dir(dir.path());
        let mut s = Session::with_store(EquityEditor::sample(), store.clone()).unwrap();
        s.set_endpoint("http://127.0.0.1:9000/extract").unwrap();
        assert_eq!(store.load_endpoint().unwrap().as_str(), "http://127.0.0.1:9000/extract");

        let restored = Session::with_store(EquityEditor::sample(), store).unwrap();
        assert_eq!(restored.endpoint().as_str(), "http://127.0.0.1:9000/extract");
    }

    #[test]
    fn test_non_pdf_rejected_without_state_change() {
        let mut s = session();
        let err = s
            .select_file(UploadFile::new("a.png", "image/png", vec![1, 2, 3]))
            .unwrap_err();
        assert!(matches!(err, EquityError::InputValidation { .. }));
        assert!(s.selected_file().is_none());
        assert_eq!(s.upload_state(), UploadState::Idle);
        assert_eq!(s.notices().len(), 1);
    }

    #[test]
    fn test_select_and_clear_pdf() {
        let mut s = session();
        s.select_file(UploadFile::pdf("q4.pdf", b"%PDF-1.4".to_vec())).unwrap();
        assert_eq!(s.upload_state(), UploadState::Ready);
        s.clear_file();
        assert_eq!(s.upload_state(), UploadState::Idle);
        assert!(s.selected_file().is_none());
    }

    #[test]
    fn test_save_gated_on_pending_edits() {
        let mut s = session();
        let mut sink = LogSink::default();
        assert!(!s.save(&mut sink).unwrap());
        assert_eq!(sink.saves, 0);

        s.edit("equity_components.paid_up_capital", Year::Current, 1i64.into())
            .unwrap();
        s.edit("equity_components.paid_up_capital", Year::Current, 2i64.into())
            .unwrap();
        assert!(s.save(&mut sink).unwrap());
        assert_eq!(
            s.last_notice().unwrap().message.english,
            "Successfully saved 1 changes"
        );
    }

    #[test]
    fn test_bad_edit_path_has_no_notice() {
        let mut s = session();
        let err = s
            .edit("equity_components.nonexistent_field", Year::Current, 5i64.into())
            .unwrap_err();
        assert!(err.is_path_resolution());
        assert!(s.notices().is_empty());
    }
}
