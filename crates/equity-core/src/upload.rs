use std::fs;
use std::path::Path;

use crate::error::EquityError;
use crate::EquityResult;

pub const PDF_MIME: &str = "application/pdf";

/// Advertised upload limit. Larger files are sent anyway, with a warning.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// A file picked for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        UploadFile {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn pdf(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(name, PDF_MIME, bytes)
    }

    /// Read a file from disk, typing it as PDF when the extension or the
    /// leading magic bytes say so.
    pub fn from_path(path: impl AsRef<Path>) -> EquityResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let by_extension = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        let content_type = if by_extension || bytes.starts_with(PDF_MAGIC) {
            PDF_MIME
        } else {
            "application/octet-stream"
        };
        Ok(Self::new(name, content_type, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case(PDF_MIME)
    }

    pub fn ensure_pdf(&self) -> EquityResult<()> {
        if self.is_pdf() {
            Ok(())
        } else {
            Err(EquityError::InputValidation {
                field: "file".into(),
                reason: format!("'{}' is {}, not a PDF", self.name, self.content_type),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn exceeds_limit(&self) -> bool {
        self.bytes.len() > MAX_UPLOAD_BYTES
    }

    /// Size in megabytes with two decimals, as shown next to the file name.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.bytes.len() as f64 / 1024.0 / 1024.0)
    }
}
