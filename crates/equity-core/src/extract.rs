//! Client for the external PDF extraction endpoint.
//!
//! One multipart `POST` per call with a single `file` part. A 2xx response
//! with a JSON body is success; anything else is a transport error. Calls are
//! not de-duplicated or retried.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::EquityError;
use crate::upload::{UploadFile, PDF_MIME};
use crate::EquityResult;

/// Header the default development tunnel needs to skip its interstitial page.
pub const SKIP_BROWSER_WARNING: &str = "ngrok-skip-browser-warning";

#[derive(Debug, Clone)]
pub struct ExtractionClient {
    http: Client,
    endpoint: Url,
    skip_browser_warning: bool,
}

impl ExtractionClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        ExtractionClient {
            http,
            endpoint,
            skip_browser_warning: true,
        }
    }

    /// Production endpoints do not need the tunnel header.
    pub fn skip_browser_warning(mut self, enabled: bool) -> Self {
        self.skip_browser_warning = enabled;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Upload `file` and return the JSON document the endpoint produced.
    pub async fn extract(&self, file: &UploadFile) -> EquityResult<Value> {
        file.ensure_pdf()?;
        if file.exceeds_limit() {
            log::warn!(
                "'{}' is {}, above the advertised 20 MB limit",
                file.name,
                file.size_label()
            );
        }

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part("file", part);

        let mut request = self.http.post(self.endpoint.clone()).multipart(form);
        if self.skip_browser_warning {
            request = request.header(SKIP_BROWSER_WARNING, "true");
        }

        log::info!("uploading '{}' ({}) to {}", file.name, file.size_label(), self.endpoint);
        let response = request.send().await.map_err(|e| EquityError::Transport {
            status: None,
            message: format!("request to {} failed: {e}", self.endpoint),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EquityError::Transport {
                status: Some(status.as_u16()),
                message: format!(
                    "API Error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                ),
            });
        }

        let body = response.text().await?;
        let document: Value = serde_json::from_str(&body).map_err(|e| EquityError::Transport {
            status: Some(status.as_u16()),
            message: format!("response is not valid JSON: {e}"),
        })?;
        log::info!("extraction returned {} bytes of JSON", body.len());
        Ok(document)
    }
}
