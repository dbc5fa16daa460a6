use clap::Args;
use serde_json::{json, Value};
use tokio::runtime::Runtime;

use equity_core::extract::ExtractionClient;
use equity_core::session::Session;
use equity_core::upload::UploadFile;
use equity_core::EquityEditor;

use crate::commands::config;
use crate::input::file;

/// Arguments for PDF extraction
#[derive(Args)]
pub struct ExtractArgs {
    /// PDF financial statement to upload
    pub file: String,

    /// Extraction endpoint (overrides the stored setting)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Do not send the tunnel browser-warning header
    #[arg(long)]
    pub no_tunnel_header: bool,

    /// Write the extracted document here instead of printing it
    #[arg(long)]
    pub write: Option<String>,
}

pub fn run_extract(args: ExtractArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let path = file::resolve_path(&args.file)?;
    let upload = UploadFile::from_path(&path)?;
    let (endpoint, source) = config::resolve_endpoint(args.endpoint.as_deref())?;
    log::debug!("using {source} endpoint {endpoint}");

    let client = ExtractionClient::new(endpoint.clone()).skip_browser_warning(!args.no_tunnel_header);
    let mut session = Session::new(EquityEditor::sample(), endpoint);
    let size = upload.size_label();
    let name = upload.name.clone();
    session.select_file(upload)?;

    let runtime = Runtime::new()?;
    runtime.block_on(session.upload_with(&client))?;

    let document = session.editor().document().clone();
    match args.write {
        Some(target) => {
            file::write_json_value(&target, &document)?;
            Ok(json!({
                "file": name,
                "size": size,
                "endpoint": client.endpoint().as_str(),
                "written": target,
            }))
        }
        None => Ok(document),
    }
}
