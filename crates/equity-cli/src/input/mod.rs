pub mod file;
pub mod stdin;

use equity_core::sample::sample_document;
use serde_json::Value;

/// The document a command works on: `--input` file, else piped stdin, else
/// the built-in sample.
pub fn load_document(input: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        return file::read_json_value(path);
    }
    if let Some(value) = stdin::read_stdin()? {
        return Ok(value);
    }
    log::debug!("no input given, using the sample statement");
    Ok(sample_document())
}
