use clap::Args;
use serde_json::Value;

use equity_core::reconcile::check_retained_earnings;
use equity_core::EquityDocument;

use crate::input;

/// Arguments for the retained earnings check
#[derive(Args)]
pub struct CheckArgs {
    /// Path to JSON statement file (stdin or the sample when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_check(args: CheckArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let document = input::load_document(args.input.as_deref())?;
    let doc = EquityDocument::from_value(&document)?;
    let outcome = check_retained_earnings(&doc);

    let mut value = serde_json::to_value(&outcome)?;
    if let (Value::Object(map), Some(warning)) = (&mut value, outcome.warning()) {
        map.insert("warnings".into(), Value::Array(vec![Value::String(warning)]));
    }
    Ok(value)
}
