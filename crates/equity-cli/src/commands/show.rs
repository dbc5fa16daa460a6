use clap::Args;
use serde_json::{json, Map, Value};

use equity_core::bilingual::Language;
use equity_core::format::{format_amount, or_dash};
use equity_core::reconcile::check_retained_earnings;
use equity_core::statement::{self, ChangeDirection, Section, StatementRow};
use equity_core::{EquityEditor, Year};

use crate::input;

/// Marker appended to cells that differ from the extracted value
const EDITED_MARK: &str = " *";

/// Arguments for rendering the statement
#[derive(Args)]
pub struct ShowArgs {
    /// Path to JSON statement file (stdin or the sample when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Only render these sections (capital, common-shares, reserves, retained-earnings, total-equity)
    #[arg(long, value_delimiter = ',')]
    pub section: Vec<Section>,
}

pub fn run_show(args: ShowArgs, lang: Language) -> Result<Value, Box<dyn std::error::Error>> {
    let document = input::load_document(args.input.as_deref())?;
    let editor = EquityEditor::from_validated(document)?;
    render(&editor, &args.section, lang)
}

/// Lay the statement out as one array of display rows per table.
pub(crate) fn render(
    editor: &EquityEditor,
    only: &[Section],
    lang: Language,
) -> Result<Value, Box<dyn std::error::Error>> {
    let doc = editor.typed()?;
    let mut out = Map::new();

    let metadata: Vec<Value> = statement::metadata_lines(&doc.metadata)
        .into_iter()
        .map(|(label, value)| json!({ "field": label.render(lang), "value": value.render(lang) }))
        .collect();
    out.insert("metadata".into(), Value::Array(metadata));

    for section in Section::ALL {
        if !only.is_empty() && !only.contains(&section) {
            continue;
        }
        let rows = statement::section_rows(editor, section)?;
        let rendered: Vec<Value> = rows.iter().map(|r| row_json(r, lang)).collect();
        out.insert(section.to_string(), Value::Array(rendered));
    }

    if only.is_empty() {
        let changes: Vec<Value> = statement::capital_changes(&doc)
            .into_iter()
            .map(|c| {
                let direction = match c.direction {
                    ChangeDirection::Increase => "+",
                    ChangeDirection::Decrease => "-",
                };
                json!({
                    "direction": direction,
                    "date": or_dash(Some(&c.date)),
                    "amount": format_amount(c.amount),
                    "description": c.description.render(lang),
                })
            })
            .collect();
        out.insert("capital_changes".into(), Value::Array(changes));

        let movements: Vec<Value> = statement::retained_movements(&doc)
            .into_iter()
            .map(|(label, amount)| json!({ "item": label.render(lang), "amount": format_amount(amount) }))
            .collect();
        out.insert("retained_earnings_movements".into(), Value::Array(movements));

        let notes: Vec<Value> = statement::notes(&doc)
            .into_iter()
            .map(|(note, title, content)| {
                json!({
                    "note": note.note_number,
                    "title": title.render(lang),
                    "content": content.render(lang),
                })
            })
            .collect();
        out.insert("notes".into(), Value::Array(notes));

        let warnings: Vec<Value> = check_retained_earnings(&doc)
            .warning()
            .into_iter()
            .map(Value::String)
            .collect();
        out.insert("warnings".into(), Value::Array(warnings));
    }

    Ok(Value::Object(out))
}

fn row_json(row: &StatementRow, lang: Language) -> Value {
    json!({
        "item": row.label.render(lang),
        "current": cell(row, Year::Current),
        "previous": cell(row, Year::Previous),
        "note": or_dash(row.note.as_deref()),
    })
}

fn cell(row: &StatementRow, year: Year) -> String {
    let text = format_amount(row.value(year));
    if row.is_edited(year) {
        format!("{text}{EDITED_MARK}")
    } else {
        text
    }
}
