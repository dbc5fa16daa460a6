use serde_json::{Map, Value};
use std::io;

use super::{cell_text, is_record_list, record_headers};

/// Write output as CSV to stdout.
///
/// Objects holding lists of records become one long CSV with a leading
/// `section` column, so every statement table survives in a single stream.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    let _ = write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

pub(crate) fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) if map.values().any(is_record_list) => write_sections(wtr, map),
        Value::Object(map) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in map {
                wtr.write_record([key.as_str(), &format_csv_value(val)])?;
            }
            Ok(())
        }
        Value::Array(arr) => write_array_csv(wtr, None, arr),
        _ => wtr.write_record([&format_csv_value(value)]),
    }
}

fn write_sections<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> csv::Result<()> {
    for (key, val) in map {
        if let Value::Array(arr) = val {
            if is_record_list(val) {
                write_array_csv(wtr, Some(key), arr)?;
                continue;
            }
        }
        wtr.write_record([key.as_str(), &format_csv_value(val)])?;
    }
    Ok(())
}

fn write_array_csv<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    section: Option<&str>,
    arr: &[Value],
) -> csv::Result<()> {
    if arr.is_empty() {
        return Ok(());
    }

    if !matches!(arr.first(), Some(Value::Object(_))) {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
        return Ok(());
    }

    let headers = record_headers(arr);
    let mut header_row: Vec<&str> = Vec::with_capacity(headers.len() + 1);
    if section.is_some() {
        header_row.push("section");
    }
    header_row.extend(headers.iter().map(String::as_str));
    wtr.write_record(&header_row)?;

    for item in arr {
        if let Value::Object(map) = item {
            let mut row: Vec<String> = Vec::with_capacity(header_row.len());
            if let Some(name) = section {
                row.push(name.to_string());
            }
            row.extend(
                headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_csv_value).unwrap_or_default()),
            );
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    cell_text(value, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
        write_csv(&mut wtr, value).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_sections_get_a_leading_column() {
        let value = json!({
            "capital": [{ "current": "354,000,000", "item": "Paid-up Capital" }],
        });
        assert_eq!(
            render(&value),
            "section,current,item\ncapital,\"354,000,000\",Paid-up Capital\n"
        );
    }

    #[test]
    fn test_flat_object_is_field_value() {
        let value = json!({ "status": "balanced" });
        assert_eq!(render(&value), "field,value\nstatus,balanced\n");
    }
}
