use equity_core::sample::sample_document;
use equity_core::statement::{section_rows, Section};
use equity_core::{EquityEditor, EquityError, FieldKind, FieldValue, Year};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

const PAID_UP: &str = "equity_components.paid_up_capital";
const PAID_UP_CURRENT: &str = "equity_components.paid_up_capital.current_year.value";

fn editor_with_paid_up(value: Value) -> EquityEditor {
    let mut doc = sample_document();
    doc["equity_components"]["paid_up_capital"]["current_year"]["value"] = value;
    EquityEditor::new(doc)
}

// ===========================================================================
// Edit tracking
// ===========================================================================

#[test]
fn test_repeat_edits_count_once_but_log_twice() {
    let mut editor = EquityEditor::sample();
    editor
        .apply_edit(PAID_UP, Year::Current, FieldValue::Number(dec!(1)))
        .unwrap();
    editor
        .apply_edit(PAID_UP, Year::Current, FieldValue::Number(dec!(2)))
        .unwrap();

    assert_eq!(editor.edit_count(), 1);
    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.history()[0].path, PAID_UP_CURRENT);
    assert_eq!(editor.history()[1].path, PAID_UP_CURRENT);
}

#[test]
fn test_distinct_years_are_distinct_cells() {
    let mut editor = EquityEditor::sample();
    editor.apply_edit(PAID_UP, Year::Current, 1i64.into()).unwrap();
    editor.apply_edit(PAID_UP, Year::Previous, 1i64.into()).unwrap();
    assert_eq!(editor.edit_count(), 2);
    assert!(editor.is_edited(PAID_UP, Year::Current));
    assert!(editor.is_edited(PAID_UP, Year::Previous));
}

#[test]
fn test_snapshot_is_not_affected_by_later_edits() {
    let mut editor = EquityEditor::sample();
    let before = editor.snapshot();

    editor
        .apply_edit(PAID_UP, Year::Current, FieldValue::Number(dec!(400000000)))
        .unwrap();

    assert_eq!(before.pointer("/equity_components/paid_up_capital/current_year/value"), Some(&json!(354000000)));
    assert_eq!(editor.value_at(PAID_UP_CURRENT).unwrap(), &json!(400000000));
}

#[test]
fn test_original_value_captured_before_each_edit() {
    let mut editor = editor_with_paid_up(json!(100));
    editor.apply_edit(PAID_UP, Year::Current, 200i64.into()).unwrap();
    editor.apply_edit(PAID_UP, Year::Current, 300i64.into()).unwrap();

    let originals: Vec<&Value> = editor.history().iter().map(|h| &h.original_value).collect();
    let news: Vec<&Value> = editor.history().iter().map(|h| &h.new_value).collect();
    assert_eq!(originals, vec![&json!(100), &json!(200)]);
    assert_eq!(news, vec![&json!(200), &json!(300)]);
}

#[test]
fn test_blank_input_stores_null_and_renders_dash() {
    let mut editor = EquityEditor::sample();
    let value = FieldValue::parse_input("", FieldKind::Number).unwrap();
    editor.apply_edit(PAID_UP, Year::Current, value).unwrap();

    let stored = editor.value_at(PAID_UP_CURRENT).unwrap();
    assert_eq!(stored, &Value::Null);
    assert_ne!(stored, &json!(0));

    let rows = section_rows(&editor, Section::Capital).unwrap();
    assert_eq!(rows[0].current, None);
    assert_eq!(equity_core::format::format_amount(rows[0].current), "-");
}

#[test]
fn test_zero_is_kept_distinct_from_null() {
    let mut editor = EquityEditor::sample();
    let value = FieldValue::parse_input("0", FieldKind::Number).unwrap();
    editor.apply_edit(PAID_UP, Year::Current, value).unwrap();
    assert_eq!(editor.value_at(PAID_UP_CURRENT).unwrap(), &json!(0));
    let rows = section_rows(&editor, Section::Capital).unwrap();
    assert_eq!(equity_core::format::format_amount(rows[0].current), "0");
}

#[test]
fn test_unknown_path_changes_nothing() {
    let mut editor = EquityEditor::sample();
    editor.apply_edit(PAID_UP, Year::Previous, 9i64.into()).unwrap();
    let doc_before = editor.snapshot();
    let keys_before = editor.edited_keys().clone();
    let history_before = editor.history().to_vec();

    let err = editor
        .apply_edit("equity_components.nonexistent_field", Year::Current, 5i64.into())
        .unwrap_err();

    match err {
        EquityError::PathResolution { segment, .. } => assert_eq!(segment, "nonexistent_field"),
        other => panic!("expected PathResolution, got {other}"),
    }
    assert_eq!(*editor.snapshot(), *doc_before);
    assert_eq!(editor.edited_keys(), &keys_before);
    assert_eq!(editor.history(), history_before.as_slice());
}

#[test]
fn test_paid_up_capital_end_to_end() {
    let mut editor = EquityEditor::sample();
    assert!(!editor.has_pending_edits());

    editor
        .apply_edit(PAID_UP, Year::Current, FieldValue::Number(dec!(400000000)))
        .unwrap();

    assert_eq!(editor.value_at(PAID_UP_CURRENT).unwrap(), &json!(400000000));
    assert!(editor
        .edited_keys()
        .contains("equity_components.paid_up_capital.current"));
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history()[0].original_value, json!(354000000));
    assert_eq!(editor.history()[0].new_value, json!(400000000));
    assert!(editor.has_pending_edits());

    let typed = editor.typed().unwrap();
    assert_eq!(
        typed.equity_components.paid_up_capital.current_year.value,
        Some(dec!(400000000))
    );
    // the other period is untouched
    assert_eq!(
        typed.equity_components.paid_up_capital.previous_year.value,
        Some(dec!(354000000))
    );
}

#[test]
fn test_validated_constructor_rejects_foreign_json() {
    assert!(matches!(
        EquityEditor::from_validated(json!({ "rows": [] })),
        Err(EquityError::Schema(_))
    ));
    assert!(EquityEditor::try_from(sample_document()).is_ok());
}
