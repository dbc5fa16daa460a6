//! Display rows for each section of the statement.
//!
//! Rows are derived from the typed document plus the editor's tracking state.
//! A row is editable only when both of its year leaves resolve in the live
//! document, so presentation code never issues an edit that must fail.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::bilingual::BilingualText;
use crate::editor::EquityEditor;
use crate::error::EquityError;
use crate::path::Year;
use crate::types::{CapitalChange, EquityDocument, FinancialNote, Metadata};
use crate::value::FieldValue;
use crate::EquityResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Capital,
    CommonShares,
    Reserves,
    RetainedEarnings,
    TotalEquity,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Capital,
        Section::CommonShares,
        Section::Reserves,
        Section::RetainedEarnings,
        Section::TotalEquity,
    ];

    pub fn title(&self) -> BilingualText {
        match self {
            Section::Capital => BilingualText::new("رأس المال المدفوع", "Paid-up Capital"),
            Section::CommonShares => BilingualText::new("الأسهم العادية", "Common Shares"),
            Section::Reserves => BilingualText::new("الاحتياطيات", "Reserves"),
            Section::RetainedEarnings => BilingualText::new("الأرباح المبقاة", "Retained Earnings"),
            Section::TotalEquity => BilingualText::new("إجمالي حقوق الملكية", "Total Equity"),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Capital => "capital",
            Section::CommonShares => "common_shares",
            Section::Reserves => "reserves",
            Section::RetainedEarnings => "retained_earnings",
            Section::TotalEquity => "total_equity",
        };
        f.write_str(name)
    }
}

impl FromStr for Section {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "capital" => Ok(Section::Capital),
            "common_shares" | "shares" => Ok(Section::CommonShares),
            "reserves" => Ok(Section::Reserves),
            "retained_earnings" | "retained" => Ok(Section::RetainedEarnings),
            "total_equity" | "total" => Ok(Section::TotalEquity),
            other => Err(EquityError::InputValidation {
                field: "section".into(),
                reason: format!("unknown section '{other}'"),
            }),
        }
    }
}

/// One line of an equity table: label, two periods, note reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub label: BilingualText,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub current: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub previous: Option<Decimal>,
    pub note: Option<String>,
    pub component_path: String,
    pub editable: bool,
    pub current_edited: bool,
    pub previous_edited: bool,
}

impl StatementRow {
    pub fn value(&self, year: Year) -> Option<Decimal> {
        match year {
            Year::Current => self.current,
            Year::Previous => self.previous,
        }
    }

    pub fn is_edited(&self, year: Year) -> bool {
        match year {
            Year::Current => self.current_edited,
            Year::Previous => self.previous_edited,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Increase,
    Decrease,
}

/// A capital increase or decrease as shown in the capital-changes card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalChangeLine {
    pub direction: ChangeDirection,
    pub date: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub description: BilingualText,
}

// ---------------------------------------------------------------------------
// Row builders
// ---------------------------------------------------------------------------

struct RowSpec {
    label: BilingualText,
    current: Option<Decimal>,
    previous: Option<Decimal>,
    note: Option<String>,
    component_path: String,
}

/// The live `<year>_year.value` leaf wins over the typed figure, so an edit
/// always shows up in its row. A non-numeric leaf renders as absent.
fn cell(
    editor: &EquityEditor,
    component_path: &str,
    year: Year,
    typed: Option<Decimal>,
) -> Option<Decimal> {
    match editor.value_at(&year.leaf_path(component_path)) {
        Ok(leaf) => FieldValue::from_json(leaf).as_decimal(),
        Err(_) => typed,
    }
}

fn finish(editor: &EquityEditor, spec: RowSpec) -> StatementRow {
    let editable = Year::ALL
        .iter()
        .all(|y| editor.is_editable(&spec.component_path, *y));
    StatementRow {
        current_edited: editor.is_edited(&spec.component_path, Year::Current),
        previous_edited: editor.is_edited(&spec.component_path, Year::Previous),
        current: cell(editor, &spec.component_path, Year::Current, spec.current),
        previous: cell(editor, &spec.component_path, Year::Previous, spec.previous),
        label: spec.label,
        note: spec.note,
        component_path: spec.component_path,
        editable,
    }
}

/// Build the rows of one section from the editor's current document.
pub fn section_rows(editor: &EquityEditor, section: Section) -> EquityResult<Vec<StatementRow>> {
    let doc = editor.typed()?;
    Ok(rows_for(editor, &doc, section))
}

/// Every section, in display order.
pub fn all_rows(editor: &EquityEditor) -> EquityResult<Vec<(Section, Vec<StatementRow>)>> {
    let doc = editor.typed()?;
    Ok(Section::ALL
        .iter()
        .map(|s| (*s, rows_for(editor, &doc, *s)))
        .collect())
}

fn rows_for(editor: &EquityEditor, doc: &EquityDocument, section: Section) -> Vec<StatementRow> {
    let ec = &doc.equity_components;
    let specs = match section {
        Section::Capital => vec![RowSpec {
            label: BilingualText::new("رأس المال المدفوع", "Paid-up Capital"),
            current: ec.paid_up_capital.current_year.value,
            previous: ec.paid_up_capital.previous_year.value,
            note: ec.paid_up_capital.financial_note_reference.clone(),
            component_path: "equity_components.paid_up_capital".into(),
        }],
        Section::CommonShares => {
            let cs = &ec.common_shares;
            vec![
                RowSpec {
                    label: BilingualText::new("عدد الأسهم العادية", "Number of Common Shares"),
                    current: cs.current_year.number_of_shares,
                    previous: cs.previous_year.number_of_shares,
                    note: cs.financial_note_reference.clone(),
                    component_path: "equity_components.common_shares.number".into(),
                },
                RowSpec {
                    label: BilingualText::new("القيمة الاسمية للسهم", "Par Value per Share"),
                    current: cs.current_year.par_value,
                    previous: cs.previous_year.par_value,
                    note: cs.financial_note_reference.clone(),
                    component_path: "equity_components.common_shares.par_value".into(),
                },
                RowSpec {
                    label: BilingualText::new("قيمة الأسهم العادية", "Value of Common Shares"),
                    current: cs.current_year.value,
                    previous: cs.previous_year.value,
                    note: cs.financial_note_reference.clone(),
                    component_path: "equity_components.common_shares".into(),
                },
            ]
        }
        Section::Reserves => {
            let r = &ec.reserves;
            let mut specs: Vec<RowSpec> = r
                .breakdown
                .iter()
                .map(|reserve| RowSpec {
                    label: BilingualText::new(&reserve.type_arabic, &reserve.type_english),
                    current: reserve.current_year,
                    previous: reserve.previous_year,
                    note: r.financial_note_reference.clone(),
                    component_path: format!("equity_components.reserves.{}", reserve.kind),
                })
                .collect();
            specs.push(RowSpec {
                label: BilingualText::new("إجمالي الاحتياطيات", "Total Reserves"),
                current: r.total_current_year,
                previous: r.total_previous_year,
                note: r.financial_note_reference.clone(),
                component_path: "equity_components.reserves.total".into(),
            });
            specs
        }
        Section::RetainedEarnings => {
            let re = &ec.retained_earnings;
            vec![RowSpec {
                label: BilingualText::new("الأرباح (الخسائر) المبقاة", "Retained Earnings (Losses)"),
                current: re.current_year.value,
                previous: re.previous_year.value,
                note: re.financial_note_reference.clone(),
                component_path: "equity_components.retained_earnings".into(),
            }]
        }
        Section::TotalEquity => {
            let te = &ec.total_equity;
            vec![RowSpec {
                label: BilingualText::new("إجمالي حقوق الملكية", "Total Equity"),
                current: te.current_year.total,
                previous: te.previous_year.total,
                note: None,
                component_path: "equity_components.total_equity".into(),
            }]
        }
    };
    specs.into_iter().map(|s| finish(editor, s)).collect()
}

// ---------------------------------------------------------------------------
// Supporting blocks
// ---------------------------------------------------------------------------

/// Increases first, then decreases, each in document order.
pub fn capital_changes(doc: &EquityDocument) -> Vec<CapitalChangeLine> {
    let line = |direction: ChangeDirection, c: &CapitalChange| CapitalChangeLine {
        direction,
        date: c.date.clone(),
        amount: c.amount,
        description: BilingualText::new(&c.description, &c.description_english),
    };
    let changes = &doc.equity_components.capital_changes;
    changes
        .increases
        .iter()
        .map(|c| line(ChangeDirection::Increase, c))
        .chain(
            changes
                .decreases
                .iter()
                .map(|c| line(ChangeDirection::Decrease, c)),
        )
        .collect()
}

/// The five movement lines of retained earnings, in reconciliation order.
pub fn retained_movements(doc: &EquityDocument) -> Vec<(BilingualText, Option<Decimal>)> {
    let m = &doc.equity_components.retained_earnings.movements;
    vec![
        (BilingualText::new("الرصيد الافتتاحي", "Opening Balance"), m.opening_balance),
        (BilingualText::new("صافي الدخل (الخسارة)", "Net Income (Loss)"), m.net_income),
        (BilingualText::new("أرباح موزعة", "Dividends Declared"), m.dividends_declared),
        (BilingualText::new("تسويات أخرى", "Other Adjustments"), m.other_adjustments),
        (BilingualText::new("الرصيد الختامي", "Closing Balance"), m.closing_balance),
    ]
}

/// Bilingual metadata block: company, period, currency, audit status, statement type.
pub fn metadata_lines(meta: &Metadata) -> Vec<(BilingualText, BilingualText)> {
    let audit = if meta.is_audited() {
        BilingualText::new("مراجَع", &meta.audit_status)
    } else {
        BilingualText::new("غير مراجَع", &meta.audit_status)
    };
    let kind = if meta.is_consolidated() {
        BilingualText::new("موحد", &meta.financial_statement_type)
    } else {
        BilingualText::new("منفصل", &meta.financial_statement_type)
    };
    vec![
        (
            BilingualText::new("الشركة", "Company"),
            BilingualText::new(&meta.company_name_arabic, &meta.company_name),
        ),
        (
            BilingualText::new("تاريخ التقرير", "Report Date"),
            BilingualText::new(&meta.report_date, &meta.reporting_period),
        ),
        (
            BilingualText::new("العملة", "Currency"),
            BilingualText::new(
                format!("{} (القيم الفعلية)", meta.currency),
                format!("{} ({})", meta.currency, meta.currency_unit),
            ),
        ),
        (BilingualText::new("حالة المراجعة", "Audit Status"), audit),
        (BilingualText::new("نوع القوائم", "Statement Type"), kind),
    ]
}

/// Notes as bilingual (title, content) pairs keyed by note number.
pub fn notes(doc: &EquityDocument) -> Vec<(&FinancialNote, BilingualText, BilingualText)> {
    doc.financial_notes
        .iter()
        .map(|n| {
            (
                n,
                BilingualText::new(&n.title, &n.title_english),
                BilingualText::new(&n.content, &n.content_english),
            )
        })
        .collect()
}
