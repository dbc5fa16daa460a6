use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EquityError;
use crate::EquityResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

// ---------------------------------------------------------------------------
// Lenient leaves
// ---------------------------------------------------------------------------

/// Field readers for documents produced by the extraction endpoint or changed
/// by unchecked edits. A leaf of the wrong type reads as absent or as its text
/// instead of rejecting the whole document.
mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::value::{json_number_to_decimal, FieldKind, FieldValue};

    /// Numbers and numeric strings; anything else is `None`.
    pub fn money<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => json_number_to_decimal(&n),
            Value::String(s) => FieldValue::parse_input(&s, FieldKind::Number)
                .ok()
                .and_then(|v| v.as_decimal()),
            _ => None,
        })
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    /// `null` reads as the empty string.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_text(d)?.unwrap_or_default())
    }

    /// `null` reads as the default (empty list, empty block).
    pub fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Company identity and reporting context. Read-only during a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "lenient::text")]
    pub company_name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub company_name_arabic: String,
    #[serde(deserialize_with = "lenient::text")]
    pub report_date: String,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: String,
    #[serde(deserialize_with = "lenient::text")]
    pub currency_unit: String,
    #[serde(deserialize_with = "lenient::text")]
    pub reporting_period: String,
    #[serde(deserialize_with = "lenient::text")]
    pub financial_statement_type: String,
    #[serde(deserialize_with = "lenient::text")]
    pub audit_status: String,
}

impl Metadata {
    pub fn is_audited(&self) -> bool {
        self.audit_status == "audited"
    }

    pub fn is_consolidated(&self) -> bool {
        self.financial_statement_type == "consolidated"
    }
}

// ---------------------------------------------------------------------------
// Capital and shares
// ---------------------------------------------------------------------------

/// A dated amount for one comparison period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearValue {
    #[serde(deserialize_with = "lenient::money")]
    pub value: Option<Money>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaidUpCapital {
    #[serde(deserialize_with = "lenient::or_default")]
    pub current_year: YearValue,
    #[serde(deserialize_with = "lenient::or_default")]
    pub previous_year: YearValue,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub financial_note_reference: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub distribution_among_shareholders: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareYear {
    #[serde(deserialize_with = "lenient::money")]
    pub value: Option<Money>,
    #[serde(deserialize_with = "lenient::money")]
    pub number_of_shares: Option<Decimal>,
    #[serde(deserialize_with = "lenient::money")]
    pub par_value: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonShares {
    #[serde(deserialize_with = "lenient::or_default")]
    pub current_year: ShareYear,
    #[serde(deserialize_with = "lenient::or_default")]
    pub previous_year: ShareYear,
    #[serde(deserialize_with = "lenient::or_default")]
    pub shareholders: Vec<Value>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub financial_note_reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferredShareTerms {
    #[serde(deserialize_with = "lenient::money")]
    pub dividend_rate: Option<Decimal>,
    pub cumulative: Option<bool>,
    pub convertible: Option<bool>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub redemption_terms: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub redemption_terms_english: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferredShares {
    #[serde(deserialize_with = "lenient::or_default")]
    pub current_year: ShareYear,
    #[serde(deserialize_with = "lenient::or_default")]
    pub previous_year: ShareYear,
    #[serde(deserialize_with = "lenient::or_default")]
    pub terms: PreferredShareTerms,
}

/// One dated increase or decrease of share capital.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalChange {
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(deserialize_with = "lenient::money")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::opt_text")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::opt_text")]
    pub reason: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description_english: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalChanges {
    #[serde(deserialize_with = "lenient::or_default")]
    pub increases: Vec<CapitalChange>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub decreases: Vec<CapitalChange>,
}

// ---------------------------------------------------------------------------
// Reserves and retained earnings
// ---------------------------------------------------------------------------

/// One line of the reserves breakdown (statutory, general, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reserve {
    #[serde(rename = "type")]
    #[serde(deserialize_with = "lenient::text")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::text")]
    pub type_arabic: String,
    #[serde(deserialize_with = "lenient::text")]
    pub type_english: String,
    #[serde(deserialize_with = "lenient::money")]
    pub current_year: Option<Money>,
    #[serde(deserialize_with = "lenient::money")]
    pub previous_year: Option<Money>,
    #[serde(deserialize_with = "lenient::money")]
    pub movement: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reserves {
    #[serde(deserialize_with = "lenient::money")]
    pub total_current_year: Option<Money>,
    #[serde(deserialize_with = "lenient::money")]
    pub total_previous_year: Option<Money>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub breakdown: Vec<Reserve>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub financial_note_reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetainedYear {
    #[serde(deserialize_with = "lenient::money")]
    pub value: Option<Money>,
    pub is_loss: Option<bool>,
}

/// Five-step reconciliation of retained earnings over the year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetainedMovements {
    #[serde(deserialize_with = "lenient::money")]
    pub opening_balance: Option<Money>,
    #[serde(deserialize_with = "lenient::money")]
    pub net_income: Option<Money>,
    #[serde(deserialize_with = "lenient::money")]
    pub dividends_declared: Option<Money>,
    #[serde(deserialize_with = "lenient::money")]
    pub other_adjustments: Option<Money>,
    #[serde(deserialize_with = "lenient::money")]
    pub closing_balance: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetainedEarnings {
    #[serde(deserialize_with = "lenient::or_default")]
    pub current_year: RetainedYear,
    #[serde(deserialize_with = "lenient::or_default")]
    pub previous_year: RetainedYear,
    #[serde(deserialize_with = "lenient::or_default")]
    pub movements: RetainedMovements,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub financial_note_reference: Option<String>,
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotalEquityYear {
    #[serde(deserialize_with = "lenient::money")]
    pub total: Option<Money>,
    #[serde(deserialize_with = "lenient::money")]
    pub excluding_minority: Option<Money>,
    #[serde(deserialize_with = "lenient::money")]
    pub including_minority: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotalEquity {
    #[serde(deserialize_with = "lenient::or_default")]
    pub current_year: TotalEquityYear,
    #[serde(deserialize_with = "lenient::or_default")]
    pub previous_year: TotalEquityYear,
}

/// The financial body of the statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityComponents {
    #[serde(deserialize_with = "lenient::or_default")]
    pub paid_up_capital: PaidUpCapital,
    #[serde(deserialize_with = "lenient::or_default")]
    pub common_shares: CommonShares,
    #[serde(deserialize_with = "lenient::or_default")]
    pub preferred_shares: PreferredShares,
    pub additional_paid_up_capital: Value,
    #[serde(deserialize_with = "lenient::or_default")]
    pub capital_changes: CapitalChanges,
    pub branches_current_account: Value,
    #[serde(deserialize_with = "lenient::or_default")]
    pub reserves: Reserves,
    pub treasury_stocks: Value,
    #[serde(deserialize_with = "lenient::or_default")]
    pub retained_earnings: RetainedEarnings,
    pub dividends_to_distribute: Value,
    pub minority_interests: Value,
    #[serde(deserialize_with = "lenient::or_default")]
    pub total_equity: TotalEquity,
}

/// Numbered bilingual explanatory note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialNote {
    #[serde(deserialize_with = "lenient::text")]
    pub note_number: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title_english: String,
    #[serde(deserialize_with = "lenient::text")]
    pub content: String,
    #[serde(deserialize_with = "lenient::text")]
    pub content_english: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub related_items: Vec<String>,
}

/// Typed view of one company's statement of changes in equity.
///
/// The live, editable document is kept as a [`serde_json::Value`] by the
/// editor; this struct is the shape check applied when a document enters the
/// system and the input to rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityDocument {
    pub metadata: Metadata,
    pub equity_components: EquityComponents,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub shareholder_structure: Vec<Value>,
    #[serde(default)]
    pub valuation_metrics: Value,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub financial_notes: Vec<FinancialNote>,
    #[serde(default)]
    pub formulas_applied: Value,
    #[serde(default)]
    pub data_quality: Value,
}

impl EquityDocument {
    /// Validate a dynamic document against the equity schema.
    pub fn from_value(value: &Value) -> EquityResult<Self> {
        if !value.is_object() {
            return Err(EquityError::Schema("document root must be an object".into()));
        }
        serde_json::from_value(value.clone()).map_err(|e| EquityError::Schema(e.to_string()))
    }

    /// Find the note a component cross-references.
    pub fn note_for(&self, reference: &str) -> Option<&FinancialNote> {
        let reference = reference.trim();
        self.financial_notes
            .iter()
            .find(|n| n.note_number.trim() == reference)
    }
}
