use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{EquityDocument, Money};

/// Outcome of checking the retained-earnings movement schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reconciliation {
    /// opening + net income − dividends + other adjustments == closing
    Balanced {
        #[serde(with = "rust_decimal::serde::float")]
        closing_balance: Money,
    },
    Gap {
        #[serde(with = "rust_decimal::serde::float")]
        expected_closing: Money,
        #[serde(with = "rust_decimal::serde::float")]
        reported_closing: Money,
        /// reported − expected
        #[serde(with = "rust_decimal::serde::float")]
        difference: Money,
    },
    /// At least one of the five figures is absent.
    InsufficientData { missing: Vec<String> },
}

impl Reconciliation {
    pub fn is_balanced(&self) -> bool {
        matches!(self, Reconciliation::Balanced { .. })
    }

    /// Human-readable warning, `None` when balanced.
    pub fn warning(&self) -> Option<String> {
        match self {
            Reconciliation::Balanced { .. } => None,
            Reconciliation::Gap {
                expected_closing,
                reported_closing,
                difference,
            } => Some(format!(
                "Retained earnings movements do not reconcile: expected closing {expected_closing}, \
                 reported {reported_closing} (difference {difference})"
            )),
            Reconciliation::InsufficientData { missing } => Some(format!(
                "Retained earnings movements incomplete, missing: {}",
                missing.join(", ")
            )),
        }
    }
}

/// Check the movement schedule. Reported only; the document is never changed.
pub fn check_retained_earnings(doc: &EquityDocument) -> Reconciliation {
    let m = &doc.equity_components.retained_earnings.movements;
    let fields: [(&str, Option<Decimal>); 5] = [
        ("opening_balance", m.opening_balance),
        ("net_income", m.net_income),
        ("dividends_declared", m.dividends_declared),
        ("other_adjustments", m.other_adjustments),
        ("closing_balance", m.closing_balance),
    ];
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| name.to_string())
        .collect();

    let (Some(opening), Some(net_income), Some(dividends), Some(other), Some(closing)) = (
        m.opening_balance,
        m.net_income,
        m.dividends_declared,
        m.other_adjustments,
        m.closing_balance,
    ) else {
        return Reconciliation::InsufficientData { missing };
    };

    let expected = opening + net_income - dividends + other;
    if expected == closing {
        Reconciliation::Balanced {
            closing_balance: closing,
        }
    } else {
        let result = Reconciliation::Gap {
            expected_closing: expected,
            reported_closing: closing,
            difference: closing - expected,
        };
        if let Some(w) = result.warning() {
            log::warn!("{w}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_document;
    use rust_decimal_macros::dec;

    fn sample() -> EquityDocument {
        EquityDocument::from_value(&sample_document()).unwrap()
    }

    #[test]
    fn test_sample_has_small_gap() {
        // 6,735,136 − 31,470,394 − 0 − 5,000,000 = −29,735,258 vs reported −29,735,126
        match check_retained_earnings(&sample()) {
            Reconciliation::Gap {
                expected_closing,
                difference,
                ..
            } => {
                assert_eq!(expected_closing, dec!(-29735258));
                assert_eq!(difference, dec!(132));
            }
            other => panic!("expected a gap, got {other:?}"),
        }
    }

    #[test]
    fn test_balanced_schedule() {
        let mut doc = sample();
        doc.equity_components.retained_earnings.movements.closing_balance = Some(dec!(-29735258));
        assert!(check_retained_earnings(&doc).is_balanced());
        assert!(check_retained_earnings(&doc).warning().is_none());
    }

    #[test]
    fn test_missing_figure_is_not_zero_filled() {
        let mut doc = sample();
        doc.equity_components.retained_earnings.movements.dividends_declared = None;
        match check_retained_earnings(&doc) {
            Reconciliation::InsufficientData { missing } => {
                assert_eq!(missing, vec!["dividends_declared".to_string()]);
            }
            other => panic!("expected insufficient data, got {other:?}"),
        }
    }
}
