use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder shown for an absent figure.
pub const DASH: &str = "-";

/// Group digits in threes and keep at most two fraction digits.
///
/// `None` renders as [`DASH`]; zero renders as `0`.
pub fn format_amount(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return DASH.to_string();
    };
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Render an optional reference (note number, description) with the dash
/// placeholder when blank.
pub fn or_dash(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DASH.to_string(),
    }
}
