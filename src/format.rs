use crate::data::pricing::parse_cost;

/// Text shown for money cells that hold no number.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a value as Brazilian reais: `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = format!("{:.2}", value.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    // -0.001 rounds to "0.00"; don't print it as negative
    let sign = if value < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

/// Display form of an optional amount.
pub fn display_amount(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format_brl)
}

/// Display form of a raw money cell, e.g. the cost column.
pub fn display_money(raw: &str) -> String {
    display_amount(parse_cost(raw))
}
