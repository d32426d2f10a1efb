use std::fmt;

use super::model::{Row, Table};

/// Header token identifying the unit-cost column (matched case-insensitively).
pub const COST_COLUMN: &str = "custo";

/// Name of the derived column appended to the table.
pub const SALE_PRICE_COLUMN: &str = "Preço Venda";

pub const DEFAULT_MARGIN: f64 = 30.0;

/// Upper bound offered by the margin controls. 100 itself divides by zero.
pub const MARGIN_INPUT_MAX: f64 = 99.9;

pub const MARGIN_STEP: f64 = 0.1;

// ---------------------------------------------------------------------------
// Margin – profit share of the sale price, in percent
// ---------------------------------------------------------------------------

/// Profit margin percentage, always in `[0, 100)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Margin(f64);

impl Margin {
    /// Validate user input. Values are snapped to the 0.1 input step.
    pub fn new(percent: f64) -> Option<Self> {
        if !percent.is_finite() || !(0.0..100.0).contains(&percent) {
            return None;
        }
        let snapped = (percent * 10.0).round() / 10.0;
        // 99.95..100 would snap onto the excluded bound
        if snapped >= 100.0 {
            return Some(Margin(MARGIN_INPUT_MAX));
        }
        Some(Margin(snapped))
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl Default for Margin {
    fn default() -> Self {
        Margin(DEFAULT_MARGIN)
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64's Display is the shortest round-trip form: 30 -> "30", 25.5 -> "25.5"
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Price calculation
// ---------------------------------------------------------------------------

/// Parse a raw cost cell. The first comma is read as a decimal separator.
///
/// Returns `None` for anything that is not a finite number; that is a
/// per-row data-quality outcome, not an error. The whole cell must be a
/// number: unlike a prefix parse, `12abc` and `10 un` are not costs.
pub fn parse_cost(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replacen(',', ".", 1);
    let value: f64 = normalized.parse().ok()?;
    value.is_finite().then_some(value)
}

/// `cost / (1 - margin/100)`, or `None` when the margin reaches 100 or the
/// result is not finite.
pub fn sale_price(cost: f64, margin_percent: f64) -> Option<f64> {
    if !margin_percent.is_finite() || margin_percent >= 100.0 {
        return None;
    }
    let price = cost / (1.0 - margin_percent / 100.0);
    price.is_finite().then_some(price)
}

/// Sale price straight from the raw cost cell.
pub fn price_for(raw_cost: &str, margin: Margin) -> Option<f64> {
    parse_cost(raw_cost).and_then(|cost| sale_price(cost, margin.percent()))
}

/// Locate the cost column: exact, case-insensitive match on [`COST_COLUMN`].
pub fn find_cost_column(headers: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.to_lowercase() == COST_COLUMN)
}

// ---------------------------------------------------------------------------
// Augmented rows
// ---------------------------------------------------------------------------

/// A source row paired with its derived sale price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedRow<'a> {
    pub row: &'a Row,
    pub sale_price: Option<f64>,
}

/// Price every row of the table under `margin`.
///
/// Recomputed from scratch on each call. Empty when the table has no cost
/// column, which keeps the calculator inert for such files.
pub fn price_rows(table: &Table, margin: Margin) -> Vec<PricedRow<'_>> {
    let Some(cost_idx) = table.cost_column() else {
        return Vec::new();
    };

    table
        .rows
        .iter()
        .map(|row| PricedRow {
            row,
            sale_price: price_for(row.get(cost_idx), margin),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| Row::new(r.iter().map(|c| c.to_string()).collect()))
                .collect(),
        )
    }

    #[test]
    fn test_sale_price_formula() {
        assert!(close(sale_price(10.0, 20.0).unwrap(), 12.5));
        assert!(close(sale_price(2.5, 20.0).unwrap(), 3.125));
        assert!(close(sale_price(70.0, 30.0).unwrap(), 100.0));
    }

    #[test]
    fn test_zero_margin_keeps_cost() {
        assert_eq!(sale_price(42.17, 0.0), Some(42.17));
    }

    #[test]
    fn test_price_grows_with_margin() {
        let mut previous = sale_price(10.0, 0.0).unwrap();
        for step in 1..1000 {
            let margin = step as f64 * 0.1;
            let price = sale_price(10.0, margin).unwrap();
            assert!(price > previous, "margin {margin}: {price} <= {previous}");
            previous = price;
        }
    }

    #[test]
    fn test_margin_at_or_above_hundred_has_no_price() {
        assert_eq!(sale_price(10.0, 100.0), None);
        assert_eq!(sale_price(10.0, 150.0), None);
        assert_eq!(sale_price(10.0, f64::NAN), None);
    }

    #[test]
    fn test_comma_and_period_decimals_agree() {
        assert_eq!(parse_cost("12,50"), Some(12.5));
        assert_eq!(parse_cost("12.50"), Some(12.5));
        let margin = Margin::new(35.0).unwrap();
        assert_eq!(price_for("12,50", margin), price_for("12.50", margin));
    }

    #[test]
    fn test_non_numeric_cost() {
        assert_eq!(parse_cost("abc"), None);
        assert_eq!(parse_cost(""), None);
        assert_eq!(parse_cost("inf"), None);
        assert_eq!(parse_cost("NaN"), None);
        assert_eq!(price_for("abc", Margin::default()), None);
    }

    #[test]
    fn test_trailing_text_is_not_a_cost() {
        assert_eq!(parse_cost("12abc"), None);
        assert_eq!(parse_cost("10 un"), None);
        assert_eq!(parse_cost("R$ 5,00"), None);
    }

    #[test]
    fn test_parse_cost_trims_whitespace() {
        assert_eq!(parse_cost("  7,25 "), Some(7.25));
        assert_eq!(parse_cost("-3"), Some(-3.0));
    }

    #[test]
    fn test_margin_validation() {
        assert!(Margin::new(-0.1).is_none());
        assert!(Margin::new(100.0).is_none());
        assert!(Margin::new(f64::INFINITY).is_none());
        assert_eq!(Margin::new(0.0).unwrap().percent(), 0.0);
        assert_eq!(Margin::new(99.9).unwrap().percent(), 99.9);
        assert_eq!(Margin::new(99.97).unwrap().percent(), 99.9);
        assert_eq!(Margin::new(33.33).unwrap().percent(), 33.3);
        assert_eq!(Margin::default().percent(), 30.0);
    }

    #[test]
    fn test_margin_display() {
        assert_eq!(Margin::new(30.0).unwrap().to_string(), "30");
        assert_eq!(Margin::new(25.5).unwrap().to_string(), "25.5");
    }

    #[test]
    fn test_cost_column_lookup_is_case_insensitive() {
        for header in ["custo", "Custo", "CUSTO"] {
            let headers = vec!["nome".to_string(), header.to_string()];
            assert_eq!(find_cost_column(&headers), Some(1));
        }
        let headers = vec!["custo unitário".to_string(), " custo".to_string()];
        assert_eq!(find_cost_column(&headers), None);
    }

    #[test]
    fn test_price_rows() {
        let t = table(
            &["nome", "Custo"],
            &[&["Caneta", "2,50"], &["Caderno", "10"], &["Brinde", "abc"]],
        );
        let priced = price_rows(&t, Margin::new(20.0).unwrap());

        assert_eq!(priced.len(), 3);
        assert!(close(priced[0].sale_price.unwrap(), 3.125));
        assert!(close(priced[1].sale_price.unwrap(), 12.5));
        assert_eq!(priced[2].sale_price, None);
        assert_eq!(priced[2].row.get(0), "Brinde");
    }

    #[test]
    fn test_price_rows_without_cost_column_is_inert() {
        let t = table(&["nome", "preco"], &[&["Caneta", "2"]]);
        assert!(price_rows(&t, Margin::default()).is_empty());
    }
}
