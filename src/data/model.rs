use super::pricing::find_cost_column;

// ---------------------------------------------------------------------------
// Row – one record of the source CSV
// ---------------------------------------------------------------------------

/// One CSV record: raw cell text, one entry per header column, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Row { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Raw value at a column index (empty string past the end).
    pub fn get(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded file
// ---------------------------------------------------------------------------

/// A parsed CSV: ordered header plus rows aligned to it.
///
/// Every row carries exactly `headers.len()` cells; [`Table::new`] pads or
/// truncates to enforce that.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    /// Index of the `custo` column, resolved once on construction.
    cost_column: Option<usize>,
}

impl Table {
    /// Build a table, aligning every row to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells = row.cells;
                cells.resize(width, String::new());
                Row { cells }
            })
            .collect();
        let cost_column = find_cost_column(&headers);

        Table {
            headers,
            rows,
            cost_column,
        }
    }

    /// Index of the cost column, if the header has one.
    pub fn cost_column(&self) -> Option<usize> {
        self.cost_column
    }

    /// Header name of the cost column as written in the file.
    pub fn cost_column_name(&self) -> Option<&str> {
        self.cost_column.map(|idx| self.headers[idx].as_str())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        Row::new(cells.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_rows_are_aligned_to_header_width() {
        let table = Table::new(
            vec!["nome".into(), "custo".into(), "qtd".into()],
            vec![row(&["Caneta"]), row(&["Lápis", "1", "2", "extra"])],
        );

        assert_eq!(table.rows[0].cells(), &["Caneta", "", ""]);
        assert_eq!(table.rows[1].cells(), &["Lápis", "1", "2"]);
    }

    #[test]
    fn test_cost_column_resolved_on_construction() {
        let table = Table::new(vec!["Nome".into(), "CUSTO".into()], vec![]);
        assert_eq!(table.cost_column(), Some(1));
        assert_eq!(table.cost_column_name(), Some("CUSTO"));

        let table = Table::new(vec!["nome".into(), "preco".into()], vec![]);
        assert_eq!(table.cost_column(), None);
    }
}
