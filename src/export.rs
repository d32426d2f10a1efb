use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::data::model::Table;
use crate::data::pricing::{parse_cost, price_rows, Margin, SALE_PRICE_COLUMN};

/// Name of the single worksheet in the exported workbook.
pub const SHEET_NAME: &str = "Preços Calculados";

/// Excel number format applied to cost and sale price cells.
pub const CURRENCY_FORMAT: &str = "R$ #,##0.00";

/// Default file name offered in the save dialog.
pub fn export_file_name(margin: Margin) -> String {
    format!("precos_com_margem_{margin}%.xlsx")
}

/// Serialize the priced table as an XLSX workbook.
///
/// Layout: header row (original columns + [`SALE_PRICE_COLUMN`]), then one
/// row per table row. Parseable costs and all sale prices are written as
/// numbers in [`CURRENCY_FORMAT`]; a missing price leaves the cell blank.
pub fn build_workbook(table: &Table, margin: Margin) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .context("naming worksheet")?;

    let header_format = Format::new().set_bold();
    let money = Format::new().set_num_format(CURRENCY_FORMAT);

    let cost_col = table.cost_column();
    let price_col = u16::try_from(table.headers.len()).context("too many columns")?;

    for (col, name) in table.headers.iter().enumerate() {
        let col = u16::try_from(col).context("too many columns")?;
        worksheet
            .write_string_with_format(0, col, name, &header_format)
            .context("writing header")?;
    }
    worksheet
        .write_string_with_format(0, price_col, SALE_PRICE_COLUMN, &header_format)
        .context("writing header")?;

    for (i, priced) in price_rows(table, margin).iter().enumerate() {
        let row = u32::try_from(i + 1).context("too many rows")?;

        for (col, raw) in priced.row.cells().iter().enumerate() {
            let cost = (Some(col) == cost_col).then(|| parse_cost(raw)).flatten();
            let col = u16::try_from(col).context("too many columns")?;

            match cost {
                Some(value) => {
                    worksheet
                        .write_number_with_format(row, col, value, &money)
                        .with_context(|| format!("writing cost at row {row}"))?;
                }
                None if raw.is_empty() => {}
                None => {
                    worksheet
                        .write_string(row, col, raw)
                        .with_context(|| format!("writing cell at row {row}"))?;
                }
            }
        }

        if let Some(price) = priced.sale_price {
            worksheet
                .write_number_with_format(row, price_col, price, &money)
                .with_context(|| format!("writing sale price at row {row}"))?;
        }
    }

    workbook.save_to_buffer().context("encoding workbook")
}

/// Build the workbook and write it to `path`.
pub fn save_workbook(path: &Path, table: &Table, margin: Margin) -> Result<()> {
    let bytes = build_workbook(table, margin)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "Exported {} rows at {margin}% margin to {}",
        table.len(),
        path.display()
    );
    Ok(())
}
