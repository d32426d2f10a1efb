use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use thiserror::Error;

use super::model::{Row, Table};
use super::pricing::find_cost_column;

/// Why a file could not be turned into a [`Table`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Formato não suportado: .{0} (use um arquivo .csv)")]
    UnsupportedExtension(String),

    #[error("CSV inválido ou vazio. Verifique se o arquivo tem um cabeçalho.")]
    EmptyHeader,

    #[error("Erro ao processar o arquivo: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao processar o arquivo: {0}")]
    Decode(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a CSV file from disk. Only the `.csv` extension is accepted.
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if ext != "csv" {
        return Err(LoadError::UnsupportedExtension(ext));
    }

    let file = std::fs::File::open(path)?;
    parse_csv(file)
}

/// Parse CSV content already held in memory (e.g. a dropped file).
pub fn load_bytes(bytes: &[u8]) -> Result<Table, LoadError> {
    parse_csv(bytes)
}

/// CSV layout: first record is the header, every further record a row.
///
/// Blank lines are skipped and cells are decoded lossily, so a file saved
/// in a legacy code page still loads (with replacement characters).
/// Records wider than the header get [`repair_decimal_commas`] before any
/// surplus is dropped; narrower ones are padded by [`Table::new`].
pub fn parse_csv<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(decode_cell)
        .collect();

    if let Some(first) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::EmptyHeader);
    }

    let width = headers.len();
    let cost_idx = find_cost_column(&headers);
    let mut rows = Vec::new();
    let mut record = ByteRecord::new();

    while reader.read_byte_record(&mut record)? {
        let mut cells: Vec<String> = record.iter().map(decode_cell).collect();

        // Also drops separator-only lines such as `,`
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }

        if cells.len() > width {
            repair_decimal_commas(&mut cells, width, cost_idx);
            if cells.len() > width {
                let line = record.position().map_or(0, |p| p.line());
                log::warn!(
                    "CSV line {line}: {} fields for {width} columns, dropping the surplus",
                    cells.len()
                );
            }
        }

        rows.push(Row::new(cells));
    }

    log::debug!("Parsed {} rows with columns {:?}", rows.len(), headers);
    Ok(Table::new(headers, rows))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn decode_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Re-join decimals that an unquoted comma split in two.
///
/// `Caneta,2,50` under a two-column header reads as `["Caneta", "2", "50"]`.
/// While the record is wider than `width`, the pair starting at the cost
/// column is merged back into `"2,50"` when it looks like a split decimal.
/// Otherwise the first adjacent pair made of an integer part and a
/// digits-only fraction is merged.
pub fn repair_decimal_commas(cells: &mut Vec<String>, width: usize, cost_idx: Option<usize>) {
    while cells.len() > width {
        let view: &[String] = cells;
        let Some(i) = cost_idx
            .filter(|&i| is_split_decimal(view, i))
            .or_else(|| (0..view.len() - 1).find(|&i| is_split_decimal(view, i)))
        else {
            return;
        };
        let fraction = cells.remove(i + 1);
        cells[i] = format!("{},{}", cells[i], fraction);
    }
}

fn is_split_decimal(cells: &[String], i: usize) -> bool {
    i + 1 < cells.len() && is_integer_part(&cells[i]) && is_fraction_part(&cells[i + 1])
}

fn is_integer_part(s: &str) -> bool {
    let digits = s.trim().strip_prefix('-').unwrap_or(s.trim());
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_fraction_part(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
