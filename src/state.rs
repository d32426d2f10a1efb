use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::data::loader::{self, LoadError};
use crate::data::model::Table;
use crate::data::pricing::{price_rows, Margin, PricedRow};
use crate::export;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `no file → loading → loaded | error`, and `reset` returns to `no file`.
pub struct AppState {
    /// Loaded table (None until a file parses successfully).
    pub table: Option<Table>,

    /// Name of the selected file, shown in the file area.
    pub file_name: Option<String>,

    /// Current profit margin.
    pub margin: Margin,

    /// Error message shown in the control panel.
    pub error: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,

    /// Result channel of the background parse, while `loading`.
    pending: Option<Receiver<LoadResult>>,
}

type LoadResult = Result<Table, LoadError>;

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            file_name: None,
            margin: Margin::default(),
            error: None,
            loading: false,
            pending: None,
        }
    }
}

impl AppState {
    /// Start loading a file from disk, replacing whatever was loaded before.
    ///
    /// Parsing runs on a worker thread; [`AppState::poll_load`] picks up the
    /// result.
    pub fn open_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let path: PathBuf = path.to_path_buf();
        self.begin_load(name, move || loader::load_file(&path));
    }

    /// Start loading in-memory file content (a drop without a filesystem path).
    pub fn open_bytes(&mut self, name: &str, bytes: &[u8]) {
        let bytes = bytes.to_vec();
        self.begin_load(name.to_string(), move || loader::load_bytes(&bytes));
    }

    fn begin_load<F>(&mut self, name: String, parse: F)
    where
        F: FnOnce() -> LoadResult + Send + 'static,
    {
        self.reset();
        self.file_name = Some(name);
        self.loading = true;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver is gone if the user reset meanwhile
            let _ = tx.send(parse());
        });
        self.pending = Some(rx);
    }

    /// Apply the background parse result once it is ready.
    ///
    /// Returns `true` on the call that finished the load.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.finish_load(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                log::error!("CSV loader thread exited without a result");
                self.pending = None;
                self.loading = false;
                self.error = Some("Erro ao processar o arquivo: leitura interrompida".into());
                true
            }
        }
    }

    fn finish_load(&mut self, result: LoadResult) {
        match result {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?} (cost column: {:?})",
                    table.len(),
                    table.headers,
                    table.cost_column_name()
                );
                self.table = Some(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    /// Drop the loaded table, file name and error. The margin is kept.
    pub fn reset(&mut self) {
        self.table = None;
        self.file_name = None;
        self.error = None;
        self.loading = false;
        self.pending = None;
    }

    /// Apply a margin from user input; out-of-range values are ignored.
    pub fn set_margin(&mut self, percent: f64) -> bool {
        match Margin::new(percent) {
            Some(margin) => {
                self.margin = margin;
                true
            }
            None => {
                log::debug!("Ignoring margin {percent}");
                false
            }
        }
    }

    /// Every row priced under the current margin; empty without a cost column.
    pub fn priced_rows(&self) -> Vec<PricedRow<'_>> {
        self.table
            .as_ref()
            .map(|t| price_rows(t, self.margin))
            .unwrap_or_default()
    }

    pub fn has_cost_column(&self) -> bool {
        self.table
            .as_ref()
            .is_some_and(|t| t.cost_column().is_some())
    }

    /// Export needs a cost column and at least one row.
    pub fn can_export(&self) -> bool {
        self.table
            .as_ref()
            .is_some_and(|t| t.cost_column().is_some() && !t.is_empty())
    }

    /// Write the priced table to `path`, surfacing failures in `error`.
    pub fn export_to(&mut self, path: &Path) {
        let Some(table) = &self.table else {
            return;
        };
        match export::save_workbook(path, table, self.margin) {
            Ok(()) => self.error = None,
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                self.error = Some(format!("Erro ao exportar: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    const SAMPLE: &[u8] = b"nome,custo\nCaneta,2,50\nCaderno,10\n";

    fn wait_for_load(state: &mut AppState) {
        let rx = state.pending.take().expect("no load in flight");
        let result = rx.recv().unwrap();
        state.finish_load(result);
    }

    #[test]
    fn test_load_is_pending_until_polled() {
        let mut state = AppState::default();
        state.open_bytes("produtos.csv", SAMPLE);

        assert!(state.loading);
        assert!(state.table.is_none());
        assert_eq!(state.file_name.as_deref(), Some("produtos.csv"));

        let deadline = Instant::now() + Duration::from_secs(5);
        while !state.poll_load() {
            assert!(Instant::now() < deadline, "load never finished");
            std::thread::sleep(Duration::from_millis(5));
        }

        assert!(!state.loading);
        assert_eq!(state.table.as_ref().map(|t| t.len()), Some(2));
        assert!(!state.poll_load());
    }

    #[test]
    fn test_reset_while_loading_discards_result() {
        let mut state = AppState::default();
        state.open_bytes("produtos.csv", SAMPLE);
        state.reset();

        assert!(!state.loading);
        std::thread::sleep(Duration::from_millis(20));
        assert!(!state.poll_load());
        assert!(state.table.is_none());
        assert!(state.file_name.is_none());
    }

    #[test]
    fn test_open_bytes_end_to_end() {
        let mut state = AppState::default();
        state.open_bytes("produtos.csv", SAMPLE);
        wait_for_load(&mut state);
        assert!(state.set_margin(20.0));

        let priced = state.priced_rows();
        assert_eq!(priced.len(), 2);
        assert_eq!(priced[0].row.get(0), "Caneta");
        assert!((priced[0].sale_price.unwrap() - 3.125).abs() < 1e-9);
        assert!((priced[1].sale_price.unwrap() - 12.5).abs() < 1e-9);
        assert!(state.can_export());
        assert!(!state.loading);
        assert_eq!(state.file_name.as_deref(), Some("produtos.csv"));
    }

    #[test]
    fn test_margin_change_recomputes() {
        let mut state = AppState::default();
        state.open_bytes("p.csv", SAMPLE);
        wait_for_load(&mut state);

        let at_default = state.priced_rows()[1].sale_price.unwrap();
        state.set_margin(50.0);
        let at_fifty = state.priced_rows()[1].sale_price.unwrap();

        assert!((at_default - 10.0 / 0.7).abs() < 1e-9);
        assert!((at_fifty - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_margin_is_ignored() {
        let mut state = AppState::default();
        assert!(!state.set_margin(100.0));
        assert!(!state.set_margin(-1.0));
        assert!(!state.set_margin(f64::NAN));
        assert_eq!(state.margin.percent(), 30.0);
    }

    #[test]
    fn test_empty_file_sets_error_and_no_table() {
        let mut state = AppState::default();
        state.open_bytes("ok.csv", SAMPLE);
        wait_for_load(&mut state);
        state.open_bytes("vazio.csv", b"");
        wait_for_load(&mut state);

        assert!(state.table.is_none());
        assert!(state.error.as_deref().unwrap().contains("cabeçalho"));
        assert!(state.priced_rows().is_empty());
        assert!(!state.can_export());
    }

    #[test]
    fn test_missing_cost_column_is_inert() {
        let mut state = AppState::default();
        state.open_bytes("p.csv", b"nome,preco\nCaneta,3\n");
        wait_for_load(&mut state);

        assert!(state.table.is_some());
        assert!(state.error.is_none());
        assert!(!state.has_cost_column());
        assert!(state.priced_rows().is_empty());
        assert!(!state.can_export());
    }

    #[test]
    fn test_reset_clears_everything_but_margin() {
        let mut state = AppState::default();
        state.set_margin(45.0);
        state.open_bytes("p.csv", SAMPLE);
        wait_for_load(&mut state);
        state.error = Some("stale".into());

        state.reset();

        assert!(state.table.is_none());
        assert!(state.file_name.is_none());
        assert!(state.error.is_none());
        assert_eq!(state.margin.percent(), 45.0);
    }

    #[test]
    fn test_new_file_clears_previous_error() {
        let mut state = AppState::default();
        state.open_bytes("vazio.csv", b"");
        wait_for_load(&mut state);
        assert!(state.error.is_some());

        state.open_bytes("ok.csv", SAMPLE);
        assert!(state.error.is_none());
        wait_for_load(&mut state);
        assert!(state.error.is_none());
        assert!(state.table.is_some());
    }

    #[test]
    fn test_open_path_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("produtos.csv");
        std::fs::File::create(&input)
            .unwrap()
            .write_all(SAMPLE)
            .unwrap();

        let mut state = AppState::default();
        state.open_path(&input);
        wait_for_load(&mut state);
        assert_eq!(state.file_name.as_deref(), Some("produtos.csv"));

        let output = dir.path().join(export::export_file_name(state.margin));
        state.export_to(&output);
        assert!(state.error.is_none());
        assert!(output.exists());
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.open_bytes("p.csv", SAMPLE);
        wait_for_load(&mut state);

        state.export_to(&dir.path().join("missing").join("out.xlsx"));
        assert!(state.error.as_deref().unwrap().starts_with("Erro ao exportar"));
    }
}
