use std::time::Duration;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MarginCalcApp {
    pub state: AppState,
}

impl MarginCalcApp {
    /// Load the first file dropped onto the window this frame, if any.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };

        if let Some(path) = &file.path {
            log::info!("File dropped: {}", path.display());
            self.state.open_path(path);
        } else if let Some(bytes) = &file.bytes {
            log::info!("File dropped: {} ({} bytes)", file.name, bytes.len());
            self.state.open_bytes(&file.name, bytes);
        } else {
            log::warn!("Dropped file {:?} has neither a path nor content", file.name);
        }
    }
}

impl eframe::App for MarginCalcApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        self.state.poll_load();
        if self.state.loading {
            // Keep polling the loader thread while the spinner shows
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        // ---- Top panel: title + menu ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: file, margin, export ----
        egui::SidePanel::left("control_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: priced table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::data_table(ui, &self.state);
        });
    }
}
