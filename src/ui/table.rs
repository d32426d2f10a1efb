use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Table;
use crate::data::pricing::{PricedRow, COST_COLUMN, SALE_PRICE_COLUMN};
use crate::format::{display_amount, display_money};
use crate::state::AppState;
use crate::theme::Theme;

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Data grid (central panel)
// ---------------------------------------------------------------------------

/// Render the augmented table, or a placeholder when nothing is loaded.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let theme = Theme::for_mode(ui.visuals().dark_mode);

    let Some(table) = &state.table else {
        placeholder(
            ui,
            &theme,
            "Aguardando seu arquivo CSV",
            &format!(
                "Importe um arquivo para começar a calcular os preços de venda. \
                 O app tentará encontrar uma coluna \"{COST_COLUMN}\" para os cálculos."
            ),
        );
        return;
    };

    if !state.has_cost_column() {
        placeholder(
            ui,
            &theme,
            "Aguardando uma coluna de custo",
            &format!(
                "Nenhuma coluna \"{COST_COLUMN}\" foi encontrada no cabeçalho ({}).",
                table.headers.join(", ")
            ),
        );
        return;
    }

    if table.is_empty() {
        placeholder(ui, &theme, "Nenhuma linha encontrada", "O arquivo contém apenas o cabeçalho.");
        return;
    }

    let priced = state.priced_rows();
    ui.label(
        RichText::new(format!(
            "{} linhas · margem de {}%",
            priced.len(),
            state.margin
        ))
        .color(theme.muted),
    );
    ui.add_space(4.0);

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        grid(ui, table, &priced, &theme);
    });
}

fn grid(ui: &mut Ui, table: &Table, priced: &[PricedRow<'_>], theme: &Theme) {
    let cost_col = table.cost_column();
    let n_cols = table.headers.len() + 1;

    TableBuilder::new(ui)
        .id_salt("priced_table")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(80.0).clip(true), n_cols)
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in &table.headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(name.to_uppercase());
                });
            }
            header.col(|ui: &mut Ui| {
                ui.strong(SALE_PRICE_COLUMN.to_uppercase());
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, priced.len(), |mut row| {
                let priced_row = &priced[row.index()];
                for (idx, raw) in priced_row.row.cells().iter().enumerate() {
                    row.col(|ui: &mut Ui| {
                        if Some(idx) == cost_col {
                            ui.label(RichText::new(display_money(raw)).strong());
                        } else {
                            ui.label(raw.as_str());
                        }
                    });
                }
                row.col(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(display_amount(priced_row.sale_price))
                            .strong()
                            .color(theme.positive),
                    );
                });
            });
        });
}

fn placeholder(ui: &mut Ui, theme: &Theme, title: &str, hint: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.label(RichText::new("📄").size(48.0).color(theme.muted));
        ui.add_space(8.0);
        ui.heading(title);
        ui.add_space(4.0);
        ui.label(RichText::new(hint).color(theme.muted));
    });
}
