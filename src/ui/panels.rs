use eframe::egui::{self, RichText, Ui};

use crate::data::pricing::{MARGIN_INPUT_MAX, MARGIN_STEP};
use crate::export;
use crate::state::AppState;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title block and the File menu.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let theme = Theme::for_mode(ui.visuals().dark_mode);

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Abrir CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.can_export(), egui::Button::new("Exportar XLSX…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.file_name.is_some(), egui::Button::new("Limpar"))
                .clicked()
            {
                state.reset();
                ui.close_menu();
            }
        });
    });

    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("🖩").size(28.0).color(theme.accent));
        ui.vertical(|ui: &mut Ui| {
            ui.heading(RichText::new("Calculadora de Margem de Lucro").strong());
            ui.label(
                RichText::new("Importe um CSV, ajuste a margem e exporte os resultados.")
                    .color(theme.muted),
            );
        });
    });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Left side panel – file area, margin, export
// ---------------------------------------------------------------------------

/// Render the control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let theme = Theme::for_mode(ui.visuals().dark_mode);
    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());

    file_area(ui, state, &theme, hovering);

    if state.file_name.is_some() {
        ui.add_space(6.0);
        let clear = egui::Button::new(
            RichText::new("🗑 Limpar Arquivo").color(theme.danger),
        )
        .frame(false);
        if ui.add_sized([ui.available_width(), 20.0], clear).clicked() {
            state.reset();
        }
    }

    if let Some(err) = &state.error {
        ui.add_space(8.0);
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.0, theme.danger))
            .show(ui, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(err).color(theme.danger));
            });
    }

    if state.can_export() {
        ui.add_space(12.0);
        ui.separator();
        margin_control(ui, state);

        ui.add_space(12.0);
        let button = egui::Button::new(
            RichText::new("⬇ Exportar XLSX")
                .strong()
                .color(egui::Color32::WHITE),
        )
        .fill(theme.accent)
        .min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add(button).clicked() {
            save_file_dialog(state);
        }
    }
}

/// Click-to-pick area that also reflects drag-and-drop hover and loading.
fn file_area(ui: &mut Ui, state: &mut AppState, theme: &Theme, hovering: bool) {
    let stroke_color = if hovering {
        theme.accent
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };

    let response = egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(140.0);
            ui.vertical_centered(|ui: &mut Ui| {
                if state.loading {
                    ui.spinner();
                    ui.label("Processando...");
                } else if let Some(name) = &state.file_name {
                    ui.label(RichText::new("Arquivo selecionado:").strong().color(theme.accent));
                    ui.label(RichText::new(name).small());
                } else {
                    ui.label(RichText::new("⬆").size(28.0).color(theme.muted));
                    ui.label(RichText::new("Clique para enviar").strong());
                    ui.label(
                        RichText::new("ou arraste e solte um arquivo .CSV")
                            .small()
                            .color(theme.muted),
                    );
                }
            });
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    if response.clicked() {
        open_file_dialog(state);
    }
}

/// Linked slider and numeric field, range [0, 99.9] in steps of 0.1.
fn margin_control(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Margem de Lucro");
    ui.add_space(4.0);

    let mut value = state.margin.percent();
    ui.horizontal(|ui: &mut Ui| {
        let slider = ui.add(
            egui::Slider::new(&mut value, 0.0..=MARGIN_INPUT_MAX)
                .step_by(MARGIN_STEP)
                .show_value(false),
        );
        let field = ui.add(
            egui::DragValue::new(&mut value)
                .range(0.0..=MARGIN_INPUT_MAX)
                .speed(MARGIN_STEP)
                .fixed_decimals(1)
                .suffix(" %"),
        );

        if slider.changed() || field.changed() {
            state.set_margin(value);
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir arquivo CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Exportar planilha")
        .set_file_name(export::export_file_name(state.margin))
        .add_filter("Planilha Excel", &["xlsx"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
