use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::stats::Summary;
use crate::state::AppState;
use crate::ui::{plot, table};

pub const APP_TITLE: &str = "OmniVillage Full Data Visual Dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Download {
    Csv,
    Excel,
}

// ---------------------------------------------------------------------------
// Left side panel – dataset selector
// ---------------------------------------------------------------------------

/// Render the dataset selector.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📁 Select Dataset");
    ui.separator();

    if state.datasets.is_empty() {
        ui.label(format!(
            "No .{} files in {}",
            state.config.extension,
            state.config.data_dir.display()
        ));
        return;
    }

    let current = state.selected.clone().unwrap_or_default();
    let mut chosen: Option<String> = None;
    egui::ComboBox::from_id_salt("dataset_select")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for name in &state.datasets {
                if ui.selectable_label(current == *name, name).clicked() && current != *name {
                    chosen = Some(name.clone());
                }
            }
        });

    if let Some(name) = chosen {
        state.select(name);
    }

    ui.add_space(8.0);
    ui.label(
        RichText::new(format!("{} dataset(s) available", state.datasets.len())).weak(),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload").clicked() {
                state.refresh();
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(pass) = state.current() {
            ui.label(format!(
                "{}: {} rows, {} columns",
                pass.file_name, pass.summary.rows, pass.summary.columns
            ));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – the dashboard page
// ---------------------------------------------------------------------------

/// Render the page for the current render pass.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new(format!("📊 {APP_TITLE}")).size(24.0));
    ui.add_space(8.0);

    let pass = match &state.pass {
        None => {
            info_box(ui, "No dataset selected.");
            return;
        }
        Some(Err(e)) => {
            error_box(ui, e);
            return;
        }
        Some(Ok(pass)) => pass,
    };

    section(ui, "📌 Dataset Stats");
    metrics(ui, &pass.summary);

    section(ui, "📋 Data Preview");
    table::preview_table(ui, &pass.dataset, pass.preview_len(state.config.preview_rows));
    ui.add_space(6.0);
    let download = download_buttons(ui);

    section(ui, "📊 Categorical Column Visuals");
    if pass.categorical.is_empty() {
        info_box(ui, "No categorical columns suitable for bar chart.");
    }
    for (i, chart) in pass.categorical.iter().enumerate() {
        plot::categorical_plot(ui, i, chart);
    }

    section(ui, "📈 Numeric Column Visuals");
    if pass.numeric.is_empty() {
        info_box(ui, "No numeric columns available for histogram.");
    }
    for (i, chart) in pass.numeric.iter().enumerate() {
        plot::numeric_plot(ui, i, chart);
    }

    let Some(download) = download else {
        return;
    };
    let artifact = match download {
        Download::Csv => pass.csv_artifact(),
        Download::Excel => pass.xlsx_artifact(),
    };
    match artifact {
        Ok(artifact) => state.save_artifact(artifact),
        Err(e) => {
            log::error!("Export failed: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

fn metrics(ui: &mut Ui, summary: &Summary) {
    let cards = [
        ("Total Rows", summary.rows),
        ("Total Columns", summary.columns),
        ("Missing Values", summary.missing),
    ];
    ui.columns(cards.len(), |cols: &mut [Ui]| {
        for (col, (label, value)) in cols.iter_mut().zip(cards) {
            egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(label).weak());
                ui.label(RichText::new(value.to_string()).size(28.0).strong());
            });
        }
    });
}

fn download_buttons(ui: &mut Ui) -> Option<Download> {
    let mut clicked = None;
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("📥 Download CSV").clicked() {
            clicked = Some(Download::Csv);
        }
        if ui.button("📥 Download Excel").clicked() {
            clicked = Some(Download::Excel);
        }
    });
    clicked
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(12.0);
    ui.heading(title);
    ui.separator();
}

fn info_box(ui: &mut Ui, msg: &str) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("ℹ {msg}")).color(Color32::from_rgb(0, 104, 201)));
        });
}

fn error_box(ui: &mut Ui, msg: &str) {
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgb(255, 235, 235))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Failed to load dataset").strong().color(Color32::DARK_RED));
            ui.label(RichText::new(msg).monospace().color(Color32::DARK_RED));
        });
}
