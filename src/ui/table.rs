use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CellValue, Dataset};

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 360.0;

/// Read-only preview of the first `rows` rows, in file order. `rows` must
/// not exceed the dataset's row count.
pub fn preview_table(ui: &mut Ui, dataset: &Dataset, rows: usize) {
    if dataset.columns.is_empty() {
        ui.label(RichText::new("Empty table").italics());
        return;
    }

    egui::ScrollArea::horizontal()
        .id_salt("preview_hscroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(32.0))
                .columns(
                    Column::initial(120.0).at_least(60.0).clip(true),
                    dataset.columns.len(),
                )
                .min_scrolled_height(0.0)
                .max_scroll_height(MAX_TABLE_HEIGHT)
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("");
                    });
                    for column in &dataset.columns {
                        header.col(|ui| {
                            ui.strong(&column.name)
                                .on_hover_text(column.kind.label());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows, |mut row| {
                        let r = row.index();
                        row.col(|ui| {
                            ui.label(RichText::new(r.to_string()).weak());
                        });
                        for c in 0..dataset.columns.len() {
                            row.col(|ui| {
                                cell(ui, dataset.cell(r, c));
                            });
                        }
                    });
                });
        });
}

fn cell(ui: &mut Ui, value: &CellValue) {
    match value {
        CellValue::Null => {
            ui.label(RichText::new("None").weak().italics());
        }
        CellValue::Integer(_) | CellValue::Float(_) => {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                ui.monospace(value.to_string());
            });
        }
        other => {
            ui.label(other.to_string());
        }
    }
}
