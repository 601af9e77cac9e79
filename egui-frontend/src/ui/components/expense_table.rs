//! # Expense Table
//!
//! Selectable expense rows with Add, Edit and Delete actions.

use eframe::egui;
use egui_extras::{Column, TableBuilder};
use shared::TableSnapshot;

use super::styling::header_cell;
use crate::ui::view::EguiView;

const ROW_HEIGHT: f32 = 24.0;

impl EguiView {
    pub fn render_expense_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Expenses");

        ui.horizontal(|ui| {
            if ui.button("➕ Add").clicked() {
                self.expense_form.open_add(Self::today());
            }

            let edit_row = self.expenses.single_selection().map(<[String]>::to_vec);
            if ui
                .add_enabled(edit_row.is_some(), egui::Button::new("✏ Edit"))
                .on_disabled_hover_text("Select exactly one expense")
                .clicked()
            {
                if let Some(row) = edit_row {
                    self.expense_form.open_edit(&row, Self::today());
                }
            }

            let any_selected = !self.expenses.selected.is_empty();
            if ui
                .add_enabled(any_selected, egui::Button::new("🗑 Delete"))
                .clicked()
            {
                if let Some(event) = self.expenses.take_delete_event() {
                    self.raise(event);
                }
            }
        });
        ui.add_space(6.0);

        if self.expenses.snapshot.is_empty() {
            ui.label("No expenses yet.");
            return;
        }

        let mut toggled: Option<String> = None;
        ui.push_id("expense_table", |ui| {
            let snapshot = &self.expenses.snapshot;
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::exact(28.0))
                .column(Column::initial(100.0))
                .column(Column::initial(90.0))
                .column(Column::initial(160.0))
                .column(Column::remainder())
                .header(ROW_HEIGHT, |mut header| {
                    header.col(|_ui| {});
                    for title in &snapshot.headers {
                        header.col(|ui| header_cell(ui, title));
                    }
                })
                .body(|mut body| {
                    for row_cells in &snapshot.rows {
                        let pk = row_cells.first().cloned().unwrap_or_default();
                        let mut selected = self.expenses.is_selected(&pk);
                        body.row(ROW_HEIGHT, |mut row| {
                            row.set_selected(selected);
                            row.col(|ui| {
                                if ui.checkbox(&mut selected, "").changed() {
                                    toggled = Some(pk.clone());
                                }
                            });
                            for cell in TableSnapshot::display_cells(row_cells) {
                                row.col(|ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    }
                });
        });

        if let Some(pk) = toggled {
            self.expenses.toggle(&pk);
        }
    }
}
