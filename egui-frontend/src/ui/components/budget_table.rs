//! # Budget Table
//!
//! One row per period with an editable limit. An edit is committed when the
//! cell loses focus.

use eframe::egui;
use egui_extras::{Column, TableBuilder};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::styling::{header_cell, OVER_BUDGET_COLOR};
use crate::ui::view::EguiView;

fn is_over_budget(spent: &str, limit: &str) -> bool {
    match (Decimal::from_str(spent), Decimal::from_str(limit)) {
        (Ok(spent), Ok(limit)) => limit > Decimal::ZERO && spent > limit,
        _ => false,
    }
}

impl EguiView {
    pub fn render_budget_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Budgets");
        ui.add_space(4.0);

        let rows = self.budgets.snapshot.rows.clone();
        let headers = self.budgets.snapshot.headers.clone();
        let mut committed: Vec<String> = Vec::new();

        ui.push_id("budget_table", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(80.0))
                .column(Column::initial(100.0))
                .column(Column::remainder())
                .header(24.0, |mut header| {
                    for title in &headers {
                        header.col(|ui| header_cell(ui, title));
                    }
                })
                .body(|mut body| {
                    for cells in &rows {
                        let [pk, period, spent, limit] = cells.as_slice() else {
                            continue;
                        };
                        body.row(26.0, |mut row| {
                            row.col(|ui| {
                                ui.label(period);
                            });
                            row.col(|ui| {
                                if is_over_budget(spent, limit) {
                                    ui.colored_label(OVER_BUDGET_COLOR, spent);
                                } else {
                                    ui.label(spent);
                                }
                            });
                            row.col(|ui| {
                                let response = ui.add(
                                    egui::TextEdit::singleline(self.budgets.limit_text(pk))
                                        .desired_width(90.0),
                                );
                                if response.lost_focus() {
                                    committed.push(pk.clone());
                                }
                            });
                        });
                    }
                });
        });

        for pk in committed {
            if let Some(event) = self.budgets.commit(&pk) {
                self.raise(event);
            }
        }
    }
}
