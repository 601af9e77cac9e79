//! # Expense Entry Modal
//!
//! Dialog used both to add an expense and to edit the selected one.
//!
//! ## Responsibilities:
//! - Date picker, amount, category combo and comment inputs
//! - Blocking the save with an inline message when validation fails
//! - Discarding the input when the dialog is closed

use eframe::egui;
use egui_extras::DatePickerButton;

use crate::ui::components::styling::error_label;
use crate::ui::view::EguiView;

impl EguiView {
    pub fn render_expense_entry_modal(&mut self, ctx: &egui::Context) {
        if !self.expense_form.is_open {
            return;
        }

        let mut open = true;
        let mut save = false;
        let mut cancel = false;
        let title = self.expense_form.title();
        let options = self.categories.options.clone();

        egui::Window::new(title)
            .id(egui::Id::new("expense_entry_modal"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                let form = &mut self.expense_form;

                egui::Grid::new("expense_entry_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Date");
                        ui.add(DatePickerButton::new(&mut form.expense_date).id_source("expense_date"));
                        ui.end_row();

                        ui.label("Amount *");
                        ui.add(egui::TextEdit::singleline(&mut form.amount).hint_text("0.00"));
                        ui.end_row();

                        ui.label("Category *");
                        let selected = if form.category.is_empty() {
                            "(choose)".to_string()
                        } else {
                            form.category.clone()
                        };
                        egui::ComboBox::from_id_source("expense_category")
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                for name in &options {
                                    ui.selectable_value(&mut form.category, name.clone(), name);
                                }
                            });
                        ui.end_row();

                        ui.label("Comment");
                        ui.add(egui::TextEdit::multiline(&mut form.comment).desired_rows(2));
                        ui.end_row();
                    });

                if let Some(error) = &form.error {
                    ui.add_space(4.0);
                    error_label(ui, error);
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    save = ui.button("Save").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
            });

        if save {
            if let Some(event) = self.expense_form.submit() {
                self.raise(event);
            }
        }
        if cancel || !open {
            self.expense_form.close();
        }
    }
}
