//! # Category Panel
//!
//! Read-only category list plus an editor window for adding and deleting
//! categories.

use eframe::egui;
use shared::TableSnapshot;

use crate::ui::view::EguiView;

impl EguiView {
    pub fn render_category_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Categories");
            if ui.button("Edit…").clicked() {
                self.categories.editor_open = true;
            }
        });
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .id_source("category_list")
            .max_height(220.0)
            .show(ui, |ui| {
                egui::Grid::new("category_grid").striped(true).show(ui, |ui| {
                    for title in &self.categories.snapshot.headers {
                        ui.strong(title);
                    }
                    ui.end_row();
                    for row in &self.categories.snapshot.rows {
                        for cell in TableSnapshot::display_cells(row) {
                            ui.label(cell);
                        }
                        ui.end_row();
                    }
                });
            });
    }

    pub fn render_category_editor(&mut self, ctx: &egui::Context) {
        if !self.categories.editor_open {
            return;
        }

        let mut open = true;
        let mut raised = Vec::new();
        egui::Window::new("Edit categories")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let state = &mut self.categories;

                ui.label("New category");
                ui.text_edit_singleline(&mut state.new_name);
                egui::ComboBox::from_id_source("category_parent")
                    .selected_text(state.new_parent.as_deref().unwrap_or("(no parent)"))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut state.new_parent, None, "(no parent)");
                        for name in &state.options {
                            ui.selectable_value(&mut state.new_parent, Some(name.clone()), name);
                        }
                    });
                if ui.button("Add").clicked() {
                    raised.extend(state.add_event());
                }

                ui.separator();

                ui.label("Delete category");
                let selected = state
                    .delete_choice
                    .as_deref()
                    .and_then(|pk| state.name_of(pk))
                    .unwrap_or("(choose)")
                    .to_string();
                egui::ComboBox::from_id_source("category_delete")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for row in &state.snapshot.rows {
                            let (Some(pk), Some(name)) = (row.first(), row.get(1)) else {
                                continue;
                            };
                            ui.selectable_value(&mut state.delete_choice, Some(pk.clone()), name);
                        }
                    });
                if ui
                    .add_enabled(state.delete_choice.is_some(), egui::Button::new("Delete"))
                    .clicked()
                {
                    raised.extend(state.delete_event());
                }
            });

        self.categories.editor_open = open;
        for event in raised {
            self.raise(event);
        }
    }
}
