//! # App Coordinator Module
//!
//! The main update loop.
//!
//! ## Application Flow:
//! 1. Render the status line, the side panel (budgets, categories) and the expense table
//! 2. Render any open dialogs
//! 3. Dispatch the events raised while rendering to the presenter
//!
//! Events are only dispatched after rendering, so a frame always draws one
//! consistent snapshot.

use eframe::egui;
use std::time::Instant;

use crate::ui::app_state::BookkeeperApp;
use crate::ui::components::ERROR_COLOR;
use crate::ui::state::StatusLine;

impl eframe::App for BookkeeperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self.presenter.view_mut();

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            render_status_line(ui, &mut view.status);
        });

        egui::SidePanel::right("side_panel")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                view.render_budget_panel(ui);
                ui.separator();
                view.render_category_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            view.render_expense_panel(ui);
        });

        view.render_expense_entry_modal(ctx);
        view.render_category_editor(ctx);

        if self.dispatch_events() > 0 {
            ctx.request_repaint();
        }
        self.schedule_status_repaint(ctx);
    }
}

fn render_status_line(ui: &mut egui::Ui, status: &mut StatusLine) {
    ui.horizontal(|ui| match status.visible(Instant::now()) {
        Some(message) => {
            ui.colored_label(ERROR_COLOR, format!("⚠ {}", message.text));
        }
        None => {
            ui.label("Ready");
        }
    });
}
