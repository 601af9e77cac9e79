//! # App State Module
//!
//! The eframe application struct and its lifecycle.
//!
//! ## Key Types:
//! - `BookkeeperApp` - owns the presenter (which owns the `EguiView`) and the backend
//!
//! ## Key Functions:
//! - `new()` - build the presenter against the backend's database
//! - `dispatch_events()` - hand queued view events to the presenter
//!
//! Errors returned by the presenter never stop the app; they are shown on the
//! status line.

use bookkeeper_backend::{Backend, Presenter};
use eframe::egui;
use log::{info, warn};

use crate::ui::components::setup_style;
use crate::ui::view::EguiView;

/// Main application struct for the egui bookkeeper
pub struct BookkeeperApp {
    pub presenter: Presenter<EguiView>,
    /// Taken on drop to close the database
    backend: Option<Backend>,
}

impl BookkeeperApp {
    pub fn new(cc: &eframe::CreationContext<'_>, backend: Backend) -> Result<Self, anyhow::Error> {
        info!("🚀 Initializing BookkeeperApp");
        setup_style(&cc.egui_ctx);

        let presenter = backend.presenter(EguiView::new())?;
        Ok(Self::from_parts(presenter, Some(backend)))
    }

    pub fn from_parts(presenter: Presenter<EguiView>, backend: Option<Backend>) -> Self {
        Self { presenter, backend }
    }

    /// Hand every event raised during the last frame to the presenter.
    /// Returns how many were handled successfully.
    pub fn dispatch_events(&mut self) -> usize {
        let events = self.presenter.view_mut().take_events();
        let mut handled = 0;

        for event in events {
            let name = event.name();
            match self.presenter.handle(event) {
                Ok(()) => {
                    info!("✅ {} handled", name);
                    handled += 1;
                }
                Err(e) => {
                    warn!("❌ {} failed: {}", name, e);
                    self.presenter.view_mut().status.error(e.to_string());
                }
            }
        }
        handled
    }

    /// Ask for a repaint while a status message is waiting to expire
    pub fn schedule_status_repaint(&mut self, ctx: &egui::Context) {
        let now = std::time::Instant::now();
        if self.presenter.view_mut().status.visible(now).is_some() {
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
        }
    }
}

impl Drop for BookkeeperApp {
    fn drop(&mut self) {
        if let Some(backend) = self.backend.take() {
            backend.shutdown();
        }
    }
}
