pub mod app_coordinator;
pub mod app_state;
pub mod components;
pub mod state;
pub mod view;

pub use app_state::BookkeeperApp;
pub use view::EguiView;
