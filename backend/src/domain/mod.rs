//! # Domain Module
//!
//! Record types, budget aggregation and the presenter that drives the view.

pub mod budget_service;
pub mod errors;
pub mod input;
pub mod models;
pub mod presenter;
pub mod snapshots;
pub mod view;

pub use errors::BookkeeperError;
pub use presenter::Presenter;
pub use view::BookkeeperView;
