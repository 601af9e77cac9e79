//! # Egui View Module
//!
//! `EguiView` is the egui side of the presenter's `BookkeeperView` trait. It
//! stores the snapshots the presenter pushes, owns every panel's state, and
//! queues the `ViewEvent`s raised while rendering. The coordinator drains the
//! queue after each frame and hands the events to the presenter.

use bookkeeper_backend::BookkeeperView;
use chrono::{Local, NaiveDate};
use log::debug;
use shared::{TableSnapshot, ViewEvent};

use crate::ui::state::{BudgetTableState, CategoryPanelState, ExpenseFormState, ExpenseTableState, StatusLine};

pub struct EguiView {
    pub expenses: ExpenseTableState,
    pub categories: CategoryPanelState,
    pub budgets: BudgetTableState,
    pub expense_form: ExpenseFormState,
    pub status: StatusLine,
    events: Vec<ViewEvent>,
}

impl EguiView {
    pub fn new() -> Self {
        Self {
            expenses: ExpenseTableState::default(),
            categories: CategoryPanelState::default(),
            budgets: BudgetTableState::default(),
            expense_form: ExpenseFormState::new(Self::today()),
            status: StatusLine::default(),
            events: Vec::new(),
        }
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Queue an event for the presenter
    pub fn raise(&mut self, event: ViewEvent) {
        debug!("View raised {}", event.name());
        self.events.push(event);
    }

    /// Drain the queued events
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for EguiView {
    fn default() -> Self {
        Self::new()
    }
}

impl BookkeeperView for EguiView {
    fn set_category_data(&mut self, data: TableSnapshot) {
        self.categories.set_data(data);
    }

    fn set_category_options(&mut self, names: Vec<String>) {
        self.categories.set_options(names);
    }

    fn set_expense_data(&mut self, data: TableSnapshot) {
        self.expenses.set_data(data);
    }

    fn set_budget_data(&mut self, data: TableSnapshot) {
        self.budgets.set_data(data);
    }
}
