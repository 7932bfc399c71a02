//! Ratatui front-end: a menu of actions, sequential prompt dialogs for the
//! actions that take input, and bordered tables for the "View all" actions.
//! Every action outcome, good or bad, lands in the footer and the menu stays
//! up.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use screens::Action;
pub use terminal::run_app;
