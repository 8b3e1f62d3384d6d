//! Terminal presentation: setup/teardown and per-screen widgets.
pub mod terminal;
pub mod ui;
mod widgets;

pub use widgets::combat::Portraits;
