//! One module per screen.
pub mod combat;
pub mod level_list;
pub mod loot;
pub mod map;
pub mod run_end;
pub mod title;

use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};

/// Bordered block with a padded title, shared by every screen.
pub(crate) fn panel(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {title} "))
}
