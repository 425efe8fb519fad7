// TUI widget modules for each dashboard panel.

pub mod failure;
pub mod filters;
pub mod metrics;
pub mod players;
pub mod quit_confirm;
pub mod scatter;
pub mod status_bar;
