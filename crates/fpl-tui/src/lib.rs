// Library root: re-exports the TUI modules so the binary and tests share
// them.

pub mod app;
pub mod protocol;
pub mod tui;
