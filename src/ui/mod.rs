pub mod app;
pub mod commands;
pub mod platform;

pub mod history_panel;
pub mod input_panel;
pub mod story_window;
pub mod toasts;
