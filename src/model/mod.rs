pub mod history;
pub mod notification;
pub mod storage;
pub mod story_view;
pub mod theme;
