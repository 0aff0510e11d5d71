pub mod app_state;
pub mod config;
pub mod data;
pub mod format;
pub mod table;
