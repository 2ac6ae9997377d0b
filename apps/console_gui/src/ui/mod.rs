//! UI layer for the console: app shell, page panels, and theme visuals.

pub mod app;
pub mod panels;
pub mod theme;

pub use app::ConsoleApp;
