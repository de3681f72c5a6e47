//! UI layer: app shell, page panels, and theme.

pub mod app;
pub mod panels;
pub mod theme;

pub use app::PredictorApp;
