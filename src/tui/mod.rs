pub mod app;
pub mod input;
pub mod line_editor;
pub mod render;
pub mod theme;

pub use app::run;
