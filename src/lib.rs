pub mod app;
pub mod grid;
pub mod input;
pub mod render;
pub mod time;

pub use app::{App, AppConfig, Context};
