pub mod app;
pub mod config;
pub mod input;
pub mod keybinds;
pub mod picker;
pub mod ui;

pub use app::App;
pub use config::Config;
