pub mod app;
pub mod config;
pub mod csv_loader;
pub mod fx_file;
pub mod logging;
pub mod report;

pub use config::{AppConfig, ConfigError, OutputFormat};
