/*
[INPUT]:  Public API exports for tushare-pro-cli crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod output;
pub mod params;

// Re-export main types for convenience
pub use config::CliConfig;
pub use output::{OutputFormat, render};
pub use params::parse_param;
