pub mod clients;
pub mod ops;
pub mod series;

mod app;
pub mod commands;
pub mod config;
pub mod error;

// Re-export App, Config and the error type from modules
pub use app::App;
pub use config::Config;
pub use error::QuiltError;

// Disable colors for all tests to get clean output
#[cfg(test)]
#[ctor::ctor]
fn init_tests() {
    colored::control::set_override(false);
}
