//! MotiFy CLI library
//!
//! Configuration and service wiring for the `motify` binary, exposed for
//! testing.

pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{AppConfig, PlaybackSettings, StorageSettings};
pub use error::{CliError, Result};
