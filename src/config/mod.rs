//! Configuration loading and management for the Refund Engine.
//!
//! Refund policies are loaded from YAML files; server settings come from
//! environment variables.
//!
//! # Example
//!
//! ```no_run
//! use refund_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded {} policies", config.len());
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::{LogFormat, Settings};
pub use types::PolicyFile;
