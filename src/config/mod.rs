//! Configuration module for Linkmend
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use linkmend::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linkmend.toml")).unwrap();
//! println!("Checking with {} workers", config.checker.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CheckerConfig, Config, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
