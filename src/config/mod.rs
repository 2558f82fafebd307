//! Configuration Module
//!
//! Loads and validates settings from TOML files.

pub mod loader;

pub use loader::{
    Settings, ConfigError, load_settings, parse_settings, RPC_URL_ENV,
};
