//! Static taxonomies and layered settings for the scam-engagement honeypot.
//!
//! - [`settings`] — the layered `Settings` loader (A1).
//! - [`keywords`] — keyword tables and per-axis severity weights (C1).
//! - [`persona`] — the immutable persona catalog (C5).
//! - [`category`] — the scam-category catalog and per-category engagement
//!   config consumed by the strategy engine (C7).

pub mod category;
pub mod keywords;
pub mod persona;
pub mod settings;

pub use category::{category_config, CategoryConfig};
pub use keywords::{KeywordAxis, KeywordEntry, KEYWORD_TABLES};
pub use persona::{persona_profile, PersonaProfile};
pub use settings::{load_settings, RuntimeEnvironment, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
