//! Configuration
//!
//! A project may carry a config file that sets the fallback indentation
//! style. It is looked up from the working directory upward, in order:
//! `.jrefactor.toml`, `.jrefactor.json`, `jrefactor.yaml`, `jrefactor.yml`,
//! `jrefactor.json`.
//!
//! ```toml
//! [style]
//! indentStyle = "spaces"
//! indentSize = 4
//! ```
//!
//! The loaded style is installed once per process with
//! [`install_style_defaults`]; style inference only reads it.

mod loader;
mod style_config;

pub use loader::ConfigLoader;
pub use style_config::{
    IndentStyle, JrefactorConfig, StyleConfiguration, install_style_defaults, style_defaults,
};
