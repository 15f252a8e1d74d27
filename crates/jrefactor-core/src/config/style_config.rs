//! Style configuration and the process-wide style defaults

use crate::error::RefactorError;
use crate::result::Result;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Indentation character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    #[default]
    Spaces,
    Tabs,
}

impl IndentStyle {
    pub fn as_char(self) -> char {
        match self {
            IndentStyle::Spaces => ' ',
            IndentStyle::Tabs => '\t',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(IndentStyle::Spaces),
            '\t' => Some(IndentStyle::Tabs),
            _ => None,
        }
    }
}

/// Fallback style used when a file gives no indentation evidence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfiguration {
    pub indent_style: IndentStyle,
    /// Spaces per indentation level (ignored for tabs, which use one tab)
    pub indent_size: usize,
}

impl Default for StyleConfiguration {
    fn default() -> Self {
        Self {
            indent_style: IndentStyle::Spaces,
            indent_size: 4,
        }
    }
}

/// Top-level configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JrefactorConfig {
    pub style: StyleConfiguration,
}

static STYLE_DEFAULTS: OnceCell<StyleConfiguration> = OnceCell::new();

/// Process-wide style defaults; the built-in defaults unless installed
pub fn style_defaults() -> &'static StyleConfiguration {
    STYLE_DEFAULTS.get_or_init(StyleConfiguration::default)
}

/// Install the process-wide style defaults
///
/// May happen once, before any pipeline reads the defaults.
pub fn install_style_defaults(config: StyleConfiguration) -> Result<()> {
    STYLE_DEFAULTS.set(config).map_err(|_| {
        RefactorError::config_error("style defaults are already installed")
    })?;
    tracing::debug!("Installed process-wide style defaults");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_four_spaces() {
        let config = StyleConfiguration::default();
        assert_eq!(config.indent_style, IndentStyle::Spaces);
        assert_eq!(config.indent_size, 4);
    }

    #[test]
    fn test_camel_case_keys() {
        let config: StyleConfiguration =
            serde_json::from_str(r#"{"indentStyle": "tabs", "indentSize": 1}"#).unwrap();
        assert_eq!(config.indent_style, IndentStyle::Tabs);
        assert_eq!(config.indent_size, 1);
    }

    #[test]
    fn test_second_install_is_rejected() {
        // Reading first pins the defaults for the rest of the process.
        let _ = style_defaults();
        let err = install_style_defaults(StyleConfiguration::default()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }
}
