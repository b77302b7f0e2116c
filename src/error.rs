//! Error types for vibetile configuration building.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration building.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can abort a config build (startup or reload).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A segment, layout or binding asked for a role the theme doesn't have.
    #[error("theme '{theme}' has no color role '{role}'")]
    UnresolvedColor { role: String, theme: String },

    /// A color string that isn't `#rrggbb` / `#rrggbbaa`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// No built-in theme with this name.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// Failed to read a theme file.
    #[error("failed to read theme file {path}")]
    ThemeRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Theme file is not valid TOML for a theme.
    #[error("failed to parse theme: {0}")]
    ThemeParse(#[from] toml::de::Error),

    /// Key name xkb doesn't know.
    #[error("unknown key name: {0}")]
    UnknownKey(String),

    /// Two bindings on the same modifiers + key.
    #[error("duplicate key binding: {0}")]
    DuplicateBinding(String),
}

impl ConfigError {
    /// Create an UnresolvedColor error.
    pub fn unresolved(role: impl Into<String>, theme: impl Into<String>) -> Self {
        Self::UnresolvedColor {
            role: role.into(),
            theme: theme.into(),
        }
    }

    /// Create a ThemeRead error.
    pub fn theme_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::ThemeRead { path, source }
    }
}
