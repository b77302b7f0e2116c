//! vibetile - tiling window manager configuration
//!
//! Themed status bars, key bindings, layouts and float rules, built into
//! one immutable `Config` for the window manager runtime.

pub mod autostart;
pub mod bar;
pub mod config;
pub mod error;
pub mod host;
pub mod keys;
pub mod layouts;
pub mod rules;
pub mod session;
pub mod theme;

pub use config::{Config, ConfigBuilder, Variant};
pub use error::{ConfigError, Result};
pub use host::{Host, LogHost};
pub use session::{ConfigSource, Session};
pub use theme::{Color, Theme};
