//! Color palettes
//!
//! A theme maps role names ("bg", "fg", "accent-1", ...) to colors.
//! Bars, layouts and the launcher ask for roles, never raw colors, so
//! swapping the palette re-skins everything in one go.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// RGBA color, each channel in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    /// Parse `#rrggbb`, `rrggbb`, `#rrggbbaa` or `rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }

        let mut channels = [1.0f32; 4];
        for (i, channel) in channels.iter_mut().enumerate().take(hex.len() / 2) {
            let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| ConfigError::InvalidColor(s.to_string()))?;
            *channel = byte as f32 / 255.0;
        }

        Ok(Self(channels))
    }

    /// Opaque color from 8-bit channels
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
    }

    pub fn rgba(&self) -> [f32; 4] {
        self.0
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Named palette of color roles
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: String,
    roles: BTreeMap<String, Color>,
}

/// On-disk theme format
///
/// ```toml
/// name = "my-gruvbox"
/// extends = "gruvbox"
///
/// [colors]
/// bg = "#1d2021"
/// ```
#[derive(Debug, Deserialize)]
struct ThemeFile {
    name: String,
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

impl Theme {
    /// Build a theme from `(role, hex)` pairs.
    pub fn from_pairs<'a>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        let roles = pairs
            .into_iter()
            .map(|(role, hex)| Ok((role.to_string(), Color::from_hex(hex)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            name: name.into(),
            roles,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve a role, failing with `UnresolvedColor` if it's absent.
    pub fn get(&self, role: &str) -> Result<Color> {
        self.roles
            .get(role)
            .copied()
            .ok_or_else(|| ConfigError::unresolved(role, &self.name))
    }

    pub fn roles(&self) -> impl Iterator<Item = (&str, Color)> {
        self.roles.iter().map(|(role, color)| (role.as_str(), *color))
    }

    /// Look up a built-in theme by name.
    pub fn builtin(name: &str) -> Result<Self> {
        match name {
            "gruvbox" => Ok(Self::gruvbox()),
            "nord-fox" | "nord_fox" | "nordfox" => Ok(Self::nord_fox()),
            other => Err(ConfigError::UnknownTheme(other.to_string())),
        }
    }

    /// Parse a TOML theme. `extends` pulls in a built-in palette first.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ThemeFile = toml::from_str(s)?;

        let mut roles = match &file.extends {
            Some(base) => Self::builtin(base)?.roles,
            None => BTreeMap::new(),
        };
        for (role, hex) in &file.colors {
            roles.insert(role.clone(), Color::from_hex(hex)?);
        }

        Ok(Self {
            name: file.name,
            roles,
        })
    }

    /// Load a TOML theme file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::theme_read(path.to_path_buf(), e))?;
        let theme = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded theme '{}' from {}", theme.name, path.display());
        Ok(theme)
    }

    /// Built-in name, or a path to a TOML file.
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        let path = Path::new(name_or_path);
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::load(path)
        } else {
            Self::builtin(name_or_path)
        }
    }

    /// Gruvbox dark. No `cyan` role: gruvbox calls it aqua.
    pub fn gruvbox() -> Self {
        Self::builtin_palette(
            "gruvbox",
            &[
                ("bg", "#282828"),
                ("fg", "#ebdbb2"),
                ("dark-gray", "#3c3836"),
                ("gray", "#928374"),
                ("light-gray", "#665c54"),
                ("red", "#cc241d"),
                ("green", "#98971a"),
                ("yellow", "#d79921"),
                ("bright-yellow", "#fabd2f"),
                ("blue", "#458588"),
                ("purple", "#b16286"),
                ("aqua", "#689d6a"),
                ("orange", "#d65d0e"),
                ("white", "#fbf1c7"),
                ("accent-1", "#458588"),
                ("accent-2", "#d79921"),
            ],
        )
    }

    /// Nordfox
    pub fn nord_fox() -> Self {
        Self::builtin_palette(
            "nord-fox",
            &[
                ("bg", "#2e3440"),
                ("fg", "#cdcecf"),
                ("black", "#3b4252"),
                ("gray", "#7e8188"),
                ("red", "#bf616a"),
                ("green", "#a3be8c"),
                ("yellow", "#ebcb8b"),
                ("blue", "#81a1c1"),
                ("magenta", "#b48ead"),
                ("cyan", "#88c0d0"),
                ("white", "#e5e9f0"),
                ("orange", "#c9826b"),
                ("pink", "#bf88bc"),
                ("accent-1", "#88c0d0"),
                ("accent-2", "#81a1c1"),
            ],
        )
    }

    fn builtin_palette(name: &str, pairs: &[(&str, &str)]) -> Self {
        let roles = pairs
            .iter()
            .filter_map(|(role, hex)| Some((role.to_string(), Color::from_hex(hex).ok()?)))
            .collect();

        Self {
            name: name.to_string(),
            roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_hex() {
        let c = Color::from_hex("#ff0000").unwrap();
        assert_eq!(c.rgba(), [1.0, 0.0, 0.0, 1.0]);

        // qtile-style literal without the hash
        let c = Color::from_hex("8fbcbb").unwrap();
        assert_eq!(c.to_hex(), "#8fbcbb");

        let c = Color::from_hex("#00000080").unwrap();
        assert_eq!(c.to_hex(), "#00000080");
    }

    #[test]
    fn test_rgb8_matches_hex() {
        assert_eq!(Color::rgb8(0x66, 0x5c, 0x54), Color::from_hex("#665c54").unwrap());
        assert_eq!(Color::rgb8(0x8f, 0xbc, 0xbb).to_hex(), "#8fbcbb");
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        for bad in ["", "#fff", "#gggggg", "#12345", "#1234567", "#+fffff"] {
            assert!(
                matches!(Color::from_hex(bad), Err(ConfigError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_builtin_palettes_parse_completely() {
        // builtin_palette drops unparsable entries; make sure none were dropped
        assert_eq!(Theme::gruvbox().roles().count(), 16);
        assert_eq!(Theme::nord_fox().roles().count(), 15);
    }

    #[test]
    fn test_missing_role() {
        let err = Theme::gruvbox().get("cyan").unwrap_err();
        match err {
            ConfigError::UnresolvedColor { role, theme } => {
                assert_eq!(role, "cyan");
                assert_eq!(theme, "gruvbox");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(Theme::builtin("nordfox").unwrap().name(), "nord-fox");
        assert!(matches!(
            Theme::builtin("solarized"),
            Err(ConfigError::UnknownTheme(_))
        ));
    }

    #[test]
    fn test_toml_theme_extends_builtin() {
        let theme = Theme::from_toml_str(
            r##"
            name = "hard-gruvbox"
            extends = "gruvbox"

            [colors]
            bg = "#1d2021"
            cyan = "#8ec07c"
            "##,
        )
        .unwrap();

        assert_eq!(theme.name(), "hard-gruvbox");
        assert_eq!(theme.get("bg").unwrap().to_hex(), "#1d2021");
        assert_eq!(theme.get("cyan").unwrap().to_hex(), "#8ec07c");
        // untouched roles come from the base
        assert_eq!(theme.get("blue").unwrap().to_hex(), "#458588");
    }

    #[test]
    fn test_toml_theme_bad_color() {
        let err = Theme::from_toml_str(
            r#"
            name = "broken"
            [colors]
            bg = "not-a-color"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor(_)));
    }

    #[test]
    fn test_load_theme_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "name = \"mono\"\n[colors]\nbg = \"#000000\"\nfg = \"#ffffff\"").unwrap();

        let theme = Theme::resolve(file.path().to_str().unwrap()).unwrap();
        assert_eq!(theme.name(), "mono");
        assert_eq!(theme.roles().count(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Theme::load(Path::new("/nonexistent/theme.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ThemeRead { .. }));
    }
}
