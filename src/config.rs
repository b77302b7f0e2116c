//! vibetile configuration
//!
//! Everything the host needs, built in one go by `ConfigBuilder::build`.
//! A `Config` is never modified; a reload builds a new one.

use std::path::Path;

use tracing::{debug, info};

use crate::bar::presets::BarStyle;
use crate::bar::{compose, Bar, Edge};
use crate::error::Result;
use crate::keys::{group_keys, mouse_bindings, window_keys, Keymap, MouseBinding};
use crate::layouts::{layouts, Floating, Layout};
use crate::theme::Theme;

/// Terminals tried in order when `$TERMINAL` isn't set
const TERMINALS: &[&str] = &[
    "roxterm",
    "sakura",
    "hyper",
    "alacritty",
    "terminator",
    "termite",
    "gnome-terminal",
    "konsole",
    "xfce4-terminal",
    "lxterminal",
    "mate-terminal",
    "kitty",
    "yakuake",
    "tilix",
    "guake",
    "eterm",
    "st",
    "urxvt",
    "wezterm",
    "xterm",
    "x-terminal-emulator",
];

/// Virtual desktop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Groups "1" through "9"
    pub fn digits() -> Vec<Self> {
        (1..=9).map(|n| Self::new(n.to_string())).collect()
    }
}

/// What to do when a window asks for focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOnActivation {
    /// Focus only if the window is on the current group
    Smart,
    Focus,
    Urgent,
    Never,
}

/// Font and padding every widget starts from
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDefaults {
    pub font: String,
    pub fontsize: u32,
    pub padding: u32,
}

impl Default for WidgetDefaults {
    fn default() -> Self {
        Self {
            font: "FIRACODE NERD FONT".to_string(),
            fontsize: 14,
            padding: 10,
        }
    }
}

/// One physical screen and its bars
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub top: Option<Bar>,
    pub bottom: Option<Bar>,
}

impl Screen {
    pub fn with_bar(bar: Bar) -> Self {
        match bar.edge() {
            Edge::Top => Self {
                top: Some(bar),
                bottom: None,
            },
            Edge::Bottom => Self {
                top: None,
                bottom: Some(bar),
            },
        }
    }

    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.top.iter().chain(self.bottom.iter())
    }
}

/// Scalar behavior flags
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub follow_mouse_focus: bool,
    pub bring_front_click: bool,
    pub cursor_warp: bool,
    pub auto_fullscreen: bool,
    pub focus_on_window_activation: FocusOnActivation,
    pub reconfigure_screens: bool,
    /// Let windows (e.g. games) minimize themselves on focus loss
    pub auto_minimize: bool,
    /// Name reported to clients. Java toolkits only behave with a known one.
    pub wmname: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            follow_mouse_focus: true,
            bring_front_click: false,
            cursor_warp: false,
            auto_fullscreen: true,
            focus_on_window_activation: FocusOnActivation::Smart,
            reconfigure_screens: true,
            auto_minimize: true,
            wmname: "LG3D".to_string(),
        }
    }
}

/// Complete configuration handed to the host
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub theme: String,
    pub keys: Keymap,
    pub mouse: Vec<MouseBinding>,
    pub groups: Vec<Group>,
    pub layouts: Vec<Layout>,
    pub floating: Floating,
    pub widget_defaults: WidgetDefaults,
    /// Defaults for launcher extensions, a copy of the widget defaults
    pub extension_defaults: WidgetDefaults,
    pub screens: Vec<Screen>,
    pub options: Options,
}

/// The two shipped setups
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// nord-fox palette, flat bar
    NordFlat,
    /// gruvbox palette, powerline bar
    GruvboxPowerline,
}

impl Variant {
    pub fn theme(&self) -> Theme {
        match self {
            Self::NordFlat => Theme::nord_fox(),
            Self::GruvboxPowerline => Theme::gruvbox(),
        }
    }

    pub fn style(&self) -> BarStyle {
        match self {
            Self::NordFlat => BarStyle::Flat,
            Self::GruvboxPowerline => BarStyle::Powerline,
        }
    }
}

/// Inputs of a config build. Building twice from the same builder gives
/// equal configs.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    theme: Theme,
    style: BarStyle,
    terminal: Option<String>,
    options: Options,
}

impl ConfigBuilder {
    pub fn new(theme: Theme, style: BarStyle) -> Self {
        Self {
            theme,
            style,
            terminal: None,
            options: Options::default(),
        }
    }

    pub fn from_variant(variant: Variant) -> Self {
        Self::new(variant.theme(), variant.style())
    }

    /// Use this terminal instead of guessing one
    pub fn terminal(mut self, terminal: impl Into<String>) -> Self {
        self.terminal = Some(terminal.into());
        self
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn build(&self) -> Result<Config> {
        let theme = &self.theme;
        let terminal = self.terminal.clone().unwrap_or_else(guess_terminal);
        debug!("Building config: theme '{}', terminal {}", theme.name(), terminal);

        let groups = Group::digits();

        let widget_defaults = WidgetDefaults::default();
        let extension_defaults = widget_defaults.clone();

        let mut keys = window_keys(&terminal, theme, &extension_defaults)?;
        keys.extend(group_keys(&groups)?);
        let keys = Keymap::new(keys)?;

        let bar = compose(&self.style.spec(), theme)?;

        let config = Config {
            theme: theme.name().to_string(),
            keys,
            mouse: mouse_bindings(),
            groups,
            layouts: layouts(theme)?,
            floating: Floating::new(),
            widget_defaults,
            extension_defaults,
            screens: vec![Screen::with_bar(bar)],
            options: self.options.clone(),
        };

        info!(
            "Config ready: {} keys, {} layouts, {} screens",
            config.keys.len(),
            config.layouts.len(),
            config.screens.len()
        );

        Ok(config)
    }
}

/// `$TERMINAL`, else the first known terminal on `$PATH`, else xterm
pub fn guess_terminal() -> String {
    if let Ok(term) = std::env::var("TERMINAL") {
        if !term.is_empty() {
            return term;
        }
    }

    let paths: Vec<_> = std::env::var_os("PATH")
        .map(|p| std::env::split_paths(&p).collect())
        .unwrap_or_default();

    TERMINALS
        .iter()
        .find(|name| paths.iter().any(|dir| is_executable(&dir.join(name))))
        .map(|name| name.to_string())
        .unwrap_or_else(|| "xterm".to_string())
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
