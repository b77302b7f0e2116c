//! Tiling layouts and the floating layout
//!
//! These are parameters for the host's layout engines. Border colors come
//! from the theme, except the floating borders which stay fixed.

use crate::error::Result;
use crate::rules::{default_float_rules, personal_float_rules, FloatRule, WindowInfo};
use crate::theme::{Color, Theme};

/// Main pane + stack
#[derive(Debug, Clone, PartialEq)]
pub struct MonadTall {
    pub border_normal: Color,
    pub border_focus: Color,
    pub border_width: u32,
    pub margin: u32,
    /// Used when there's only one window
    pub single_border_width: u32,
    pub single_margin: u32,
}

/// Stacks of windows, one shown per stack
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    pub border_normal: Color,
    pub border_focus: Color,
    pub border_width: u32,
    pub num_stacks: u32,
    pub margin: u32,
}

/// Layouts cycled with mod+Tab, first is the default
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    MonadTall(MonadTall),
    Stack(Stack),
}

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MonadTall(_) => "monadtall",
            Self::Stack(_) => "stack",
        }
    }
}

pub fn layouts(theme: &Theme) -> Result<Vec<Layout>> {
    Ok(vec![
        Layout::MonadTall(MonadTall {
            border_normal: theme.get("fg")?,
            border_focus: theme.get("accent-1")?,
            border_width: 2,
            margin: 10,
            single_border_width: 2,
            single_margin: 10,
        }),
        Layout::Stack(Stack {
            border_normal: theme.get("gray")?,
            border_focus: theme.get("accent-2")?,
            border_width: 2,
            num_stacks: 1,
            margin: 10,
        }),
    ])
}

/// Floating windows and the rules that send windows there
#[derive(Debug, Clone, PartialEq)]
pub struct Floating {
    pub border_normal: Color,
    pub border_focus: Color,
    pub border_width: u32,
    pub rules: Vec<FloatRule>,
}

impl Floating {
    pub fn new() -> Self {
        let mut rules = default_float_rules();
        rules.extend(personal_float_rules());

        Self {
            border_normal: Color::rgb8(0x66, 0x5c, 0x54),
            border_focus: Color::rgb8(0xea, 0x69, 0x62),
            border_width: 3,
            rules,
        }
    }

    pub fn should_float(&self, window: &WindowInfo) -> bool {
        self.rules.iter().any(|rule| rule.matches(window))
    }
}

impl Default for Floating {
    fn default() -> Self {
        Self::new()
    }
}
