//! Status bar composition
//!
//! A bar is authored as a list of `SegmentSpec`s that name colors by theme
//! role. `compose` resolves them against one theme into a `Bar` the host
//! draws left to right. Nothing here renders or polls; widgets are just
//! names plus parameters for the host.
//!
//! Powerline-style separators only look right when their two colors match
//! the backgrounds of the segments on either side. That is an authoring
//! rule: `compose` keeps the authored colors and reports mismatches through
//! `Bar::separator_mismatches`.

pub mod presets;

use std::fmt;

use tracing::{debug, warn};

use crate::error::Result;
use crate::theme::{Color, Theme};

/// A color as authored: theme role or literal
#[derive(Debug, Clone, PartialEq)]
pub enum ColorRef {
    Role(String),
    Literal(Color),
}

impl ColorRef {
    pub fn role(name: impl Into<String>) -> Self {
        Self::Role(name.into())
    }

    pub fn resolve(&self, theme: &Theme) -> Result<Color> {
        match self {
            Self::Role(role) => theme.get(role),
            Self::Literal(color) => Ok(*color),
        }
    }
}

impl From<Color> for ColorRef {
    fn from(color: Color) -> Self {
        Self::Literal(color)
    }
}

impl From<&str> for ColorRef {
    fn from(role: &str) -> Self {
        Self::role(role)
    }
}

/// Screen edge the bar is docked to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// Decorative glyphs bridging two segment backgrounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorGlyph {
    /// Powerline arrow pointing right
    RightArrow,
    /// Powerline arrow pointing left
    LeftArrow,
    /// Right half circle, closes a rounded pill
    RightRound,
    /// Left half circle, opens a rounded pill
    LeftRound,
    /// Lower-right filled triangle
    LowerTriangle,
}

impl SeparatorGlyph {
    pub fn text(&self) -> char {
        match self {
            Self::RightArrow => '\u{E0B0}',
            Self::LeftArrow => '\u{E0B2}',
            Self::RightRound => '\u{E0B4}',
            Self::LeftRound => '\u{E0B6}',
            Self::LowerTriangle => '\u{25E2}',
        }
    }

    pub fn fontsize(&self) -> u32 {
        match self {
            Self::RightArrow | Self::LeftArrow => 22,
            Self::RightRound | Self::LeftRound => 28,
            Self::LowerTriangle => 50,
        }
    }

    /// Map (leading, trailing) background colors to the glyph's (fg, bg).
    ///
    /// Right-pointing glyphs are filled with the left side's color; the
    /// others are filled with the right side's color.
    pub fn paint(&self, leading: Color, trailing: Color) -> (Color, Color) {
        match self {
            Self::RightArrow | Self::RightRound => (leading, trailing),
            Self::LeftArrow | Self::LeftRound | Self::LowerTriangle => (trailing, leading),
        }
    }
}

/// Width of a spacer widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Stretch,
    Fixed(u32),
}

/// How the group box marks the current group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightMethod {
    Border,
    Block,
    Text,
    Line,
}

/// Host-provided live widgets
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    GroupBox {
        borderwidth: u32,
        disable_drag: bool,
        rounded: bool,
        highlight_method: HighlightMethod,
    },
    CurrentLayout,
    WindowCount {
        show_zero: bool,
    },
    Prompt,
    WindowName,
    Spacer(Length),
    Systray,
    Clock,
    Net,
    Cpu,
    Memory,
    /// Plain spacing line
    Sep {
        linewidth: u32,
        padding: u32,
    },
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GroupBox { .. } => "GroupBox",
            Self::CurrentLayout => "CurrentLayout",
            Self::WindowCount { .. } => "WindowCount",
            Self::Prompt => "Prompt",
            Self::WindowName => "WindowName",
            Self::Spacer(_) => "Spacer",
            Self::Systray => "Systray",
            Self::Clock => "Clock",
            Self::Net => "Net",
            Self::Cpu => "CPU",
            Self::Memory => "Memory",
            Self::Sep { .. } => "Sep",
        }
    }
}

/// Static text as authored
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub text: String,
    pub fontsize: Option<u32>,
    pub padding: Option<u32>,
    pub foreground: ColorRef,
    pub background: Option<ColorRef>,
}

/// Widget as authored
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSpec {
    pub kind: WidgetKind,
    pub format: Option<String>,
    pub foreground: Option<ColorRef>,
    pub background: Option<ColorRef>,
    /// Widget-specific colors (e.g. a group box's `highlight_color`)
    pub colors: Vec<(String, ColorRef)>,
}

impl WidgetSpec {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            format: None,
            foreground: None,
            background: None,
            colors: Vec::new(),
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn foreground(mut self, color: impl Into<ColorRef>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    pub fn background(mut self, color: impl Into<ColorRef>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn color(mut self, param: impl Into<String>, color: impl Into<ColorRef>) -> Self {
        self.colors.push((param.into(), color.into()));
        self
    }
}

/// Separator as authored
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorSpec {
    pub glyph: SeparatorGlyph,
    /// Background of whatever sits to the left
    pub leading: ColorRef,
    /// Background of whatever sits to the right
    pub trailing: ColorRef,
}

/// One bar entry before color resolution
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentSpec {
    Text(TextSpec),
    Widget(WidgetSpec),
    Separator(SeparatorSpec),
}

impl SegmentSpec {
    pub fn text(text: impl Into<String>, foreground: impl Into<ColorRef>) -> Self {
        Self::Text(TextSpec {
            text: text.into(),
            fontsize: None,
            padding: None,
            foreground: foreground.into(),
            background: None,
        })
    }

    /// Text on its own background
    pub fn text_on(
        text: impl Into<String>,
        foreground: impl Into<ColorRef>,
        background: impl Into<ColorRef>,
    ) -> Self {
        Self::Text(TextSpec {
            text: text.into(),
            fontsize: None,
            padding: None,
            foreground: foreground.into(),
            background: Some(background.into()),
        })
    }

    pub fn widget(kind: WidgetKind) -> Self {
        Self::Widget(WidgetSpec::new(kind))
    }

    pub fn separator(
        glyph: SeparatorGlyph,
        leading: impl Into<ColorRef>,
        trailing: impl Into<ColorRef>,
    ) -> Self {
        Self::Separator(SeparatorSpec {
            glyph,
            leading: leading.into(),
            trailing: trailing.into(),
        })
    }

    fn resolve(&self, theme: &Theme, bar_background: Color) -> Result<Segment> {
        let background = |c: &Option<ColorRef>| -> Result<Color> {
            match c {
                Some(c) => c.resolve(theme),
                None => Ok(bar_background),
            }
        };

        Ok(match self {
            Self::Text(t) => Segment::Text(Text {
                text: t.text.clone(),
                fontsize: t.fontsize,
                padding: t.padding,
                foreground: t.foreground.resolve(theme)?,
                background: background(&t.background)?,
            }),
            Self::Widget(w) => Segment::Widget(Widget {
                kind: w.kind.clone(),
                format: w.format.clone(),
                foreground: w.foreground.as_ref().map(|c| c.resolve(theme)).transpose()?,
                background: background(&w.background)?,
                colors: w
                    .colors
                    .iter()
                    .map(|(param, c)| Ok((param.clone(), c.resolve(theme)?)))
                    .collect::<Result<_>>()?,
            }),
            Self::Separator(s) => Segment::Separator(Separator {
                glyph: s.glyph,
                leading: s.leading.resolve(theme)?,
                trailing: s.trailing.resolve(theme)?,
            }),
        })
    }
}

impl From<WidgetSpec> for SegmentSpec {
    fn from(widget: WidgetSpec) -> Self {
        Self::Widget(widget)
    }
}

/// Resolved static text
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub fontsize: Option<u32>,
    pub padding: Option<u32>,
    pub foreground: Color,
    pub background: Color,
}

/// Resolved widget
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub kind: WidgetKind,
    pub format: Option<String>,
    /// None = host's widget default
    pub foreground: Option<Color>,
    pub background: Color,
    pub colors: Vec<(String, Color)>,
}

/// Resolved separator
#[derive(Debug, Clone, PartialEq)]
pub struct Separator {
    pub glyph: SeparatorGlyph,
    pub leading: Color,
    pub trailing: Color,
}

impl Separator {
    pub fn foreground(&self) -> Color {
        self.glyph.paint(self.leading, self.trailing).0
    }

    pub fn background(&self) -> Color {
        self.glyph.paint(self.leading, self.trailing).1
    }
}

/// One renderable bar entry with concrete colors
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(Text),
    Widget(Widget),
    Separator(Separator),
}

impl Segment {
    /// Background seen at the (left, right) edge of this segment
    pub fn edges(&self) -> (Color, Color) {
        match self {
            Self::Text(t) => (t.background, t.background),
            Self::Widget(w) => (w.background, w.background),
            Self::Separator(s) => (s.leading, s.trailing),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "TextBox",
            Self::Widget(w) => w.kind.name(),
            Self::Separator(_) => "Separator",
        }
    }
}

/// Which side of a separator disagrees with its neighbor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Leading,
    Trailing,
}

/// Separator color that doesn't match the neighboring background
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorMismatch {
    /// Index of the separator in the bar
    pub index: usize,
    pub side: Side,
    /// Neighbor's background
    pub expected: Color,
    /// Separator's authored color
    pub found: Color,
}

impl fmt::Display for SeparatorMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Leading => "leading",
            Side::Trailing => "trailing",
        };
        write!(
            f,
            "separator #{} {side} color {} doesn't match neighbor background {}",
            self.index, self.found, self.expected
        )
    }
}

/// Bar as authored
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub segments: Vec<SegmentSpec>,
    pub background: ColorRef,
    /// Height in pixels
    pub size: u32,
    pub opacity: f32,
    pub edge: Edge,
}

/// Composed bar. Segment order is render order and fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    segments: Vec<Segment>,
    background: Color,
    size: u32,
    opacity: f32,
    edge: Edge,
}

impl Bar {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Every separator color that doesn't continue its neighbor's background.
    /// A separator at either end of the bar is checked against the bar
    /// background.
    pub fn separator_mismatches(&self) -> Vec<SeparatorMismatch> {
        let mut mismatches = Vec::new();

        for (index, segment) in self.segments.iter().enumerate() {
            let Segment::Separator(sep) = segment else {
                continue;
            };

            let left = index
                .checked_sub(1)
                .and_then(|i| self.segments.get(i))
                .map(|s| s.edges().1)
                .unwrap_or(self.background);
            let right = self
                .segments
                .get(index + 1)
                .map(|s| s.edges().0)
                .unwrap_or(self.background);

            if sep.leading != left {
                mismatches.push(SeparatorMismatch {
                    index,
                    side: Side::Leading,
                    expected: left,
                    found: sep.leading,
                });
            }
            if sep.trailing != right {
                mismatches.push(SeparatorMismatch {
                    index,
                    side: Side::Trailing,
                    expected: right,
                    found: sep.trailing,
                });
            }
        }

        mismatches
    }
}

/// Resolve a bar spec against a theme.
///
/// Fails on the first color role the theme doesn't define. Separator
/// mismatches are logged, not fatal.
pub fn compose(spec: &BarSpec, theme: &Theme) -> Result<Bar> {
    let background = spec.background.resolve(theme)?;

    let segments = spec
        .segments
        .iter()
        .map(|s| s.resolve(theme, background))
        .collect::<Result<Vec<_>>>()?;

    let bar = Bar {
        segments,
        background,
        size: spec.size,
        opacity: spec.opacity,
        edge: spec.edge,
    };

    for mismatch in bar.separator_mismatches() {
        let neighbor = match mismatch.side {
            Side::Leading => mismatch.index.checked_sub(1),
            Side::Trailing => Some(mismatch.index + 1),
        };
        let neighbor = neighbor
            .and_then(|i| bar.segments.get(i))
            .map(Segment::name)
            .unwrap_or("bar edge");
        warn!("{} ({}) with theme '{}'", mismatch, neighbor, theme.name());
    }

    debug!(
        "Composed bar: {} segments, theme '{}'",
        bar.segments.len(),
        theme.name()
    );

    Ok(bar)
}
