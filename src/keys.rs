//! Key and mouse bindings
//!
//! Bindings are plain data: modifiers + keysym + action. The host's input
//! dispatcher calls `Keymap::lookup` with the live modifier state and the
//! keysyms of the pressed key.

use std::collections::HashSet;
use std::fmt;

use smithay::input::keyboard::{xkb, Keysym, ModifiersState};

use crate::config::{Group, WidgetDefaults};
use crate::error::{ConfigError, Result};
use crate::theme::{Color, Theme};

/// Modifier combination a binding requires
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Super/Logo, a.k.a. mod4
    pub logo: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// The window manager modifier (Super)
    pub const MOD: Self = Self {
        logo: true,
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const fn shift(self) -> Self {
        Self {
            shift: true,
            ..self
        }
    }

    pub const fn ctrl(self) -> Self {
        Self { ctrl: true, ..self }
    }

    pub fn from_state(state: &ModifiersState) -> Self {
        Self {
            logo: state.logo,
            shift: state.shift,
            ctrl: state.ctrl,
            alt: state.alt,
        }
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.logo, "mod4"),
            (self.ctrl, "control"),
            (self.alt, "mod1"),
            (self.shift, "shift"),
        ];
        let held: Vec<_> = names.iter().filter(|(on, _)| *on).map(|(_, n)| *n).collect();
        f.write_str(&held.join("+"))
    }
}

/// Direction for focus/shuffle/grow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// dmenu-style launcher, colored from the theme
#[derive(Debug, Clone, PartialEq)]
pub struct Launcher {
    pub command: String,
    pub prompt: String,
    pub font: String,
    pub font_size: u32,
    pub background: Color,
    pub foreground: Color,
    pub selected_background: Color,
    pub selected_foreground: Color,
}

impl Launcher {
    /// Font comes from the extension defaults, colors from the theme
    pub fn dmenu(theme: &Theme, defaults: &WidgetDefaults) -> Result<Self> {
        Ok(Self {
            command: "dmenu_run".to_string(),
            prompt: ">_".to_string(),
            font: defaults.font.clone(),
            font_size: defaults.fontsize,
            background: theme.get("bg")?,
            foreground: theme.get("gray")?,
            selected_background: theme.get("bg")?,
            selected_foreground: theme.get("accent-1")?,
        })
    }
}

/// What a binding asks the host to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Focus(Direction),
    FocusNext,
    Shuffle(Direction),
    Grow(Direction),
    Normalize,
    ToggleSplit,
    Spawn(String),
    RunLauncher(Launcher),
    NextLayout,
    KillWindow,
    ReloadConfig,
    Shutdown,
    /// Show a group on the current screen
    ToGroup(String),
    /// Send the focused window to a group
    MoveToGroup {
        group: String,
        switch_group: bool,
    },
    MoveFloating,
    ResizeFloating,
    BringToFront,
}

/// One keyboard shortcut
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub modifiers: Modifiers,
    pub key: Keysym,
    pub action: Action,
    pub description: String,
}

impl KeyBinding {
    pub fn new(
        modifiers: Modifiers,
        key: &str,
        action: Action,
        description: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            modifiers,
            key: parse_keysym(key)?,
            action,
            description: description.into(),
        })
    }

    /// e.g. `mod4+shift-Return`
    pub fn chord(&self) -> String {
        format!("{}-{}", self.modifiers, xkb::keysym_get_name(self.key))
    }
}

/// Resolve an xkb key name ("h", "Return", "space", "1").
pub fn parse_keysym(name: &str) -> Result<Keysym> {
    let keysym = xkb::keysym_from_name(name, xkb::KEYSYM_NO_FLAGS);
    if keysym.raw() != 0 {
        return Ok(keysym);
    }

    // Single printable ASCII characters map 1:1 onto keysyms
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_graphic() => Ok(Keysym::new(c as u32)),
        _ => Err(ConfigError::UnknownKey(name.to_string())),
    }
}

/// Validated key table: at most one binding per (modifiers, key)
#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    pub fn new(bindings: Vec<KeyBinding>) -> Result<Self> {
        let mut seen = HashSet::new();
        for binding in &bindings {
            if !seen.insert((binding.modifiers, binding.key.raw())) {
                return Err(ConfigError::DuplicateBinding(binding.chord()));
            }
        }

        Ok(Self { bindings })
    }

    /// Binding for a key press, if any.
    ///
    /// `syms` are all keysyms the press produced: the modified sym plus the
    /// raw (unshifted) ones, i.e. `modified_sym()` and `raw_syms()` of the
    /// smithay keysym handle. Shift turns `1` into `exclam` and `h` into `H`,
    /// so shift bindings only match through the raw syms.
    pub fn lookup(&self, state: &ModifiersState, syms: &[Keysym]) -> Option<&KeyBinding> {
        let modifiers = Modifiers::from_state(state);
        syms.iter().find_map(|sym| {
            self.bindings
                .iter()
                .find(|b| b.modifiers == modifiers && b.key == *sym)
        })
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Window navigation, layout and session bindings
pub fn window_keys(
    terminal: &str,
    theme: &Theme,
    extension_defaults: &WidgetDefaults,
) -> Result<Vec<KeyBinding>> {
    use Direction::*;

    let m = Modifiers::MOD;
    let hjkl = [
        ("h", Left, "left"),
        ("l", Right, "right"),
        ("j", Down, "down"),
        ("k", Up, "up"),
    ];
    let mut keys = Vec::new();

    for (key, dir, name) in hjkl {
        keys.push(KeyBinding::new(
            m,
            key,
            Action::Focus(dir),
            format!("Move focus {name}"),
        )?);
    }
    keys.push(KeyBinding::new(
        m,
        "space",
        Action::FocusNext,
        "Move window focus to other window",
    )?);

    for (key, dir, name) in hjkl {
        keys.push(KeyBinding::new(
            m.shift(),
            key,
            Action::Shuffle(dir),
            format!("Move window {name}"),
        )?);
        keys.push(KeyBinding::new(
            m.ctrl(),
            key,
            Action::Grow(dir),
            format!("Grow window {name}"),
        )?);
    }

    keys.extend([
        KeyBinding::new(m, "n", Action::Normalize, "Reset all window sizes")?,
        KeyBinding::new(
            m.shift(),
            "Return",
            Action::ToggleSplit,
            "Toggle between split and unsplit sides of stack",
        )?,
        KeyBinding::new(m, "Return", Action::Spawn(terminal.to_string()), "Launch terminal")?,
        KeyBinding::new(m, "Tab", Action::NextLayout, "Toggle between layouts")?,
        KeyBinding::new(m, "w", Action::KillWindow, "Kill focused window")?,
        KeyBinding::new(m.ctrl(), "r", Action::ReloadConfig, "Reload the config")?,
        KeyBinding::new(m.ctrl(), "q", Action::Shutdown, "Shutdown")?,
        KeyBinding::new(
            m,
            "r",
            Action::RunLauncher(Launcher::dmenu(theme, extension_defaults)?),
            "Run launcher",
        )?,
    ]);

    Ok(keys)
}

/// mod+N shows group N, mod+shift+N moves the focused window there
pub fn group_keys(groups: &[Group]) -> Result<Vec<KeyBinding>> {
    let mut keys = Vec::with_capacity(groups.len() * 2);

    for group in groups {
        keys.push(KeyBinding::new(
            Modifiers::MOD,
            &group.name,
            Action::ToGroup(group.name.clone()),
            format!("Switch to group {}", group.name),
        )?);
        keys.push(KeyBinding::new(
            Modifiers::MOD.shift(),
            &group.name,
            Action::MoveToGroup {
                group: group.name.clone(),
                switch_group: true,
            },
            format!("Switch to & move focused window to group {}", group.name),
        )?);
    }

    Ok(keys)
}

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left = 1,
    Middle = 2,
    Right = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Drag,
    Click,
}

/// Pointer binding on floating windows
#[derive(Debug, Clone, PartialEq)]
pub struct MouseBinding {
    pub kind: MouseKind,
    pub modifiers: Modifiers,
    pub button: Button,
    pub action: Action,
}

pub fn mouse_bindings() -> Vec<MouseBinding> {
    vec![
        MouseBinding {
            kind: MouseKind::Drag,
            modifiers: Modifiers::MOD,
            button: Button::Left,
            action: Action::MoveFloating,
        },
        MouseBinding {
            kind: MouseKind::Drag,
            modifiers: Modifiers::MOD,
            button: Button::Right,
            action: Action::ResizeFloating,
        },
        MouseBinding {
            kind: MouseKind::Click,
            modifiers: Modifiers::MOD,
            button: Button::Middle,
            action: Action::BringToFront,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Vec<Group> {
        Group::digits()
    }

    #[test]
    fn test_parse_keysym() {
        assert_eq!(parse_keysym("Return").unwrap(), Keysym::Return);
        assert_eq!(parse_keysym("h").unwrap(), Keysym::h);
        assert_eq!(parse_keysym("1").unwrap().raw(), 0x31);
        assert!(matches!(
            parse_keysym("NotAKey"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_group_keys_complete_and_unique() {
        let keys = group_keys(&digits()).unwrap();
        assert_eq!(keys.len(), 18);

        for n in 1..=9u32 {
            let name = n.to_string();
            let key = Keysym::new(0x30 + n);

            let switch: Vec<_> = keys
                .iter()
                .filter(|k| k.action == Action::ToGroup(name.clone()))
                .collect();
            assert_eq!(switch.len(), 1, "group {name}");
            assert_eq!(switch[0].modifiers, Modifiers::MOD);
            assert_eq!(switch[0].key, key);

            let moves: Vec<_> = keys
                .iter()
                .filter(|k| matches!(&k.action, Action::MoveToGroup { group, .. } if *group == name))
                .collect();
            assert_eq!(moves.len(), 1, "group {name}");
            assert_eq!(moves[0].modifiers, Modifiers::MOD.shift());
            assert_eq!(moves[0].key, key);
        }

        // no (modifiers, key) collisions
        assert!(Keymap::new(keys).is_ok());
    }

    #[test]
    fn test_duplicate_binding_rejected() {
        let keys = vec![
            KeyBinding::new(Modifiers::MOD, "w", Action::KillWindow, "kill").unwrap(),
            KeyBinding::new(Modifiers::MOD, "w", Action::NextLayout, "oops").unwrap(),
        ];
        let err = Keymap::new(keys).unwrap_err();
        match err {
            ConfigError::DuplicateBinding(chord) => assert_eq!(chord, "mod4-w"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_window_keys_unique_with_groups() {
        let mut keys = window_keys("xterm", &Theme::gruvbox(), &WidgetDefaults::default()).unwrap();
        keys.extend(group_keys(&digits()).unwrap());
        let keymap = Keymap::new(keys).unwrap();
        assert_eq!(keymap.len(), 21 + 18);
    }

    #[test]
    fn test_lookup() {
        let defaults = WidgetDefaults::default();
        let keymap =
            Keymap::new(window_keys("xterm", &Theme::nord_fox(), &defaults).unwrap()).unwrap();

        let state = ModifiersState {
            logo: true,
            ctrl: true,
            ..Default::default()
        };
        let binding = keymap.lookup(&state, &[Keysym::r]).unwrap();
        assert_eq!(binding.action, Action::ReloadConfig);

        let state = ModifiersState {
            logo: true,
            ..Default::default()
        };
        match &keymap.lookup(&state, &[Keysym::Return]).unwrap().action {
            Action::Spawn(cmd) => assert_eq!(cmd, "xterm"),
            other => panic!("unexpected action: {other:?}"),
        }

        // no modifiers, no match
        assert!(keymap
            .lookup(&ModifiersState::default(), &[Keysym::Return])
            .is_none());
    }

    #[test]
    fn test_lookup_shifted_press_uses_raw_syms() {
        let keymap = Keymap::new(group_keys(&digits()).unwrap()).unwrap();
        let state = ModifiersState {
            logo: true,
            shift: true,
            ..Default::default()
        };
        let exclam = Keysym::new(0x21);
        let one = Keysym::new(0x31);

        // modified sym first, then the raw ones, as the keyboard handle reports them
        let binding = keymap.lookup(&state, &[exclam, one]).unwrap();
        assert_eq!(
            binding.action,
            Action::MoveToGroup {
                group: "1".to_string(),
                switch_group: true,
            }
        );

        // the modified sym alone can't reach a shift+digit binding
        assert!(keymap.lookup(&state, &[exclam]).is_none());
    }

    #[test]
    fn test_lookup_shifted_letter() {
        let keymap = Keymap::new(
            window_keys("xterm", &Theme::gruvbox(), &WidgetDefaults::default()).unwrap(),
        )
        .unwrap();
        let state = ModifiersState {
            logo: true,
            shift: true,
            ..Default::default()
        };

        let binding = keymap.lookup(&state, &[Keysym::new(0x48), Keysym::h]).unwrap();
        assert_eq!(binding.action, Action::Shuffle(Direction::Left));
    }

    #[test]
    fn test_launcher_colors_follow_theme() {
        let theme = Theme::nord_fox();
        let defaults = WidgetDefaults {
            font: "SFMONO NERD FONT".to_string(),
            fontsize: 13,
            padding: 10,
        };
        let launcher = Launcher::dmenu(&theme, &defaults).unwrap();
        assert_eq!(launcher.selected_foreground, theme.get("cyan").unwrap());
        assert_eq!(launcher.background, theme.get("bg").unwrap());
        assert_eq!(launcher.font, "SFMONO NERD FONT");
        assert_eq!(launcher.font_size, 13);
    }

    #[test]
    fn test_chord_display() {
        let b = KeyBinding::new(Modifiers::MOD.shift(), "Return", Action::ToggleSplit, "").unwrap();
        assert_eq!(b.chord(), "mod4+shift-Return");
    }

    #[test]
    fn test_mouse_bindings() {
        let mouse = mouse_bindings();
        assert_eq!(mouse.len(), 3);
        assert!(mouse.iter().all(|b| b.modifiers == Modifiers::MOD));
        assert_eq!(mouse[2].kind, MouseKind::Click);
    }
}
