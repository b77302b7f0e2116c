//! Float rules: which windows skip tiling

/// EWMH window type, as far as float rules care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    Normal,
    Dialog,
    Utility,
    Toolbar,
    Splash,
    Notification,
}

/// What the host knows about a window when placing it
#[derive(Debug, Clone, PartialEq)]
pub struct WindowInfo {
    /// WM_CLASS, instance and class
    pub wm_class: Vec<String>,
    pub title: String,
    pub window_type: WindowType,
    /// min size == max size
    pub fixed_size: bool,
    /// min aspect == max aspect
    pub fixed_ratio: bool,
}

impl WindowInfo {
    pub fn new(wm_class: &str, title: &str) -> Self {
        Self {
            wm_class: vec![wm_class.to_string()],
            title: title.to_string(),
            window_type: WindowType::Normal,
            fixed_size: false,
            fixed_ratio: false,
        }
    }
}

/// Window predicate. Matching windows float.
#[derive(Debug, Clone, PartialEq)]
pub enum FloatRule {
    WmClass(String),
    Title(String),
    WindowType(WindowType),
    FixedSize,
    FixedRatio,
}

impl FloatRule {
    pub fn wm_class(class: impl Into<String>) -> Self {
        Self::WmClass(class.into())
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self::Title(title.into())
    }

    pub fn matches(&self, window: &WindowInfo) -> bool {
        match self {
            Self::WmClass(class) => window.wm_class.iter().any(|c| c == class),
            Self::Title(title) => window.title == *title,
            Self::WindowType(t) => window.window_type == *t,
            Self::FixedSize => window.fixed_size,
            Self::FixedRatio => window.fixed_ratio,
        }
    }
}

/// Dialogs, splashes, popups and fixed-size windows
pub fn default_float_rules() -> Vec<FloatRule> {
    let mut rules: Vec<FloatRule> = [
        WindowType::Utility,
        WindowType::Notification,
        WindowType::Toolbar,
        WindowType::Splash,
        WindowType::Dialog,
    ]
    .into_iter()
    .map(FloatRule::WindowType)
    .collect();

    rules.extend(
        [
            "file_progress",
            "confirm",
            "dialog",
            "download",
            "error",
            "notification",
            "splash",
            "toolbar",
        ]
        .into_iter()
        .map(FloatRule::wm_class),
    );

    rules.push(FloatRule::FixedSize);
    rules.push(FloatRule::FixedRatio);
    rules
}

/// Apps that always float on this setup
pub fn personal_float_rules() -> Vec<FloatRule> {
    vec![
        FloatRule::wm_class("confirmreset"), // gitk
        FloatRule::wm_class("makebranch"),   // gitk
        FloatRule::wm_class("maketag"),      // gitk
        FloatRule::wm_class("ssh-askpass"),
        FloatRule::title("branchdialog"), // gitk
        FloatRule::title("pinentry"),     // GPG key password entry
        FloatRule::title("Android Emulator - pixel5:5554"),
        FloatRule::wm_class("blueman-manager"),
        FloatRule::wm_class("pavucontrol"),
        FloatRule::wm_class("zoom"),
        FloatRule::wm_class("bitwarden"),
        FloatRule::wm_class("nemo"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wm_class_matches_any_part() {
        let mut window = WindowInfo::new("Pavucontrol", "Volume Control");
        window.wm_class.push("pavucontrol".to_string());
        assert!(FloatRule::wm_class("pavucontrol").matches(&window));
        assert!(!FloatRule::wm_class("zoom").matches(&window));
    }

    #[test]
    fn test_title_is_exact() {
        let window = WindowInfo::new("pinentry-gtk", "pinentry");
        assert!(FloatRule::title("pinentry").matches(&window));
        assert!(!FloatRule::title("pin").matches(&window));
    }

    #[test]
    fn test_defaults_catch_dialogs_and_fixed_size() {
        let rules = default_float_rules();

        let mut dialog = WindowInfo::new("firefox", "Save As");
        dialog.window_type = WindowType::Dialog;
        assert!(rules.iter().any(|r| r.matches(&dialog)));

        let mut fixed = WindowInfo::new("calc", "Calculator");
        fixed.fixed_size = true;
        assert!(rules.iter().any(|r| r.matches(&fixed)));

        let normal = WindowInfo::new("firefox", "Mozilla Firefox");
        assert!(!rules.iter().any(|r| r.matches(&normal)));
    }
}
