//! User configuration — keybindings, preferences, and persistence.
//!
//! Everything is stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/termfolio/config.toml` (default
//! `~/.config/termfolio/config.toml`).  A missing or unreadable file means
//! defaults; malformed lines are warned about and skipped, never fatal.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::particles::FieldMode;
use crate::ui::theme::ThemeKind;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PrevSection,
    NextSection,
    FirstSection,
    LastSection,
    ToggleMute,
    CycleTheme,
    CycleEffect,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help overlay).
    pub const ALL: &[Action] = &[
        Action::PrevSection,
        Action::NextSection,
        Action::FirstSection,
        Action::LastSection,
        Action::ToggleMute,
        Action::CycleTheme,
        Action::CycleEffect,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::PrevSection => "Previous Section",
            Action::NextSection => "Next Section",
            Action::FirstSection => "First Section",
            Action::LastSection => "Last Section",
            Action::ToggleMute => "Toggle Mute",
            Action::CycleTheme => "Cycle Theme",
            Action::CycleEffect => "Cycle Effect",
            Action::OpenSettings => "Help / Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::PrevSection => "prev_section",
            Action::NextSection => "next_section",
            Action::FirstSection => "first_section",
            Action::LastSection => "last_section",
            Action::ToggleMute => "toggle_mute",
            Action::CycleTheme => "cycle_theme",
            Action::CycleEffect => "cycle_effect",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "prev_section" => Some(Action::PrevSection),
            "next_section" => Some(Action::NextSection),
            "first_section" => Some(Action::FirstSection),
            "last_section" => Some(Action::LastSection),
            "toggle_mute" => Some(Action::ToggleMute),
            "cycle_theme" => Some(Action::CycleTheme),
            "cycle_effect" => Some(Action::CycleEffect),
            "open_settings" => Some(Action::OpenSettings),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"PgDn"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Ctrl+c"`, `"PageDown"`).
    fn to_config_string(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Single characters keep their case ("G" is not "g").
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and persisted preferences.
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Section-change bell suppressed when true.  First run starts muted.
    pub muted: bool,
    pub theme: ThemeKind,
    pub effect: FieldMode,
}

impl AppConfig {
    /// Hard-coded default keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(
            PrevSection,
            vec![
                KeyBind::new(Up, n),
                KeyBind::new(Char('k'), n),
                KeyBind::new(PageUp, n),
            ],
        );
        m.insert(
            NextSection,
            vec![
                KeyBind::new(Down, n),
                KeyBind::new(Char('j'), n),
                KeyBind::new(PageDown, n),
            ],
        );
        m.insert(FirstSection, vec![KeyBind::new(Home, n)]);
        m.insert(LastSection, vec![KeyBind::new(End, n)]);
        m.insert(ToggleMute, vec![KeyBind::new(Char('m'), n)]);
        m.insert(CycleTheme, vec![KeyBind::new(Char('t'), n)]);
        m.insert(CycleEffect, vec![KeyBind::new(Char('p'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Char('c'), ctrl)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"↑/k/PgUp"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the footer).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the footer hint string from current bindings.
    pub fn footer_hint(&self) -> String {
        format!(
            "wheel/{}: sections | {}: mute | {}: theme | {}: help | {}: quit",
            self.short_binding(Action::NextSection),
            self.short_binding(Action::ToggleMute),
            self.short_binding(Action::CycleTheme),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::defaults()
    }

    /// Built-in defaults: muted bell, dark theme, trail effect.
    pub fn defaults() -> Self {
        Self {
            bindings: Self::default_bindings(),
            muted: true,
            theme: ThemeKind::Dark,
            effect: FieldMode::Trail,
        }
    }

    /// Persist current config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::defaults();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Preferences.
            match key {
                "muted" => {
                    match value {
                        "true" => config.muted = true,
                        "false" => config.muted = false,
                        other => tracing::warn!(value = other, "config: bad muted value"),
                    }
                    continue;
                }
                "theme" => {
                    match value.parse::<ThemeKind>() {
                        Ok(theme) => config.theme = theme,
                        Err(e) => tracing::warn!(%e, "config: bad theme value"),
                    }
                    continue;
                }
                "effect" => {
                    match value.parse::<FieldMode>() {
                        Ok(effect) => config.effect = effect,
                        Err(e) => tracing::warn!(%e, "config: bad effect value"),
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(key, "config: unknown key");
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# termfolio configuration".to_string(),
            String::new(),
            "# Preferences".to_string(),
            format!("muted = {}", self.muted),
            format!("theme = {}", self.theme.as_str()),
            format!("effect = {}", self.effect.as_str()),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/termfolio/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("termfolio").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_defaults() {
        let c = AppConfig::parse_config("");
        assert!(c.muted);
        assert_eq!(c.theme, ThemeKind::Dark);
        assert_eq!(c.effect, FieldMode::Trail);
        assert!(!c.display_bindings(Action::Quit).is_empty());
    }

    #[test]
    fn serialise_parse_round_trips_every_preference() {
        let mut c = AppConfig::parse_config("");
        c.muted = false;
        c.theme = ThemeKind::Light;
        c.effect = FieldMode::Grid;
        c.bindings.insert(
            Action::ToggleMute,
            vec![KeyBind::new(KeyCode::Char('a'), KeyModifiers::ALT)],
        );

        let reparsed = AppConfig::parse_config(&c.serialise());
        assert!(!reparsed.muted);
        assert_eq!(reparsed.theme, ThemeKind::Light);
        assert_eq!(reparsed.effect, FieldMode::Grid);
        assert_eq!(
            reparsed.bindings.get(&Action::ToggleMute),
            c.bindings.get(&Action::ToggleMute)
        );
        assert_eq!(
            reparsed.bindings.get(&Action::NextSection),
            c.bindings.get(&Action::NextSection)
        );
    }

    #[test]
    fn save_to_writes_exactly_the_given_path() {
        let dir = std::env::temp_dir().join(format!("termfolio-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut c = AppConfig::defaults();
        c.muted = false;
        c.save_to(&path).unwrap();

        let reparsed = AppConfig::parse_config(&std::fs::read_to_string(&path).unwrap());
        assert!(!reparsed.muted);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_lines_are_skipped_without_damage() {
        let input = "\
# comment
muted = maybe
theme = solarized
effect = sparkles
wat = 9
this line has no equals sign
next_section = NotAKey+x
";
        let c = AppConfig::parse_config(input);
        // Bad values leave the defaults alone.
        assert!(c.muted);
        assert_eq!(c.theme, ThemeKind::Dark);
        assert_eq!(c.effect, FieldMode::Trail);
        // An unparseable bind list keeps the default bindings.
        assert_eq!(
            c.bindings.get(&Action::NextSection),
            AppConfig::default_bindings().get(&Action::NextSection)
        );
    }

    #[test]
    fn keybind_strings_parse_and_print() {
        let cases = [
            ("q", KeyCode::Char('q'), KeyModifiers::NONE),
            ("Ctrl+c", KeyCode::Char('c'), KeyModifiers::CONTROL),
            ("Alt+Up", KeyCode::Up, KeyModifiers::ALT),
            ("Space", KeyCode::Char(' '), KeyModifiers::NONE),
            ("PageDown", KeyCode::PageDown, KeyModifiers::NONE),
            ("F5", KeyCode::F(5), KeyModifiers::NONE),
            ("Shift+G", KeyCode::Char('G'), KeyModifiers::SHIFT),
        ];
        for (text, code, mods) in cases {
            let bind = KeyBind::parse(text).expect(text);
            assert_eq!(bind.code, code);
            assert_eq!(bind.modifiers, mods);
            assert_eq!(KeyBind::parse(&bind.to_config_string()), Some(bind));
        }
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse(""), None);
    }

    #[test]
    fn match_key_prefers_more_modifiers() {
        let mut c = AppConfig::parse_config("");
        c.bindings.insert(
            Action::CycleTheme,
            vec![KeyBind::new(KeyCode::Char('c'), KeyModifiers::NONE)],
        );
        let plain = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        let ctrl = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(c.match_key(plain), Some(Action::CycleTheme));
        assert_eq!(c.match_key(ctrl), Some(Action::Quit));
    }
}
