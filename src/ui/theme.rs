//! Colour palette and text styles used across the UI.
//!
//! Two palettes (dark/light) behind one `Theme` value.  Everything is RGB so
//! the depth effect can dim continuously: `blend(bg, colour, brightness)`
//! pulls a colour toward the background, which reads as "receding" on both
//! palettes.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown theme '{0}', expected dark or light")]
pub struct ParseThemeError(String);

/// Which palette is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Dark,
    Light,
}

impl ThemeKind {
    /// Config/CLI token.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }

    /// Human-readable label for the settings overlay.
    pub fn label(self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }
}

impl FromStr for ThemeKind {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(ThemeKind::Dark),
            "light" => Ok(ThemeKind::Light),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

/// Linear blend between two RGB colours, `t` clamped to `[0, 1]`.
pub fn blend(a: Color, b: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (Color::Rgb(ar, ag, ab), Color::Rgb(br, bg, bb)) = (a, b) else {
        // Palettes are all-RGB; anything else passes through unblended.
        return if t < 0.5 { a } else { b };
    };
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    Color::Rgb(mix(ar, br), mix(ag, bg), mix(ab, bb))
}

/// Central theme — change colours here and they propagate everywhere.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub kind: ThemeKind,
    bg: Color,
    surface: Color,
    fg: Color,
    muted: Color,
    accent: Color,
    ok: Color,
}

impl Theme {
    pub fn new(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self {
                kind,
                bg: Color::Rgb(8, 8, 10),
                surface: Color::Rgb(16, 16, 20),
                fg: Color::Rgb(226, 228, 230),
                muted: Color::Rgb(122, 126, 133),
                accent: Color::Rgb(255, 77, 90),
                ok: Color::Rgb(80, 250, 123),
            },
            ThemeKind::Light => Self {
                kind,
                bg: Color::Rgb(240, 241, 244),
                surface: Color::Rgb(228, 230, 235),
                fg: Color::Rgb(26, 28, 32),
                muted: Color::Rgb(128, 134, 142),
                accent: Color::Rgb(214, 32, 54),
                ok: Color::Rgb(22, 142, 72),
            },
        }
    }

    pub fn bg(&self) -> Color {
        self.bg
    }

    /// Dim a colour toward the background: `brightness` 1 = full, 0 = gone.
    pub fn dimmed(&self, colour: Color, brightness: f64) -> Color {
        blend(self.bg, colour, brightness)
    }

    // ── deck panels ────────────────────────────────────────────
    pub fn base_style(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn panel_style(&self, brightness: f64) -> Style {
        Style::default()
            .bg(self.dimmed(self.surface, brightness))
            .fg(self.dimmed(self.fg, brightness))
    }

    pub fn heading_style(&self, brightness: f64) -> Style {
        Style::default()
            .fg(self.dimmed(self.accent, brightness))
            .add_modifier(Modifier::BOLD)
    }

    pub fn body_style(&self, brightness: f64) -> Style {
        Style::default().fg(self.dimmed(self.fg, brightness))
    }

    pub fn muted_style(&self, brightness: f64) -> Style {
        Style::default().fg(self.dimmed(self.muted, brightness))
    }

    /// Transition glow border; `glow` is the mapper's fade value.
    pub fn glow_style(&self, glow: f64) -> Style {
        Style::default().fg(self.dimmed(self.accent, glow))
    }

    /// Particle dot colour at a given intensity.
    pub fn particle_color(&self, intensity: f64) -> Color {
        self.dimmed(self.accent, intensity)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn nav_active_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_idle_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().bg(self.surface).fg(self.muted)
    }

    pub fn scroll_hint_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    // ── overlays ───────────────────────────────────────────────
    pub fn boot_style(&self) -> Style {
        Style::default().bg(self.bg).fg(self.ok)
    }

    pub fn popup_style(&self) -> Style {
        Style::default().bg(self.surface).fg(self.fg)
    }

    pub fn popup_border_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn popup_title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_selected_style(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(self.bg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_hits_its_endpoints() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 0.5), Color::Rgb(100, 50, 25));
        // Out-of-range t clamps instead of extrapolating.
        assert_eq!(blend(a, b, 2.0), b);
        assert_eq!(blend(a, b, -1.0), a);
    }

    #[test]
    fn dimming_to_zero_disappears_into_the_background() {
        let theme = Theme::new(ThemeKind::Dark);
        assert_eq!(theme.dimmed(Color::Rgb(255, 255, 255), 0.0), theme.bg());
    }

    #[test]
    fn theme_tokens_round_trip() {
        for kind in [ThemeKind::Dark, ThemeKind::Light] {
            assert_eq!(kind.as_str().parse::<ThemeKind>().unwrap(), kind);
        }
        assert!("solarized".parse::<ThemeKind>().is_err());
        assert_eq!(ThemeKind::Dark.cycle(), ThemeKind::Light);
        assert_eq!(ThemeKind::Light.cycle(), ThemeKind::Dark);
    }
}
