//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling).

use std::path::PathBuf;
use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::boot::BootSequence;
use crate::core::particles::{FieldMode, ParticleField};
use crate::core::scramble::Scramble;
use crate::core::scroll::ScrollController;
use crate::ui::theme::{Theme, ThemeKind};

/// One full-viewport content panel of the deck.
pub struct Section {
    pub title: &'static str,
    pub body: &'static [&'static str],
    /// First visible body line when the body is taller than the panel —
    /// the nested scrollable region the wheel feeds before the deck moves.
    pub body_scroll: usize,
}

impl Section {
    fn new(title: &'static str, body: &'static [&'static str]) -> Self {
        Self {
            title,
            body,
            body_scroll: 0,
        }
    }

    /// Largest sensible `body_scroll` for a body viewport of `rows` lines.
    pub fn max_body_scroll(&self, rows: usize) -> usize {
        self.body.len().saturating_sub(rows)
    }
}

/// Which overlay is currently active on top of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Deck,
    Settings,
}

/// Top-level application state.
pub struct AppState {
    /// The deck, in display order.
    pub sections: Vec<Section>,
    /// Virtual-scroll controller — owns the scroll scalar and the active
    /// section index.
    pub scroll: ScrollController,
    /// Pointer-reactive particle field.
    pub field: ParticleField,
    /// One scramble per section heading; the active one is restarted when
    /// its section takes over.
    pub scrambles: Vec<Scramble>,
    /// Boot intro; `None` once finished or skipped.
    pub boot: Option<BootSequence>,
    /// User-configurable keybindings and preferences.
    pub config: AppConfig,
    /// Where preference changes are persisted; resolved from the
    /// environment once at startup.
    pub config_path: PathBuf,
    /// Active palette, rebuilt when the theme preference changes.
    pub theme: Theme,
    /// Which overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted row in the settings overlay.
    pub settings_selected: usize,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Terminal size in cells.
    pub viewport: Rect,
    /// Ring the terminal bell after the next draw (set on unmuted
    /// arrivals, taken by the main loop).
    pub bell_pending: bool,
    /// Active index on the previous tick, to catch the mid-flight flip.
    pub prev_active: usize,
    /// Instant of the previous animation tick, for frame `dt`.
    pub last_tick: Instant,
    /// Frame counter driving the scroll-hint chevron.
    pub hint_tick: u64,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        effect: FieldMode,
        skip_boot: bool,
        width: u16,
        height: u16,
        now: Instant,
    ) -> Self {
        let sections = demo_deck();
        let scrambles = sections.iter().map(|s| Scramble::new(s.title)).collect();
        let theme = Theme::new(config.theme);
        Self {
            scroll: ScrollController::new(sections.len()),
            field: ParticleField::new(effect, width, height),
            scrambles,
            sections,
            boot: (!skip_boot).then(|| BootSequence::new(now)),
            config,
            config_path: crate::config::config_path(),
            theme,
            active_view: ActiveView::default(),
            settings_selected: 0,
            should_quit: false,
            viewport: Rect::new(0, 0, width, height),
            bell_pending: false,
            prev_active: 0,
            last_tick: now,
            hint_tick: 0,
        }
    }

    /// Nearest section to the smoothed scroll value.
    pub fn active_section(&self) -> usize {
        self.scroll.active_index()
    }

    /// True while the boot intro still owns the screen.
    pub fn booting(&self) -> bool {
        self.boot.is_some()
    }

    // ── preference mutations (persisted immediately) ───────────

    pub fn set_muted(&mut self, muted: bool) {
        self.config.muted = muted;
        self.save_config();
    }

    pub fn set_theme(&mut self, kind: ThemeKind) {
        self.config.theme = kind;
        self.theme = Theme::new(kind);
        self.save_config();
    }

    pub fn set_effect(&mut self, mode: FieldMode) {
        self.config.effect = mode;
        self.field.set_mode(mode);
        self.save_config();
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save_to(&self.config_path) {
            tracing::warn!(%e, "config save failed");
        }
    }
}

/// The built-in demo deck.
fn demo_deck() -> Vec<Section> {
    vec![
        Section::new(
            "HOME",
            &[
                "a portfolio that lives in your terminal",
                "",
                "Four full-screen sections, paginated by the wheel.",
                "Everything you see is painted into a cell buffer,",
                "sixty times a second.",
            ],
        ),
        Section::new(
            "ABOUT",
            &[
                "The page never scrolls.  A virtual scalar does.",
                "",
                "Wheel notches feed a scroll value measured in",
                "abstract units; a damped spring chases it, and",
                "each panel opens like a curtain as the value",
                "passes over it.  Weak flicks drift and snap back;",
                "committed ones turn the page.",
            ],
        ),
        Section::new(
            "WORK",
            &[
                "SELECTED PIECES",
                "",
                "01  dotgrid     a lattice that flinches away",
                "                from the pointer and springs home",
                "",
                "02  tailchaser  thirty-five dots pretending,",
                "                convincingly, to be a comet",
                "",
                "03  curtains    symmetric clip-reveals driven by",
                "                one pure style function",
                "",
                "04  bellhop     a terminal bell with an opinion",
                "                about when it should ring",
                "",
                "05  glyphstorm  headings that resolve out of",
                "                line noise, left to right",
                "",
                "06  coldboot    fake BIOS chatter with honest",
                "                millisecond jitter",
                "",
                "    (this list scrolls before the deck does)",
            ],
        ),
        Section::new(
            "CONTACT",
            &[
                "Say hello:",
                "",
                "  mail    hello@termfolio.dev",
                "  code    git.example.org/termfolio",
                "",
                "Press m to unmute the arrival chime.",
            ],
        ),
    ]
}
