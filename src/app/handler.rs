//! Input handling — maps key/mouse/resize/tick events to state mutations.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::scroll::tuning::WHEEL_NOTCH;
use crate::ui::layout::{point_in_rect, AppLayout};

use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    // Any key skips the boot intro; the tick handler drops the overlay.
    if let Some(boot) = &mut state.boot {
        boot.skip();
        return;
    }

    match state.active_view {
        ActiveView::Deck => handle_deck_key(state, key),
        ActiveView::Settings => handle_settings_key(state, key),
    }
}

// ── Deck view (configurable bindings) ───────────────────────────

fn handle_deck_key(state: &mut AppState, key: KeyEvent) {
    let now = Instant::now();

    // Number keys jump straight to a section.
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if key.modifiers.is_empty() {
            state.scroll.navigate_to(c as usize - '1' as usize, now);
            return;
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::OpenSettings => {
            state.active_view = ActiveView::Settings;
            state.settings_selected = 0;
        }
        Action::PrevSection => {
            let active = state.scroll.active_index();
            if active > 0 {
                state.scroll.navigate_to(active - 1, now);
            }
        }
        Action::NextSection => {
            state.scroll.navigate_to(state.scroll.active_index() + 1, now);
        }
        Action::FirstSection => {
            state.scroll.navigate_to(0, now);
        }
        Action::LastSection => {
            let last = state.scroll.section_count().saturating_sub(1);
            state.scroll.navigate_to(last, now);
        }
        Action::ToggleMute => {
            state.set_muted(!state.config.muted);
        }
        Action::CycleTheme => {
            state.set_theme(state.theme.kind.cycle());
        }
        Action::CycleEffect => {
            state.set_effect(state.field.mode().cycle());
        }
    }
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Deck;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                item.activate(state);
            }
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    // Pointer motion always feeds the particle field, even under a popup.
    if matches!(
        mouse.kind,
        MouseEventKind::Moved | MouseEventKind::Drag(_)
    ) {
        state.field.observe_pointer(mouse.column, mouse.row);
        return;
    }

    if state.booting() || state.active_view != ActiveView::Deck {
        return;
    }

    let layout = AppLayout::from_area(state.viewport);
    let now = Instant::now();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(dot) = layout.dot_hit(state.sections.len(), mouse.column, mouse.row) {
                state.scroll.navigate_to(dot, now);
            }
        }
        MouseEventKind::ScrollUp => {
            if state.scroll.is_suppressed() {
                return;
            }
            if !wheel_feeds_body(state, &layout, mouse.column, mouse.row, false) {
                state.scroll.handle_wheel(-WHEEL_NOTCH, now);
            }
        }
        MouseEventKind::ScrollDown => {
            if state.scroll.is_suppressed() {
                return;
            }
            if !wheel_feeds_body(state, &layout, mouse.column, mouse.row, true) {
                state.scroll.handle_wheel(WHEEL_NOTCH, now);
            }
        }
        _ => {}
    }
}

/// Route a wheel notch into the active section's body when the pointer is
/// over the stage and the body can still scroll that way. Returns true when
/// the notch was consumed, leaving the deck untouched.
fn wheel_feeds_body(
    state: &mut AppState,
    layout: &AppLayout,
    col: u16,
    row: u16,
    down: bool,
) -> bool {
    if !point_in_rect(layout.stage, col, row) {
        return false;
    }
    let rows = crate::ui::stage::body_rows(layout.stage);
    let idx = state.active_section();
    let Some(section) = state.sections.get_mut(idx) else {
        return false;
    };
    if down {
        if section.body_scroll < section.max_body_scroll(rows) {
            section.body_scroll += 1;
            return true;
        }
    } else if section.body_scroll > 0 {
        section.body_scroll -= 1;
        return true;
    }
    false
}

// ── Resize & tick ───────────────────────────────────────────────

pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.viewport = Rect::new(0, 0, width, height);
    state.field.resize(width, height);
}

/// Advance every animation by one frame.
pub fn handle_tick(state: &mut AppState, now: Instant) {
    let dt = now.duration_since(state.last_tick).as_secs_f64();
    state.last_tick = now;
    state.hint_tick = state.hint_tick.wrapping_add(1);

    if let Some(boot) = &state.boot {
        if boot.is_finished(now) {
            state.boot = None;
            // Let the first heading resolve out of noise right after the intro.
            let active = state.scroll.active_index();
            if let Some(s) = state.scrambles.get_mut(active) {
                s.restart();
            }
        }
    }

    state.scroll.tick(now, dt);
    state.field.step(dt);

    // Restart the heading scramble whenever a new section takes over,
    // including mid-flight when the smoothed value crosses the midpoint.
    let active = state.scroll.active_index();
    if active != state.prev_active {
        state.prev_active = active;
        if let Some(s) = state.scrambles.get_mut(active) {
            s.restart();
        }
    }
    if state.boot.is_none() {
        if let Some(s) = state.scrambles.get_mut(active) {
            s.tick(dt);
        }
    }

    if let Some(section) = state.scroll.take_arrival() {
        tracing::debug!(section, "arrived at section");
        if !state.config.muted {
            state.bell_pending = true;
        }
    }
}
