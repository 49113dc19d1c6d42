//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.
//! Every mutation goes through an `AppState` setter, which persists the
//! preference immediately.

use super::state::AppState;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> &'static str,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }

    /// Current value as shown in the popup's right column.
    pub fn value_text(&self, state: &AppState) -> &'static str {
        match self {
            Self::Toggle { get, .. } => {
                if get(state) {
                    "on"
                } else {
                    "off"
                }
            }
            Self::Cycle { value, .. } => value(state),
        }
    }

    /// Activate the item: flip a toggle, step a cycle.
    pub fn activate(&self, state: &mut AppState) {
        match self {
            Self::Toggle { get, set, .. } => set(state, !get(state)),
            Self::Cycle { cycle, .. } => cycle(state),
        }
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Toggle {
        label: "Mute audio",
        get: |s| s.config.muted,
        set: |s, v| s.set_muted(v),
    },
    SettingsItem::Cycle {
        label: "Theme",
        value: |s| s.theme.kind.label(),
        cycle: |s| s.set_theme(s.theme.kind.cycle()),
    },
    SettingsItem::Cycle {
        label: "Particle effect",
        value: |s| s.field.mode().label(),
        cycle: |s| s.set_effect(s.field.mode().cycle()),
    },
];
