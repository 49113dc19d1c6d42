//! Pure mapping from the scroll scalar to per-panel style values.
//!
//! Each section panel is styled from three derived quantities: how far it
//! has "opened" (the curtain reveal), how far it has receded behind the next
//! panel (depth dimming and shrink), and whether its transition glow is
//! still visible.  All of it is a deterministic function of
//! `(scroll, panel_index, page_height)` — no state, no side effects — so the
//! renderer calls it freshly every frame.

/// Brightness floor a fully receded panel dims to.
const DEPTH_BRIGHTNESS_MIN: f64 = 0.4;
/// Scale floor a fully receded panel shrinks to.
const DEPTH_SCALE_MIN: f64 = 0.95;
/// Open progress at which the transition glow starts fading out.
const GLOW_FADE_START: f64 = 0.9;

/// Style values for one section panel at one scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    /// 0 = fully covered by the previous panel, 1 = fully revealed.
    /// Panel 0 is the base layer and always reads 1.
    pub open_progress: f64,
    /// Fraction of the panel hidden at the top AND at the bottom
    /// (symmetric curtain), in `[0, 0.5]`.
    pub clip_fraction: f64,
    /// 1 → fully lit, down to 0.4 once the next panel has fully opened.
    pub brightness: f64,
    /// 1 → full size, down to 0.95 as the panel recedes.
    pub scale: f64,
    /// Transition glow opacity: 1 while opening, fading to 0 over the
    /// last stretch of the reveal, 0 when covered or settled.
    pub glow: f64,
}

/// Compute the style of panel `index` for the given scroll value.
///
/// Deterministic and allocation-free; repeated calls with identical inputs
/// return identical output.
pub fn compute_panel_style(scroll: f64, index: usize, page_height: f64) -> PanelStyle {
    let open_progress = if index == 0 {
        1.0
    } else {
        let offset = (index as f64 - 1.0) * page_height;
        ((scroll - offset) / page_height).clamp(0.0, 1.0)
    };

    let clip_fraction = 0.5 * (1.0 - open_progress);

    // Recede once the NEXT panel starts opening over this one.
    let depth = ((scroll - index as f64 * page_height) / page_height).clamp(0.0, 1.0);
    let brightness = 1.0 - (1.0 - DEPTH_BRIGHTNESS_MIN) * depth;
    let scale = 1.0 - (1.0 - DEPTH_SCALE_MIN) * depth;

    let glow = if open_progress <= 0.0 || open_progress >= 1.0 {
        0.0
    } else if open_progress <= GLOW_FADE_START {
        1.0
    } else {
        (1.0 - open_progress) / (1.0 - GLOW_FADE_START)
    };

    PanelStyle {
        open_progress,
        clip_fraction,
        brightness,
        scale,
        glow,
    }
}

impl PanelStyle {
    /// Rows hidden at the top (and, symmetrically, at the bottom) of a
    /// panel `height` rows tall.  Never exceeds half the panel.
    pub fn hidden_rows(&self, height: u16) -> u16 {
        let per_side = (self.clip_fraction * height as f64).round() as u16;
        per_side.min(height / 2)
    }

    /// Rows shaved off each edge by the depth shrink.
    pub fn inset_rows(&self, height: u16) -> u16 {
        let shrink = (1.0 - self.scale) * height as f64 * 0.5;
        shrink.round() as u16
    }
}
