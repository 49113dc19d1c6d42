//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the navigation rail overlaid on the stage's right edge.
const RAIL_WIDTH: u16 = 3;

/// Primary screen layout: the full-screen section stage with a one-line
/// footer below it. The navigation rail floats over the stage rather than
/// being split off, so panels can use the whole width.
pub struct AppLayout {
    pub stage: Rect,
    pub rail: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // section stage (takes all remaining space)
                Constraint::Length(1), // footer hint bar
            ])
            .split(area);

        let stage = chunks[0];
        let rail = Rect {
            x: stage.x + stage.width.saturating_sub(RAIL_WIDTH),
            y: stage.y,
            width: RAIL_WIDTH.min(stage.width),
            height: stage.height,
        };

        Self {
            stage,
            rail,
            footer: chunks[1],
        }
    }

    /// One rect per navigation dot, stacked and vertically centred in the
    /// rail. Falls back to single spacing when the rail is short.
    pub fn dot_rects(&self, count: usize) -> Vec<Rect> {
        if count == 0 || self.rail.width == 0 || self.rail.height == 0 {
            return Vec::new();
        }
        let count = count as u16;
        let spacing: u16 = if self.rail.height >= count * 2 - 1 { 2 } else { 1 };
        let total = (count - 1) * spacing + 1;
        let top = self.rail.y + self.rail.height.saturating_sub(total) / 2;
        (0..count)
            .map(|i| Rect {
                x: self.rail.x,
                y: top + i * spacing,
                width: self.rail.width,
                height: 1,
            })
            .filter(|r| r.y < self.rail.y + self.rail.height)
            .collect()
    }

    /// Which navigation dot (if any) sits under the given cell.
    pub fn dot_hit(&self, count: usize, col: u16, row: u16) -> Option<usize> {
        self.dot_rects(count)
            .iter()
            .position(|r| point_in_rect(*r, col, row))
    }
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

// ─────────────────────────────────────────────────────────────────────────────
