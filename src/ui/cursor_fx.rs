//! Paints the particle field over the stage.
//!
//! Pure presentation: positions come from the simulation, this just picks a
//! glyph per dot weight and writes cells. Painted back-to-front so the
//! heaviest dots win overlapping cells.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::particles::{FieldMode, ParticleField};
use crate::ui::theme::Theme;

pub struct CursorFx<'a> {
    pub field: &'a ParticleField,
    pub theme: &'a Theme,
}

/// Glyph for a dot of the given display weight.
fn glyph_for(size: f64) -> &'static str {
    if size >= 6.0 {
        "●"
    } else if size >= 3.0 {
        "•"
    } else {
        "·"
    }
}

impl Widget for CursorFx<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.field.mode() == FieldMode::Off {
            return;
        }
        for p in self.field.particles().iter().rev() {
            let x = p.pos.x.round();
            let y = p.pos.y.round();
            if x < area.x as f64
                || y < area.y as f64
                || x >= (area.x + area.width) as f64
                || y >= (area.y + area.height) as f64
            {
                continue;
            }
            let cell = &mut buf[(x as u16, y as u16)];
            cell.set_symbol(glyph_for(p.size));
            cell.set_fg(self.theme.particle_color(p.intensity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeKind;

    fn paint(field: &ParticleField, area: Rect) -> Buffer {
        let theme = Theme::new(ThemeKind::Dark);
        let mut buf = Buffer::empty(area);
        CursorFx { field, theme: &theme }.render(area, &mut buf);
        buf
    }

    fn count_cells(buf: &Buffer, area: Rect, symbol: &str) -> usize {
        let mut count = 0;
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if buf[(x, y)].symbol() == symbol {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn resting_trail_collapses_to_one_head_dot() {
        let area = Rect::new(0, 0, 80, 24);
        let field = ParticleField::new(FieldMode::Trail, 80, 24);
        let buf = paint(&field, area);

        // Every dot sits on the centre cell; the head paints last.
        assert_eq!(buf[(40, 12)].symbol(), "●");
        assert_eq!(count_cells(&buf, area, " "), 80 * 24 - 1);
    }

    #[test]
    fn grid_paints_one_dot_per_lattice_anchor() {
        let area = Rect::new(0, 0, 80, 24);
        let field = ParticleField::new(FieldMode::Grid, 80, 24);
        let buf = paint(&field, area);
        assert_eq!(count_cells(&buf, area, "·"), field.particles().len());
    }

    #[test]
    fn dots_outside_the_area_are_not_painted() {
        let field = ParticleField::new(FieldMode::Trail, 80, 24);
        // Area well away from the field centre.
        let area = Rect::new(0, 0, 10, 5);
        let buf = paint(&field, area);
        assert_eq!(count_cells(&buf, area, " "), 10 * 5);
    }

    #[test]
    fn off_mode_paints_nothing() {
        let area = Rect::new(0, 0, 80, 24);
        let field = ParticleField::new(FieldMode::Off, 80, 24);
        let buf = paint(&field, area);
        assert_eq!(count_cells(&buf, area, " "), 80 * 24);
    }
}
