//! Full-screen boot intro overlay.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Clear, Widget},
};

use crate::core::boot::BootSequence;
use crate::ui::theme::Theme;

const MARGIN_X: u16 = 2;
const MARGIN_Y: u16 = 1;

pub struct BootOverlay<'a> {
    pub boot: &'a BootSequence,
    pub theme: &'a Theme,
    pub now: Instant,
}

impl Widget for BootOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        Clear.render(area, buf);
        let style = self.theme.boot_style();
        buf.set_style(area, style);

        let max_width = area.width.saturating_sub(MARGIN_X * 2) as usize;
        let visible = self.boot.visible_lines(self.now);
        for (i, line) in visible.iter().enumerate() {
            let y = area.y + MARGIN_Y + i as u16;
            if y >= area.y + area.height {
                break;
            }
            buf.set_stringn(area.x + MARGIN_X, y, *line, max_width, style);
        }

        // Cursor block on the line waiting to be typed.
        if self.boot.is_typing(self.now) {
            let y = area.y + MARGIN_Y + visible.len() as u16;
            if y < area.y + area.height && max_width > 0 {
                buf.set_string(area.x + MARGIN_X, y, "█", style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeKind;
    use std::time::Duration;

    const LINES: &[&'static str] = &["ALPHA", "BETA"];

    fn render(at_ms: u64) -> Buffer {
        let t0 = Instant::now();
        let boot = BootSequence::with_delays(LINES, &[50, 50], t0);
        let theme = Theme::new(ThemeKind::Dark);
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        BootOverlay {
            boot: &boot,
            theme: &theme,
            now: t0 + Duration::from_millis(at_ms),
        }
        .render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..40).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn lines_type_in_with_a_cursor_below() {
        let buf = render(75);
        assert!(row_text(&buf, MARGIN_Y).contains("ALPHA"));
        assert!(!row_text(&buf, MARGIN_Y + 1).contains("BETA"));
        assert_eq!(buf[(MARGIN_X, MARGIN_Y + 1)].symbol(), "█");
    }

    #[test]
    fn cursor_disappears_once_everything_is_typed() {
        let buf = render(150);
        assert!(row_text(&buf, MARGIN_Y).contains("ALPHA"));
        assert!(row_text(&buf, MARGIN_Y + 1).contains("BETA"));
        assert_eq!(buf[(MARGIN_X, MARGIN_Y + 2)].symbol(), " ");
    }
}
