//! Footer bar — key hints on the left, an animated scroll cue on the right.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::ui::theme::Theme;

/// Bouncing chevron frames for the scroll cue.
const CUE_FRAMES: &[&str] = &["scroll ▾", "scroll ▿"];
/// Ticks per cue frame (half a second at the reference rate).
const CUE_PERIOD: u64 = 30;

pub struct FooterHint<'a> {
    /// Key legend, built from the live bindings.
    pub hint: String,
    pub theme: &'a Theme,
    /// Monotonically increasing tick counter (drives the cue animation).
    pub tick: u64,
    /// Show the scroll cue: only while resting on the first section.
    pub show_scroll_cue: bool,
}

impl Widget for FooterHint<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = self.theme.footer_style();
        buf.set_style(area, style);
        buf.set_stringn(
            area.x,
            area.y,
            format!(" {}", self.hint),
            area.width as usize,
            style,
        );

        if self.show_scroll_cue {
            let frame = CUE_FRAMES[((self.tick / CUE_PERIOD) as usize) % CUE_FRAMES.len()];
            let width = frame.chars().count() as u16;
            if area.width > width + 2 {
                let x = area.x + area.width - width - 1;
                buf.set_string(x, area.y, frame, self.theme.scroll_hint_style());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeKind;

    fn row_text(buf: &Buffer, area: Rect) -> String {
        (area.x..area.x + area.width)
            .map(|x| buf[(x, area.y)].symbol())
            .collect()
    }

    fn render(tick: u64, show: bool, width: u16) -> (Buffer, Rect) {
        let area = Rect::new(0, 0, width, 1);
        let theme = Theme::new(ThemeKind::Dark);
        let mut buf = Buffer::empty(area);
        FooterHint {
            hint: "q: quit".to_string(),
            theme: &theme,
            tick,
            show_scroll_cue: show,
        }
        .render(area, &mut buf);
        (buf, area)
    }

    #[test]
    fn legend_on_the_left_cue_on_the_right() {
        let (buf, area) = render(0, true, 40);
        let row = row_text(&buf, area);
        assert!(row.starts_with(" q: quit"));
        assert!(row.contains("scroll ▾"));
    }

    #[test]
    fn cue_bounces_between_frames() {
        let (a, area) = render(0, true, 40);
        let (b, _) = render(CUE_PERIOD, true, 40);
        assert_ne!(row_text(&a, area), row_text(&b, area));
    }

    #[test]
    fn cue_hidden_once_scrolling_started() {
        let (buf, area) = render(0, false, 40);
        assert!(!row_text(&buf, area).contains("scroll"));
    }

    #[test]
    fn narrow_footer_drops_the_cue_before_truncating_the_legend() {
        let (buf, area) = render(0, true, 9);
        let row = row_text(&buf, area);
        assert!(row.starts_with(" q: quit"));
        assert!(!row.contains('▾'));
    }
}
