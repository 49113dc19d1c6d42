//! The navigation rail: one dot per section, floating on the right edge.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::ui::theme::Theme;

pub struct NavRail<'a> {
    /// Dot rects from the layout, in section order.
    pub dots: &'a [Rect],
    pub active: usize,
    pub theme: &'a Theme,
}

impl Widget for NavRail<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        for (i, dot) in self.dots.iter().enumerate() {
            if dot.width == 0 || dot.height == 0 {
                continue;
            }
            let (symbol, style) = if i == self.active {
                ("●", self.theme.nav_active_style())
            } else {
                ("○", self.theme.nav_idle_style())
            };
            let x = dot.x + dot.width / 2;
            buf.set_string(x, dot.y, symbol, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::AppLayout;
    use crate::ui::theme::ThemeKind;

    #[test]
    fn active_dot_is_filled_and_the_rest_are_hollow() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        let dots = layout.dot_rects(4);
        let theme = Theme::new(ThemeKind::Dark);
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));

        NavRail {
            dots: &dots,
            active: 2,
            theme: &theme,
        }
        .render(layout.rail, &mut buf);

        for (i, dot) in dots.iter().enumerate() {
            let symbol = buf[(dot.x + 1, dot.y)].symbol();
            if i == 2 {
                assert_eq!(symbol, "●");
            } else {
                assert_eq!(symbol, "○");
            }
        }
    }
}
