//! The section deck — stacked full-screen panels driven by the scroll value.
//!
//! Panels paint bottom-up in index order. Each one draws only its revealed
//! band (the symmetric curtain strip), so whatever sits beneath shows
//! through the still-covered rows. Depth dimming, shrink and the transition
//! glow all come straight from the per-panel style mapper.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Clear, Paragraph, Widget},
};

use crate::app::state::Section;
use crate::core::panel::compute_panel_style;
use crate::core::scramble::Scramble;
use crate::core::scroll::tuning::PAGE_HEIGHT;
use crate::ui::theme::Theme;

/// Vertical margin of a panel's content box, rows.
const PAD_TOP: u16 = 2;
/// Horizontal margin of a panel's content box, columns.
const PAD_LEFT: u16 = 6;
/// Heading row plus the blank line under it.
const HEADING_ROWS: u16 = 2;

/// Rows of body text visible in a fully open panel on this stage. The
/// wheel router uses this to decide when a section body can still scroll.
pub fn body_rows(stage: Rect) -> usize {
    stage.height.saturating_sub(PAD_TOP * 2 + HEADING_ROWS) as usize
}

/// Renders every panel of the deck for one frame.
pub struct StageWidget<'a> {
    pub sections: &'a [Section],
    pub scrambles: &'a [Scramble],
    pub theme: &'a Theme,
    /// Smoothed scroll value, in scroll units.
    pub scroll: f64,
}

impl Widget for StageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        Clear.render(area, buf);
        buf.set_style(area, self.theme.base_style());

        for (index, section) in self.sections.iter().enumerate() {
            let style = compute_panel_style(self.scroll, index, PAGE_HEIGHT);
            if style.open_progress <= 0.0 {
                continue;
            }

            // Depth shrink, then the curtain strip inside it.
            let panel = deflate(
                area,
                style.inset_rows(area.width),
                style.inset_rows(area.height),
            );
            let hidden = style.hidden_rows(panel.height);
            let band = Rect {
                x: panel.x,
                y: panel.y + hidden,
                width: panel.width,
                height: panel.height.saturating_sub(hidden * 2),
            };
            if band.width == 0 || band.height == 0 {
                continue;
            }

            Clear.render(band, buf);
            buf.set_style(band, self.theme.panel_style(style.brightness));

            let content = content_box(panel);
            let vis = content.intersection(band);
            if vis.width > 0 && vis.height > 0 {
                let heading = self
                    .scrambles
                    .get(index)
                    .map(|s| s.line())
                    .unwrap_or_else(|| section.title.to_string());

                let mut lines = Vec::with_capacity(section.body.len() + 2);
                lines.push(Line::styled(
                    heading,
                    self.theme.heading_style(style.brightness),
                ));
                lines.push(Line::raw(""));
                let skip = section.body_scroll.min(section.body.len());
                for body_line in &section.body[skip..] {
                    lines.push(Line::styled(
                        *body_line,
                        self.theme.body_style(style.brightness),
                    ));
                }

                // Clip against the band by scrolling the hidden top rows away.
                let clip_top = vis.y - content.y;
                Paragraph::new(lines).scroll((clip_top, 0)).render(vis, buf);
            }

            if style.glow > 0.0 {
                let glow = self.theme.glow_style(style.glow);
                buf.set_string(band.x, band.y, "▔".repeat(band.width as usize), glow);
                let bottom = band.y + band.height - 1;
                if bottom > band.y {
                    buf.set_string(band.x, bottom, "▁".repeat(band.width as usize), glow);
                }
            }
        }
    }
}

fn content_box(panel: Rect) -> Rect {
    Rect {
        x: panel.x + PAD_LEFT.min(panel.width / 2),
        y: panel.y + PAD_TOP.min(panel.height / 2),
        width: panel.width.saturating_sub(PAD_LEFT * 2),
        height: panel.height.saturating_sub(PAD_TOP * 2),
    }
}

/// Shave `cols`/`rows` off each edge, pinned to the centre.
fn deflate(area: Rect, cols: u16, rows: u16) -> Rect {
    Rect {
        x: area.x + cols.min(area.width / 2),
        y: area.y + rows.min(area.height / 2),
        width: area.width.saturating_sub(cols * 2),
        height: area.height.saturating_sub(rows * 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeKind;

    const W: u16 = 80;
    const H: u16 = 23;

    fn deck() -> Vec<Section> {
        vec![
            Section {
                title: "HOME",
                body: &["first body line"],
                body_scroll: 0,
            },
            Section {
                title: "ABOUT",
                body: &["second body line"],
                body_scroll: 0,
            },
        ]
    }

    fn resolved_scrambles(sections: &[Section]) -> Vec<Scramble> {
        sections
            .iter()
            .map(|s| {
                let mut sc = Scramble::new(s.title);
                sc.tick(10.0);
                sc
            })
            .collect()
    }

    fn render(scroll: f64) -> Buffer {
        let sections = deck();
        let scrambles = resolved_scrambles(&sections);
        let theme = Theme::new(ThemeKind::Dark);
        let area = Rect::new(0, 0, W, H);
        let mut buf = Buffer::empty(area);
        StageWidget {
            sections: &sections,
            scrambles: &scrambles,
            theme: &theme,
            scroll,
        }
        .render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16, x: u16, len: u16) -> String {
        (x..x + len).map(|col| buf[(col, y)].symbol()).collect()
    }

    #[test]
    fn at_rest_the_first_section_fills_the_stage() {
        let buf = render(0.0);
        assert_eq!(row_text(&buf, PAD_TOP, PAD_LEFT, 4), "HOME");
        assert_eq!(
            row_text(&buf, PAD_TOP + 2, PAD_LEFT, 15),
            "first body line"
        );
    }

    #[test]
    fn a_full_page_later_the_second_section_has_taken_over() {
        let buf = render(PAGE_HEIGHT);
        assert_eq!(row_text(&buf, PAD_TOP, PAD_LEFT, 5), "ABOUT");
        // No trace of the first section's body anywhere on the stage.
        let all: String = (0..H).map(|y| row_text(&buf, y, 0, W)).collect();
        assert!(!all.contains("first body line"));
    }

    #[test]
    fn mid_reveal_shows_both_sections_split_by_the_curtain() {
        let buf = render(PAGE_HEIGHT / 2.0);
        // clip_fraction 0.25 of 23 rows leaves 6 hidden rows per side, so
        // the first section still owns the top of the stage. Depth shrink
        // has already nudged it a column inward at this point.
        assert!(row_text(&buf, PAD_TOP, 0, 20).contains("HOME"));
        // The incoming panel's glow lip sits on the band's top edge.
        assert_eq!(buf[(10, 6)].symbol(), "▔");
        assert_eq!(buf[(10, 16)].symbol(), "▁");
    }

    #[test]
    fn body_scroll_offsets_the_visible_body() {
        let sections = vec![Section {
            title: "WORK",
            body: &["line zero", "line one", "line two"],
            body_scroll: 1,
        }];
        let scrambles = resolved_scrambles(&sections);
        let theme = Theme::new(ThemeKind::Dark);
        let area = Rect::new(0, 0, W, H);
        let mut buf = Buffer::empty(area);
        StageWidget {
            sections: &sections,
            scrambles: &scrambles,
            theme: &theme,
            scroll: 0.0,
        }
        .render(area, &mut buf);

        assert_eq!(row_text(&buf, PAD_TOP + 2, PAD_LEFT, 8), "line one");
    }

    #[test]
    fn body_rows_matches_the_rendered_viewport() {
        let stage = Rect::new(0, 0, W, H);
        assert_eq!(body_rows(stage), 17);
        assert_eq!(body_rows(Rect::new(0, 0, W, 3)), 0);
    }

    #[test]
    fn zero_area_stage_is_a_no_op() {
        let sections = deck();
        let scrambles = resolved_scrambles(&sections);
        let theme = Theme::new(ThemeKind::Dark);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        StageWidget {
            sections: &sections,
            scrambles: &scrambles,
            theme: &theme,
            scroll: 0.0,
        }
        .render(area, &mut buf);
    }
}
