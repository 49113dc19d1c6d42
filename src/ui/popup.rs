//! Help / settings popup overlay.
//!
//! One centered box: the settings list on top (cursor-driven, applied
//! immediately) and the key binding reference below it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::SETTINGS_ITEMS;
use crate::app::state::AppState;
use crate::config::Action;

/// Help / settings popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        let height = (SETTINGS_ITEMS.len() + Action::ALL.len()) as u16 + 8;
        let popup = centered_fixed(44, height, area);
        if popup.width < 4 || popup.height < 4 {
            return;
        }
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Help / Settings ")
            .title_style(theme.popup_title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.popup_border_style())
            .style(theme.popup_style());

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let selected = i == self.state.settings_selected;
            let prefix = if selected { " ▸ " } else { "   " };
            let row_style = if selected {
                theme.popup_selected_style()
            } else {
                theme.popup_style()
            };
            lines.push(two_column_row(
                inner.width,
                prefix,
                item.label(),
                &item.value_text(self.state),
                row_style,
            ));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "   Key bindings",
            theme.popup_title_style(),
        )));
        for &action in Action::ALL {
            lines.push(two_column_row(
                inner.width,
                "   ",
                action.label(),
                &self.state.config.display_bindings(action),
                theme.muted_style(1.0),
            ));
        }
        lines.push(two_column_row(
            inner.width,
            "   ",
            "Jump to Section",
            "1-9",
            theme.muted_style(1.0),
        ));

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            theme.muted_style(1.0),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// One popup row: label on the left, value right-aligned to the popup width.
fn two_column_row(
    width: u16,
    prefix: &str,
    label: &str,
    value: &str,
    style: ratatui::style::Style,
) -> Line<'static> {
    let label_col = format!("{prefix}{label:<20}");
    let value_width = (width as usize)
        .saturating_sub(label_col.chars().count() + 1)
        .max(value.chars().count());
    let value_col = format!("{value:>value_width$} ");
    Line::from(vec![
        Span::styled(label_col, style),
        Span::styled(value_col, style),
    ])
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
