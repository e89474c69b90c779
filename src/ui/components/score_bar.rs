use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::engine::scoring::ScoreState;
use crate::ui::theme::Theme;

/// Bordered bar filled to the share of correct answers, labelled with the
/// running tally.
pub struct ScoreBar<'a> {
    score: &'a ScoreState,
    theme: &'a Theme,
}

impl<'a> ScoreBar<'a> {
    pub fn new(score: &'a ScoreState, theme: &'a Theme) -> Self {
        Self { score, theme }
    }
}

impl Widget for ScoreBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Score ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let ratio = self.score.percentage().map(|p| p / 100.0).unwrap_or(0.0);
        let filled_width = (ratio.clamp(0.0, 1.0) * inner.width as f64) as u16;
        let label = self.score.label();

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_width = label.chars().count() as u16;
        let label_x = inner.x + (inner.width.saturating_sub(label_width)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}
