use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::quiz::QuizSession;
use crate::ui::components::score_bar::ScoreBar;
use crate::ui::theme::Theme;

pub struct SessionSidebar<'a, R> {
    session: &'a QuizSession<R>,
    theme: &'a Theme,
}

impl<'a, R> SessionSidebar<'a, R> {
    pub fn new(session: &'a QuizSession<R>, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl<R: rand::Rng> Widget for SessionSidebar<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(6)])
            .split(area);

        ScoreBar::new(self.session.score(), self.theme).render(sections[0], buf);

        let score = self.session.score();
        let pct_color = match score.percentage() {
            Some(p) if p >= 80.0 => colors.success(),
            Some(p) if p >= 50.0 => colors.warning(),
            Some(_) => colors.error(),
            None => colors.text_dim(),
        };
        let pct_str = score
            .percentage()
            .map(|p| format!("{p:.1}%"))
            .unwrap_or_else(|| "--".to_string());

        let row = |label: &'static str, value: String, color| {
            Line::from(vec![
                Span::styled(label, Style::default().fg(colors.fg())),
                Span::styled(value, Style::default().fg(color)),
            ])
        };

        let lines = vec![
            row("Lesson: ", self.session.mode().label().to_string(), colors.accent()),
            Line::from(""),
            row(
                "Words in play: ",
                self.session.active_set().len().to_string(),
                colors.accent(),
            ),
            Line::from(""),
            row(
                "Direction: ",
                self.session.direction().arrow_label().to_string(),
                colors.accent(),
            ),
            Line::from(""),
            row("Correct: ", score.correct.to_string(), colors.success()),
            row("Wrong: ", score.wrong.to_string(), colors.error()),
            row("Accuracy: ", pct_str, pct_color),
        ];

        let block = Block::bordered()
            .title(" Session ")
            .border_style(Style::default().fg(colors.border()));
        Paragraph::new(lines).block(block).render(sections[1], buf);
    }
}
