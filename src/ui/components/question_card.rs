use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::question::QuestionInstance;
use crate::session::quiz::{AnswerFeedback, OptionStyle};
use crate::ui::theme::Theme;

pub struct QuestionCard<'a> {
    question: &'a QuestionInstance,
    feedback: Option<&'a AnswerFeedback>,
    columns: usize,
    countdown: Option<Duration>,
    theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(
        question: &'a QuestionInstance,
        feedback: Option<&'a AnswerFeedback>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            question,
            feedback,
            columns: 2,
            countdown: None,
            theme,
        }
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Time until the next question, shown beside the answer feedback.
    pub fn countdown(mut self, remaining: Option<Duration>) -> Self {
        self.countdown = remaining;
        self
    }

    fn option_style(&self, idx: usize) -> (Style, Style) {
        let colors = &self.theme.colors;
        match self.feedback.and_then(|fb| fb.styles.get(idx)) {
            Some(OptionStyle::Correct) => (
                Style::default()
                    .fg(colors.answer_correct())
                    .bg(colors.answer_correct_bg())
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(colors.answer_correct()),
            ),
            Some(OptionStyle::Wrong) => (
                Style::default()
                    .fg(colors.answer_wrong())
                    .bg(colors.answer_wrong_bg()),
                Style::default().fg(colors.answer_wrong()),
            ),
            None => (
                Style::default().fg(colors.fg()),
                Style::default().fg(colors.border()),
            ),
        }
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Question ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let option_count = self.question.options.len();
        let rows = option_count.div_ceil(self.columns);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Length(rows as u16 * 3),
                Constraint::Min(0),
            ])
            .split(inner);

        let prompt_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.question.prompt_text(),
                Style::default()
                    .fg(colors.prompt())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.question.direction.instruction(),
                Style::default().fg(colors.text_dim()),
            )),
        ];
        Paragraph::new(prompt_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let status = match self.feedback {
            Some(fb) => {
                let color = if fb.delta.is_correct() {
                    colors.success()
                } else {
                    colors.error()
                };
                let mut spans = vec![Span::styled(
                    fb.message(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )];
                if let Some(left) = self.countdown {
                    spans.push(Span::styled(
                        format!("  next in {:.1}s", left.as_secs_f64()),
                        Style::default().fg(colors.text_dim()),
                    ));
                }
                Line::from(spans)
            }
            None if self.question.is_partial() => Line::from(Span::styled(
                format!("Only {option_count} options could be built from this lesson"),
                Style::default().fg(colors.warning()),
            )),
            None => Line::from(""),
        };
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints((0..rows).map(|_| Constraint::Length(3)).collect::<Vec<_>>())
            .split(layout[2]);

        for (row, row_area) in row_areas.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    (0..self.columns)
                        .map(|_| Constraint::Ratio(1, self.columns as u32))
                        .collect::<Vec<_>>(),
                )
                .split(*row_area);

            for (col, cell) in cells.iter().enumerate() {
                let idx = row * self.columns + col;
                let Some(option) = self.question.options.get(idx) else {
                    continue;
                };
                let (text_style, border_style) = self.option_style(idx);
                let option_block = Block::bordered().border_style(border_style);
                let option_inner = option_block.inner(*cell);
                option_block.render(*cell, buf);

                let label = Line::from(vec![
                    Span::styled(
                        format!("[{}] ", idx + 1),
                        Style::default().fg(colors.accent()),
                    ),
                    Span::styled(option.as_str(), text_style),
                ]);
                Paragraph::new(label).render(option_inner, buf);
            }
        }
    }
}
