use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;
use crate::vocab::LessonSet;

enum Row<'a> {
    Lesson { name: &'a str, count: usize },
    Word { korean: &'a str, sinhalese: &'a str },
}

fn build_rows(lessons: &LessonSet) -> Vec<Row<'_>> {
    let mut rows = Vec::with_capacity(lessons.total_entries() + lessons.lessons().len());
    for lesson in lessons.lessons() {
        rows.push(Row::Lesson {
            name: &lesson.name,
            count: lesson.entries.len(),
        });
        rows.extend(lesson.entries.iter().map(|entry| Row::Word {
            korean: &entry.korean,
            sinhalese: &entry.sinhalese,
        }));
    }
    rows
}

/// Number of scrollable rows the admin list shows for `lessons`.
pub fn row_count(lessons: &LessonSet) -> usize {
    lessons.total_entries() + lessons.lessons().len()
}

/// Word rows that fit when the list is drawn `height` rows tall: borders
/// and the column header take four.
pub fn visible_rows(height: u16) -> usize {
    height.saturating_sub(4) as usize
}

/// Largest scroll offset that still fills the view.
pub fn max_scroll(lessons: &LessonSet, visible: usize) -> usize {
    row_count(lessons).saturating_sub(visible)
}

/// Read-only admin listing of every loaded word, grouped by lesson.
pub struct WordList<'a> {
    lessons: &'a LessonSet,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> WordList<'a> {
    pub fn new(lessons: &'a LessonSet, scroll: usize, theme: &'a Theme) -> Self {
        Self {
            lessons,
            scroll,
            theme,
        }
    }
}

impl Widget for WordList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                format!(" Word List ({} words) ", self.lessons.total_entries()),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(colors.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);
        let header_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(sections[0]);
        let body_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(sections[1]);

        let header_style = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);
        Paragraph::new(Line::from(Span::styled("  Korean", header_style)))
            .render(header_cols[0], buf);
        Paragraph::new(Line::from(Span::styled("Sinhala", header_style)))
            .render(header_cols[1], buf);

        let rows = build_rows(self.lessons);
        let visible = visible_rows(area.height);
        let first = self.scroll.min(max_scroll(self.lessons, visible));

        let mut left: Vec<Line> = Vec::with_capacity(visible);
        let mut right: Vec<Line> = Vec::with_capacity(visible);
        for row in rows.iter().skip(first).take(visible) {
            match row {
                Row::Lesson { name, count } => {
                    left.push(Line::from(Span::styled(
                        format!("  {name}"),
                        Style::default().fg(colors.prompt()).add_modifier(Modifier::BOLD),
                    )));
                    right.push(Line::from(Span::styled(
                        format!("{count} words"),
                        Style::default().fg(colors.text_dim()),
                    )));
                }
                Row::Word { korean, sinhalese } => {
                    left.push(Line::from(Span::styled(
                        format!("    {korean}"),
                        Style::default().fg(colors.fg()),
                    )));
                    right.push(Line::from(Span::styled(
                        *sinhalese,
                        Style::default().fg(colors.fg()),
                    )));
                }
            }
        }

        Paragraph::new(left).render(body_cols[0], buf);
        Paragraph::new(right).render(body_cols[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::VocabularyEntry;

    #[test]
    fn rows_interleave_lesson_headers() {
        let mut lessons = LessonSet::new();
        lessons.push_lesson("L1", vec![VocabularyEntry::new("가", "ක")]);
        lessons.push_lesson(
            "L2",
            vec![VocabularyEntry::new("나", "න"), VocabularyEntry::new("다", "ද")],
        );
        let rows = build_rows(&lessons);
        assert_eq!(rows.len(), row_count(&lessons));
        assert!(matches!(rows[0], Row::Lesson { name: "L1", count: 1 }));
        assert!(matches!(rows[2], Row::Lesson { name: "L2", count: 2 }));
        assert!(matches!(rows[4], Row::Word { korean: "다", .. }));
    }

    #[test]
    fn renders_words_into_buffer() {
        let mut lessons = LessonSet::new();
        lessons.push_lesson("L1", vec![VocabularyEntry::new("water", "watura")]);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        WordList::new(&lessons, 0, &theme).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("water"));
        assert!(text.contains("watura"));
    }

    #[test]
    fn scroll_stops_when_last_row_reaches_bottom() {
        let mut lessons = LessonSet::new();
        let words = (0..30)
            .map(|i| VocabularyEntry::new(&format!("ko{i}"), &format!("si{i}")))
            .collect();
        lessons.push_lesson("L1", words);

        let visible = visible_rows(14);
        assert_eq!(visible, 10);
        assert_eq!(max_scroll(&lessons, visible), 21);
        assert_eq!(max_scroll(&lessons, 100), 0);
    }

    #[test]
    fn bottom_scroll_shows_last_page() {
        let mut lessons = LessonSet::new();
        let words = (0..30)
            .map(|i| VocabularyEntry::new(&format!("ko{i}"), &format!("si{i}")))
            .collect();
        lessons.push_lesson("L1", words);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 14);

        let render = |scroll| {
            let mut buf = Buffer::empty(area);
            WordList::new(&lessons, scroll, &theme).render(area, &mut buf);
            buf.content().iter().map(|c| c.symbol()).collect::<String>()
        };

        let bottom = render(max_scroll(&lessons, visible_rows(14)));
        assert!(bottom.contains("ko29"));
        assert!(bottom.contains("ko20"));
        assert!(!bottom.contains("ko19"));

        let one_up = render(max_scroll(&lessons, visible_rows(14)) - 1);
        assert!(one_up.contains("ko19"));
        assert!(!one_up.contains("ko29"));
    }
}
