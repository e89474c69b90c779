use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::active_set::ActiveMode;
use crate::vocab::LessonSet;
use crate::ui::theme::Theme;

pub struct MenuItem {
    pub mode: ActiveMode,
    pub label: String,
    pub description: String,
}

/// Lesson picker: "All lessons" first, then each lesson in file order.
pub struct LessonMenu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> LessonMenu<'a> {
    pub fn new(lessons: &LessonSet, current: &ActiveMode, theme: &'a Theme) -> Self {
        let mut items = vec![MenuItem {
            mode: ActiveMode::All,
            label: "All lessons".to_string(),
            description: format!("{} words", lessons.total_entries()),
        }];
        items.extend(lessons.lessons().iter().map(|lesson| MenuItem {
            mode: ActiveMode::Single(lesson.name.clone()),
            label: lesson.name.clone(),
            description: format!("{} words", lesson.entries.len()),
        }));
        let selected = items.iter().position(|i| &i.mode == current).unwrap_or(0);

        Self {
            items,
            selected,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_mode(&self) -> ActiveMode {
        self.items[self.selected].mode.clone()
    }
}

impl Widget for &LessonMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Lessons ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            "Choose which words to practise",
            Style::default().fg(colors.fg()),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        // Keep the selection visible when the list outgrows the popup
        let visible = (layout[1].height / 2).max(1) as usize;
        let first = self.selected.saturating_sub(visible.saturating_sub(1));

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .skip(first)
                    .take(visible)
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        for (slot, (i, item)) in self
            .items
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} {}", item.label);
            let desc_text = format!("     {}", item.description);

            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default()
                        .fg(if is_selected {
                            colors.accent()
                        } else {
                            colors.fg()
                        })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    desc_text,
                    Style::default().fg(colors.text_dim()),
                )),
            ];

            if slot < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[slot], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::VocabularyEntry;

    fn lessons() -> LessonSet {
        let mut set = LessonSet::new();
        set.push_lesson("L1", vec![VocabularyEntry::new("가", "ක")]);
        set.push_lesson("L2", vec![VocabularyEntry::new("나", "න")]);
        set
    }

    #[test]
    fn starts_on_current_mode() {
        let theme = Theme::default();
        let menu = LessonMenu::new(&lessons(), &ActiveMode::Single("L2".into()), &theme);
        assert_eq!(menu.items.len(), 3);
        assert_eq!(menu.selected, 2);
        assert_eq!(menu.selected_mode(), ActiveMode::Single("L2".into()));
    }

    #[test]
    fn navigation_wraps() {
        let theme = Theme::default();
        let mut menu = LessonMenu::new(&lessons(), &ActiveMode::All, &theme);
        menu.prev();
        assert_eq!(menu.selected, 2);
        menu.next();
        assert_eq!(menu.selected_mode(), ActiveMode::All);
    }
}
