use std::time::Instant;

use ratatui::layout::Rect;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::engine::QuizError;
use crate::engine::active_set::ActiveMode;
use crate::session::quiz::QuizSession;
use crate::store::words::{WordSource, load_words};
use crate::ui::components::menu::LessonMenu;
use crate::ui::components::word_list;
use crate::ui::layout::AppLayout;
use crate::ui::password_input::{InputResult, PasswordInput};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Quiz,
    LessonSelect,
    AdminLogin,
    Admin,
    LoadFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusLine {
    fn from_error(err: &QuizError) -> Self {
        let kind = match err {
            QuizError::PartialOptions { .. } | QuizError::MissingSelection => StatusKind::Warning,
            _ => StatusKind::Error,
        };
        Self {
            text: err.to_string(),
            kind,
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    /// `None` only when the word list failed to load.
    pub session: Option<QuizSession>,
    pub load_error: Option<QuizError>,
    pub status: Option<StatusLine>,
    pub lesson_menu: Option<LessonMenu<'static>>,
    pub password: PasswordInput,
    pub word_scroll: usize,
    /// Word rows the admin list has room for at the current terminal size.
    pub word_rows: usize,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(
                theme = %config.theme,
                available = ?Theme::available_themes(),
                "unknown theme, using default"
            );
            Theme::default()
        });
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let source = WordSource::parse(&config.words_source);
        let mut app = Self {
            screen: AppScreen::Quiz,
            session: None,
            load_error: None,
            status: None,
            lesson_menu: None,
            password: PasswordInput::new(),
            word_scroll: 0,
            word_rows: 0,
            theme,
            config,
            should_quit: false,
        };

        match load_words(&source) {
            Ok(lessons) => {
                let session = QuizSession::new(
                    lessons,
                    app.config.session_options(),
                    SmallRng::from_entropy(),
                );
                app.session = Some(session);
                app.start();
            }
            Err(err) => {
                app.load_error = Some(err);
                app.screen = AppScreen::LoadFailed;
            }
        }
        app
    }

    fn start(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let result = match self.config.lesson.clone() {
            Some(lesson) => session.set_mode(ActiveMode::Single(lesson)),
            None => session.request_next_question().map(|_| ()),
        };
        if let Err(err) = result {
            self.report(&err);
            // Fall back to every lesson if the configured one is unusable
            let Some(session) = self.session.as_mut() else {
                return;
            };
            if session.question().is_none() && *session.mode() == ActiveMode::All {
                if let Err(err) = session.request_next_question().map(|_| ()) {
                    self.report(&err);
                }
            }
        }
    }

    fn report(&mut self, err: &QuizError) {
        tracing::warn!("{err}");
        self.status = Some(StatusLine::from_error(err));
    }

    fn apply(&mut self, result: Result<(), QuizError>) {
        match result {
            Ok(()) => self.status = None,
            Err(err) => self.report(&err),
        }
    }

    pub fn answer(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.select_option(index, Instant::now()).is_some() {
            self.status = None;
        }
    }

    pub fn toggle_direction(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let result = session.toggle_direction().map(|_| ());
            self.apply(result);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(result) = session.poll_timer(now) {
            self.apply(result);
        }
    }

    pub fn open_lesson_menu(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        self.lesson_menu = Some(LessonMenu::new(session.lessons(), session.mode(), self.theme));
        self.screen = AppScreen::LessonSelect;
    }

    pub fn choose_lesson(&mut self) {
        let Some(mode) = self.lesson_menu.as_ref().map(|m| m.selected_mode()) else {
            return;
        };
        self.lesson_menu = None;
        self.screen = AppScreen::Quiz;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.set_mode(mode) {
            Ok(()) => {
                let text = format!(
                    "Practising {} ({} words)",
                    session.mode().label(),
                    session.active_set().len()
                );
                self.status = Some(StatusLine {
                    text,
                    kind: StatusKind::Info,
                });
            }
            Err(err) => self.report(&err),
        }
    }

    pub fn close_lesson_menu(&mut self) {
        self.lesson_menu = None;
        self.screen = AppScreen::Quiz;
    }

    pub fn open_admin_login(&mut self) {
        self.password.clear();
        self.status = None;
        self.screen = AppScreen::AdminLogin;
    }

    pub fn handle_password_key(&mut self, key: crossterm::event::KeyEvent) {
        match self.password.handle(key) {
            InputResult::Continue => {}
            InputResult::Cancel => {
                self.password.clear();
                self.status = None;
                self.screen = AppScreen::Quiz;
            }
            InputResult::Submit => self.submit_password(),
        }
    }

    fn submit_password(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let accepted = session.admin_login(self.password.value());
        self.password.clear();
        if accepted {
            self.word_scroll = 0;
            self.status = None;
            self.screen = AppScreen::Admin;
        } else {
            self.status = Some(StatusLine {
                text: "Incorrect password. Please try again.".to_string(),
                kind: StatusKind::Error,
            });
        }
    }

    pub fn logout(&mut self) {
        self.screen = AppScreen::Quiz;
        if let Some(session) = self.session.as_mut() {
            let result = session.logout();
            self.apply(result);
        }
    }

    /// Tracks the terminal size so scrolling clamps the same way the list
    /// renders.
    pub fn resize(&mut self, area: Rect) {
        self.word_rows = word_list::visible_rows(AppLayout::new(area).main.height);
        self.scroll_words(0);
    }

    pub fn scroll_words(&mut self, delta: isize) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let max = word_list::max_scroll(session.lessons(), self.word_rows);
        self.word_scroll = self.word_scroll.saturating_add_signed(delta).min(max);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn app_with_words(json: &str, lesson: Option<&str>) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, json).unwrap();
        let config = Config {
            words_source: path.display().to_string(),
            lesson: lesson.map(str::to_string),
            ..Config::default()
        };
        (dir, App::new(config))
    }

    #[test]
    fn unknown_start_lesson_with_too_few_words_reports_shortage() {
        let json = r#"[
            {"korean": "가", "sinhalese": "ක"},
            {"korean": "나", "sinhalese": "න"}
        ]"#;
        let (_dir, app) = app_with_words(json, Some("nope"));

        assert_eq!(app.screen, AppScreen::Quiz);
        let session = app.session.as_ref().unwrap();
        assert!(session.question().is_none());
        assert_eq!(*session.mode(), ActiveMode::All);

        let status = app.status.as_ref().unwrap();
        let shortage = QuizError::InsufficientData {
            found: 2,
            required: 4,
        };
        assert_eq!(status.text, shortage.to_string());
        assert_eq!(status.kind, StatusKind::Error);
    }

    #[test]
    fn unknown_start_lesson_falls_back_to_all_lessons() {
        let json = r#"{"L1": [
            {"korean": "가", "sinhalese": "ක"},
            {"korean": "나", "sinhalese": "න"},
            {"korean": "다", "sinhalese": "ද"},
            {"korean": "라", "sinhalese": "ල"},
            {"korean": "마", "sinhalese": "ම"}
        ]}"#;
        let (_dir, app) = app_with_words(json, Some("nope"));

        let session = app.session.as_ref().unwrap();
        assert!(session.question().is_some());
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.text, QuizError::UnknownLesson("nope".to_string()).to_string());
    }

    #[test]
    fn one_step_up_from_bottom_moves_word_list() {
        let words: Vec<String> = (0..30)
            .map(|i| format!(r#"{{"korean": "ko{i}", "sinhalese": "si{i}"}}"#))
            .collect();
        let json = format!(r#"{{"L1": [{}]}}"#, words.join(","));
        let (_dir, mut app) = app_with_words(&json, None);

        // 17 rows tall: 14 for the list body, 10 of them words.
        app.resize(Rect::new(0, 0, 80, 17));
        assert_eq!(app.word_rows, 10);

        app.scroll_words(1000);
        assert_eq!(app.word_scroll, 21);
        let bottom = app.word_scroll;

        app.scroll_words(-1);
        assert_eq!(app.word_scroll, bottom - 1);

        app.scroll_words(-1000);
        assert_eq!(app.word_scroll, 0);
    }

    #[test]
    fn shrinking_terminal_reclamps_scroll() {
        let words: Vec<String> = (0..30)
            .map(|i| format!(r#"{{"korean": "ko{i}", "sinhalese": "si{i}"}}"#))
            .collect();
        let json = format!("[{}]", words.join(","));
        let (_dir, mut app) = app_with_words(&json, None);

        app.resize(Rect::new(0, 0, 80, 17));
        app.scroll_words(1000);
        app.resize(Rect::new(0, 0, 80, 27));
        assert_eq!(app.word_rows, 20);
        assert_eq!(app.word_scroll, 11);
    }
}
