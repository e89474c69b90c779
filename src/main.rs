mod app;
mod config;
mod engine;
mod event;
mod session;
mod store;
mod ui;
mod vocab;

use std::fs;
use std::io;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use tracing_subscriber::EnvFilter;

use app::{App, AppScreen, StatusKind};
use config::Config;
use engine::question::QuizDirection;
use event::{AppEvent, EventHandler};
use ui::components::question_card::QuestionCard;
use ui::components::session_sidebar::SessionSidebar;
use ui::components::word_list::WordList;
use ui::layout::{AppLayout, centered_rect, pack_hint_lines};

#[derive(Parser)]
#[command(name = "wordflash", version, about = "Korean/Sinhala vocabulary flashcard quiz")]
struct Cli {
    #[arg(short, long, help = "Words file path or http(s) URL (\"bundled\" for the built-in list)")]
    words: Option<String>,

    #[arg(short, long, help = "Start in a single lesson")]
    lesson: Option<String>,

    #[arg(short, long, help = "Quiz direction (ko-si, si-ko)")]
    direction: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!("falling back to default config: {err:#}");
        Config::default()
    });
    if let Some(words) = cli.words {
        config.words_source = words;
    }
    if let Some(lesson) = cli.lesson {
        config.lesson = Some(lesson);
    }
    if let Some(direction) = cli.direction {
        if QuizDirection::from_name(&direction).is_none() {
            anyhow::bail!("unknown direction '{direction}', expected ko-si or si-ko");
        }
        config.default_direction = direction;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(app.config.tick_rate());

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }
    if let Some(err) = app.load_error {
        eprintln!("{err}");
    }

    Ok(())
}

/// Logs go to a file: stdout belongs to the alternate screen.
fn init_logging() {
    let Some(dir) = dirs::data_dir().map(|d| d.join("wordflash")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("wordflash.log"))
    else {
        return;
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wordflash=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            app.resize(frame.area());
            render(frame, app);
        })?;

        match events.next()? {
            AppEvent::Key(key) => {
                handle_key(app, key);
                app.tick(Instant::now());
            }
            AppEvent::Tick(now) => app.tick(now),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::LessonSelect => handle_lesson_key(app, key),
        AppScreen::AdminLogin => app.handle_password_key(key),
        AppScreen::Admin => handle_admin_key(app, key),
        AppScreen::LoadFailed => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
                app.should_quit = true;
            }
        }
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(ch @ '1'..='4') => {
            let index = ch as usize - '1' as usize;
            app.answer(index);
        }
        KeyCode::Char('d') => app.toggle_direction(),
        KeyCode::Char('l') => app.open_lesson_menu(),
        KeyCode::Char('a') => app.open_admin_login(),
        _ => {}
    }
}

fn handle_lesson_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_lesson_menu(),
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(menu) = app.lesson_menu.as_mut() {
                menu.prev();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(menu) = app.lesson_menu.as_mut() {
                menu.next();
            }
        }
        KeyCode::Enter => app.choose_lesson(),
        _ => {}
    }
}

fn handle_admin_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('o') | KeyCode::Esc => app.logout(),
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.scroll_words(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_words(-1),
        KeyCode::PageDown => app.scroll_words(10),
        KeyCode::PageUp => app.scroll_words(-10),
        KeyCode::Home => app.word_scroll = 0,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::LessonSelect => {
            render_quiz(frame, app);
            render_lesson_menu(frame, app);
        }
        AppScreen::AdminLogin => {
            render_quiz(frame, app);
            render_admin_login(frame, app);
        }
        AppScreen::Admin => render_admin(frame, app),
        AppScreen::LoadFailed => render_load_failed(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;

    let info = match app.session.as_ref() {
        Some(session) => format!(
            " {} | {} | {} ",
            session.mode().label(),
            session.direction().arrow_label(),
            session.score().label(),
        ),
        None => String::new(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " wordflash ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, hints: &[&str]) {
    let colors = &app.theme.colors;

    let mut lines: Vec<Line> = Vec::new();
    if let Some(status) = app.status.as_ref() {
        let color = match status.kind {
            StatusKind::Info => colors.accent(),
            StatusKind::Warning => colors.warning(),
            StatusKind::Error => colors.error(),
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", status.text),
            Style::default().fg(color),
        )));
    }
    let remaining = (area.height as usize).saturating_sub(lines.len());
    lines.extend(
        pack_hint_lines(hints, area.width as usize)
            .into_iter()
            .take(remaining)
            .map(|hint| Line::from(Span::styled(hint, Style::default().fg(colors.text_dim())))),
    );
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let app_layout = AppLayout::new(area);

    render_header(frame, app, app_layout.header);

    let Some(session) = app.session.as_ref() else {
        return;
    };

    match session.question() {
        Some(question) => {
            let card = QuestionCard::new(question, session.feedback(), app.theme)
                .columns(app_layout.tier.option_columns())
                .countdown(session.advance_remaining(Instant::now()));
            frame.render_widget(card, app_layout.main);
        }
        None => {
            let block = Block::bordered()
                .title(" Question ")
                .border_style(Style::default().fg(colors.border()));
            let message = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No question to show.",
                    Style::default().fg(colors.warning()),
                )),
                Line::from(Span::styled(
                    "Press [l] to pick another lesson.",
                    Style::default().fg(colors.text_dim()),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(message, app_layout.main);
        }
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        frame.render_widget(SessionSidebar::new(session, app.theme), sidebar_area);
    }

    let toggle_hint = format!("[d] {}", session.direction().toggle_label());
    render_footer(
        frame,
        app,
        app_layout.footer,
        &[
            "[1-4] Answer",
            &toggle_hint,
            "[l] Lessons",
            "[a] Admin",
            "[q] Quit",
        ],
    );
}

fn render_lesson_menu(frame: &mut ratatui::Frame, app: &App) {
    let Some(menu) = app.lesson_menu.as_ref() else {
        return;
    };
    let area = centered_rect(50, 70, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(menu, area);
}

fn render_admin_login(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let area = centered_rect(40, 30, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Admin ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    Paragraph::new(Line::from(Span::styled(
        "  Password:",
        Style::default().fg(colors.fg()),
    )))
    .render(layout[0], frame.buffer_mut());

    let (before, on_char, after) = app.password.masked_parts();
    let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
    let field_style = Style::default().fg(colors.prompt());
    let mut spans = vec![Span::raw("  "), Span::styled(before, field_style)];
    if on_char {
        spans.push(Span::styled("•", cursor_style));
        spans.push(Span::styled(after, field_style));
    } else {
        spans.push(Span::styled(" ", cursor_style));
    }
    Paragraph::new(Line::from(spans)).render(layout[1], frame.buffer_mut());

    if let Some(status) = app.status.as_ref() {
        if status.kind == StatusKind::Error {
            Paragraph::new(Line::from(Span::styled(
                status.text.as_str(),
                Style::default().fg(colors.error()),
            )))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout[2], frame.buffer_mut());
        }
    }

    Paragraph::new(Line::from(Span::styled(
        "  [Enter] Log in  [Esc] Cancel",
        Style::default().fg(colors.text_dim()),
    )))
    .render(layout[3], frame.buffer_mut());
}

fn render_admin(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let app_layout = AppLayout::new(area);

    render_header(frame, app, app_layout.header);

    let Some(session) = app.session.as_ref() else {
        return;
    };
    let body = Rect {
        width: area.width,
        ..app_layout.main
    };
    frame.render_widget(WordList::new(session.lessons(), app.word_scroll, app.theme), body);

    render_footer(
        frame,
        app,
        app_layout.footer,
        &["[j/k] Scroll", "[PgUp/PgDn] Page", "[o] Log out", "[q] Quit"],
    );
}

fn render_load_failed(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let area = centered_rect(60, 40, frame.area());

    let reason = app
        .load_error
        .as_ref()
        .map(|err| err.to_string())
        .unwrap_or_default();

    let block = Block::bordered()
        .title(" Words unavailable ")
        .border_style(Style::default().fg(colors.error()))
        .style(Style::default().bg(colors.bg()));
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "The quiz cannot start without a word list.",
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(reason, Style::default().fg(colors.error()))),
        Line::from(""),
        Line::from(Span::styled(
            "Check --words or words_source in config.toml. [q] Quit",
            Style::default().fg(colors.text_dim()),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
