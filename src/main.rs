mod app;
mod calendar;
mod cli;
mod components;
mod config;
mod event;
mod logging;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, Modal, ViewMode};
use chrono::Local;
use clap::Parser;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = cli::Cli::parse();

    let log_path = logging::init(cli.log_file.as_deref())?;
    let config = config::Config::load(cli.config.as_deref())?;
    theme::install(config.theme.clone());

    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let index = match cli.seed {
        Some(seed) => calendar::generate(
            today,
            &config.organizations,
            cli.variant.has_ids(),
            &mut StdRng::seed_from_u64(seed),
        ),
        None => calendar::generate(
            today,
            &config.organizations,
            cli.variant.has_ids(),
            &mut rand::thread_rng(),
        ),
    };
    tracing::info!(
        variant = cli.variant.label(),
        seed = ?cli.seed,
        %today,
        log = %log_path.display(),
        "starting"
    );

    let mut app = App::new(cli.variant, today, config.organizations, index);

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    tracing::info!("exiting");
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(key) = event::next_key_event(Duration::from_millis(250))? {
            handle_key(app, key);
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: content + status bar
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

    match app.view_mode {
        ViewMode::Month => render_month_layout(frame, layout[0], app),
        ViewMode::Timeline => components::TimelineView::render(
            frame,
            layout[0],
            &app.timeline_events,
            app.timeline_cursor,
            app.today,
            app.filter_name(),
        ),
    }

    if let Some(form) = app.modal.form() {
        let is_update = matches!(app.modal, Modal::Update(_));
        components::EventForm::render(frame, area, form, &app.orgs, is_update);
    }

    if app.show_help {
        components::Help::render(frame, area);
    }

    components::StatusBar::render(frame, layout[1], app);
}

fn render_month_layout(frame: &mut Frame, area: Rect, app: &App) {
    let day_view = |frame: &mut Frame, area: Rect| {
        components::DayView::render(
            frame,
            area,
            app.selected_date,
            &app.day_events,
            app.day_cursor,
            app.filter_name(),
        );
    };

    if area.width < 60 {
        // Stack the grid above the list on narrow terminals
        let rows = Layout::vertical([Constraint::Length(9), Constraint::Min(3)]).split(area);
        components::MonthView::render(
            frame,
            rows[0],
            app.selected_date,
            app.today,
            &app.days_with_events,
        );
        day_view(frame, rows[1]);
    } else {
        let content = Layout::horizontal([Constraint::Length(38), Constraint::Min(20)]).split(area);
        components::MonthView::render(
            frame,
            content[0],
            app.selected_date,
            app.today,
            &app.days_with_events,
        );
        day_view(frame, content[1]);
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Clear status message on any key
    app.status_message = None;

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    if app.modal.is_open() {
        handle_form_input(app, key.code);
    } else {
        handle_normal_input(app, key.code, key.modifiers);
    }
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('1'), _) => app.set_view(ViewMode::Month),
        (KeyCode::Char('2'), _) => app.set_view(ViewMode::Timeline),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('o'), _) => app.next_org_filter(),
        (KeyCode::Char('O'), _) => app.prev_org_filter(),
        (KeyCode::Char('a'), _) => app.set_org_filter(None),
        (KeyCode::Char('n'), _) => app.open_create_form(),
        (KeyCode::Char('e'), _) | (KeyCode::Enter, _) => app.open_update_form(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.cursor_up(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.cursor_down(),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_event_form(),
        KeyCode::Enter => app.submit_event_form(),
        KeyCode::Tab => app.form_tab(),
        KeyCode::BackTab => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(' ') => app.form_space(),
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}
