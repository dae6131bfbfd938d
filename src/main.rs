use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use peacemap::app::{App, Focus, View};
use peacemap::config::{AppConfig, Args};
use peacemap::contribute::{FormField, SubmissionState};
use peacemap::data;
use peacemap::logging::{init_logging, LOG_FILE};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::info;

fn main() -> Result<()> {
    let config = AppConfig::try_from(Args::parse())?;
    let _logging = init_logging(&config.log_dir, LOG_FILE)
        .with_context(|| format!("initializing logging in {}", config.log_dir.display()))?;
    info!(?config, "Starting peacemap");

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &config);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    info!("Exiting");
    result
}

fn run(terminal: &mut DefaultTerminal, config: &AppConfig) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(size.width, size.height, config);

    if data::load_basemap(&mut app.map_renderer, &config.data_dir) == 0 {
        info!(dir = %config.data_dir.display(), "No basemap files found, using built-in outline");
    }
    if !app.map_renderer.has_data() {
        data::generate_simple_world(&mut app.map_renderer);
    }

    loop {
        terminal.draw(|frame| peacemap::ui::render(frame, &app))?;

        // ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::F(1) => return app.switch_view(View::Map),
        KeyCode::F(2) => return app.switch_view(View::CaseStudies),
        KeyCode::F(3) => return app.switch_view(View::Contribute),
        _ => {}
    }

    if app.load_state.catalog().is_none() {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.quit();
        }
        return;
    }

    match app.view {
        View::Map => match app.focus {
            Focus::Map => handle_map_key(app, key),
            Focus::Search => handle_search_key(app, key),
            Focus::Sidebar => handle_sidebar_key(app, key),
        },
        View::CaseStudies => handle_case_key(app, key),
        View::Contribute => handle_form_key(app, key),
    }
}

fn handle_map_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => app.clear_selection(),

        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Char('f') => app.focus = Focus::Sidebar,
        KeyCode::Char('x') => app.clear_filters(),

        KeyCode::Char('n') | KeyCode::Tab => app.select_next(),
        KeyCode::Char('p') | KeyCode::BackTab => app.select_prev(),
        KeyCode::Enter => app.open_case_study_for_selection(),

        // Pan with hjkl or arrow keys
        KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
        KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
        KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
        KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

        // Zoom
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

        KeyCode::Char('b') | KeyCode::Char('B') => app.map_renderer.toggle_borders(),
        KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),

        KeyCode::Char('2') => app.switch_view(View::CaseStudies),
        KeyCode::Char('3') => app.switch_view(View::Contribute),
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.focus = Focus::Map,
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_sidebar_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('f') => app.focus = Focus::Map,
        KeyCode::Up | KeyCode::Char('k') => app.sidebar_move(-1),
        KeyCode::Down | KeyCode::Char('j') => app.sidebar_move(1),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_sidebar_item(),
        KeyCode::Char('x') => app.clear_filters(),
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn handle_case_key(app: &mut App, key: KeyEvent) {
    let reading = app.open_case.is_some();
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc if reading => app.close_case_study(),
        KeyCode::Esc | KeyCode::Char('1') => app.switch_view(View::Map),
        KeyCode::Char('3') => app.switch_view(View::Contribute),
        KeyCode::Up | KeyCode::Char('k') if reading => app.scroll_case(-1),
        KeyCode::Down | KeyCode::Char('j') if reading => app.scroll_case(1),
        KeyCode::PageUp if reading => app.scroll_case(-10),
        KeyCode::PageDown if reading => app.scroll_case(10),
        KeyCode::Up | KeyCode::Char('k') => app.case_cursor_move(-1),
        KeyCode::Down | KeyCode::Char('j') => app.case_cursor_move(1),
        KeyCode::Enter => app.open_case_at_cursor(),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    if matches!(app.form.state, SubmissionState::Succeeded(_)) {
        match key.code {
            KeyCode::Enter => app.form.reset(),
            KeyCode::Esc => app.switch_view(View::Map),
            _ => {}
        }
        return;
    }
    if !app.form.is_editable() {
        return;
    }

    let on_choice = app.form.focus.is_choice();
    match key.code {
        KeyCode::Esc => app.switch_view(View::Map),
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Left if on_choice => app.form.cycle_choice(false),
        KeyCode::Right | KeyCode::Char(' ') if on_choice => app.form.cycle_choice(true),
        KeyCode::Enter if app.form.focus == FormField::Submit => app.submit_idea(),
        KeyCode::Enter => app.form.focus_next(),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char(c) => app.form.input_char(c),
        _ => {}
    }
}

/// Handle mouse events for panning, zooming and selecting
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.view != View::Map || app.load_state.catalog().is_none() {
        return;
    }
    match mouse.kind {
        // Scroll wheel zooms towards the mouse position
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        // Click selects, drag pans
        MouseEventKind::Down(MouseButton::Left) => app.begin_press(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_press(mouse.column, mouse.row),
        _ => {}
    }
}
