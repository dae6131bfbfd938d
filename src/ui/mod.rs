mod case_studies;
mod contribute;
pub mod layout;
mod map_view;

use crate::app::{App, Focus, View};
use crate::contribute::SubmissionState;
use crate::data::LoadState;
use crate::zones::{PeacebuildingStatus, Severity};
use layout::ScreenLayout;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let layout = ScreenLayout::new(frame.area());
    render_tabs(frame, app, layout.tabs);

    match &app.load_state {
        LoadState::Loading { since } => {
            let frame_idx = (since.elapsed().as_millis() / 150) as usize % SPINNER.len();
            render_message(
                frame,
                layout.body,
                format!("{} Loading conflict data...", SPINNER[frame_idx]),
                Color::Cyan,
            );
        }
        LoadState::Failed(message) => {
            render_message(
                frame,
                layout.body,
                format!("Could not load conflict data: {message}"),
                Color::Red,
            );
        }
        LoadState::Ready(_) => match app.view {
            View::Map => map_view::render(frame, app, &layout),
            View::CaseStudies => case_studies::render(frame, app, layout.body),
            View::Contribute => contribute::render(frame, app, layout.body),
        },
    }

    render_status_bar(frame, app, layout.status);
}

pub(crate) fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => Color::Green,
        Severity::Medium => Color::Yellow,
        Severity::High => Color::LightRed,
        Severity::Critical => Color::Red,
    }
}

pub(crate) fn status_color(status: PeacebuildingStatus) -> Color {
    match status {
        PeacebuildingStatus::ActiveConflict => Color::Red,
        PeacebuildingStatus::Ceasefire => Color::Yellow,
        PeacebuildingStatus::Negotiation => Color::Blue,
        PeacebuildingStatus::PostConflict => Color::Magenta,
        PeacebuildingStatus::StablePeace => Color::Green,
        PeacebuildingStatus::AtRisk => Color::LightYellow,
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " ☮ peacemap ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    for (i, view) in View::ALL.iter().enumerate() {
        let style = if *view == app.view {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" F{} {} ", i + 1, view.title()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_message(frame: &mut Frame, area: Rect, text: String, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mid = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1.min(inner.height));
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(color))).alignment(Alignment::Center),
        mid,
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);

    if let Some(notice) = &app.notice {
        let line = Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let status = match app.view {
        View::Map => Line::from(vec![
            Span::styled(" Zoom: ", dim),
            Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
            Span::styled(" (", dim),
            Span::styled(app.lod_level(), Style::default().fg(Color::Magenta)),
            Span::styled(") ", dim),
            Span::styled(
                if app.map_renderer.show_borders {
                    "[B]order "
                } else {
                    "[b]order "
                },
                Style::default().fg(if app.map_renderer.show_borders {
                    Color::Green
                } else {
                    Color::DarkGray
                }),
            ),
            Span::styled("| ", dim),
            Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
            Span::styled(
                match app.focus {
                    Focus::Map => {
                        " | click:select n/p:cycle /:search f:filters x:clear Enter:case q:quit"
                    }
                    Focus::Search => " | type to search  Enter/Esc:done",
                    Focus::Sidebar => " | ↑↓:move space:toggle x:clear Esc:done",
                },
                dim,
            ),
        ]),
        View::CaseStudies => Line::from(Span::styled(
            if app.open_case.is_some() {
                " ↑↓:scroll Esc:back to list F1:map q:quit"
            } else {
                " ↑↓:choose Enter:read F1:map q:quit"
            },
            dim,
        )),
        View::Contribute => Line::from(Span::styled(
            match app.form.state {
                SubmissionState::Succeeded(_) => " Enter:submit another F1:map Ctrl-C:quit",
                SubmissionState::Submitting { .. } => " Sending...",
                _ => " Tab:next field Shift-Tab:previous Esc:map Ctrl-C:quit",
            },
            dim,
        )),
    };

    frame.render_widget(Paragraph::new(status), area);
}
