use crate::app::App;
use crate::contribute::{ContributionForm, ContributionIdea, FormField, SubmissionState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Share a Peacebuilding Idea ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let lines = match &app.form.state {
        SubmissionState::Succeeded(idea) => receipt_lines(idea),
        SubmissionState::Submitting { since } => {
            let dots = 1 + (since.elapsed().as_millis() / 400 % 3) as usize;
            vec![
                Line::default(),
                Line::from(Span::styled(
                    format!("Submitting your idea{}", ".".repeat(dots)),
                    Style::default().fg(Color::Yellow),
                )),
            ]
        }
        SubmissionState::Idle | SubmissionState::Failed(_) => form_lines(&app.form),
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn form_lines(form: &ContributionForm) -> Vec<Line<'_>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            "Tab/↑↓ move between fields, ←→ change a choice, Enter on Submit sends.",
            dim,
        )),
        Line::default(),
    ];

    if let SubmissionState::Failed(message) = &form.state {
        lines.push(Line::from(Span::styled(
            format!("Submission failed: {message}"),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::default());
    }

    for field in FormField::ORDER {
        let focused = form.focus == field;
        if field == FormField::Submit {
            lines.push(Line::default());
            let style = if focused {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green)
            };
            lines.push(Line::from(Span::styled(format!("[ {} ]", field.label()), style)));
            continue;
        }

        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let text = form.text(field);
        let mut value = vec![Span::styled(if focused { "> " } else { "  " }, label_style)];
        if field.is_choice() {
            let shown = if text.is_empty() { "choose one" } else { text };
            value.push(Span::styled(
                format!("‹ {shown} ›"),
                if text.is_empty() { dim } else { Style::default().fg(Color::White) },
            ));
            if let (FormField::ImplementationLevel, Some(level)) =
                (field, form.draft.implementation_level)
            {
                value.push(Span::styled(format!("  {}", level.description()), dim));
            }
        } else {
            value.push(Span::raw(text));
            if focused {
                value.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
            }
        }
        lines.push(Line::from(value));

        if let Some(error) = form.errors.get(field) {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            )));
        }
    }
    lines
}

fn receipt_lines(idea: &ContributionIdea) -> Vec<Line<'_>> {
    let dim = Style::default().fg(Color::DarkGray);
    vec![
        Line::default(),
        Line::from(Span::styled(
            "Thank you! Your idea has been received.",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![Span::styled("Title      ", dim), Span::raw(idea.idea.title.as_str())]),
        Line::from(vec![Span::styled("Category   ", dim), Span::raw(idea.idea.category.label())]),
        Line::from(vec![Span::styled("Reference  ", dim), Span::raw(idea.id.as_str())]),
        Line::from(vec![
            Span::styled("Submitted  ", dim),
            Span::raw(idea.submitted_at.format("%Y-%m-%d %H:%M UTC").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Status     ", dim),
            Span::styled(idea.status.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "Press Enter to submit another idea.",
            Style::default().fg(Color::Cyan),
        )),
    ]
}
