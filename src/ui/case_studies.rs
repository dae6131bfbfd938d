use crate::app::App;
use crate::zones::{CaseStudy, CaseStudyStatus, OutcomeImpact, TimelineEventType};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.open_case() {
        Some(study) => render_detail(frame, study, app.case_scroll, area),
        None => render_list(frame, app, area),
    }
}

fn case_status_color(status: CaseStudyStatus) -> Color {
    match status {
        CaseStudyStatus::Ongoing => Color::Yellow,
        CaseStudyStatus::Resolved => Color::Green,
        CaseStudyStatus::Setback => Color::Red,
    }
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Case Studies ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let studies = app.case_studies();
    if studies.is_empty() {
        frame.render_widget(
            Paragraph::new("No case studies available.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = studies
        .iter()
        .map(|study| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        study.title.as_str(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  [{}]", study.status.label()),
                        Style::default().fg(case_status_color(study.status)),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {} · {}", study.region, study.subtitle),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(format!("  {}", study.summary)),
                Line::default(),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.case_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, study: &CaseStudy, scroll: u16, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(case_status_color(study.status)))
        .title(Span::styled(
            format!(" {} ", study.title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));

    let dim = Style::default().fg(Color::DarkGray);
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(study.subtitle.as_str(), Style::default().fg(Color::White))),
        Line::from(Span::styled(
            format!(
                "{} · {} · updated {}",
                study.region,
                study.status.label(),
                study.last_updated.format("%b %-d, %Y")
            ),
            dim,
        )),
        Line::default(),
        Line::from(Span::styled("Summary", heading)),
        Line::from(study.summary.as_str()),
        Line::default(),
        Line::from(Span::styled("The Story", heading)),
    ];
    lines.extend(study.full_story.split("\n\n").map(|p| Line::from(p.trim())));

    if !study.timeline.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Timeline", heading)));
        for event in &study.timeline {
            let color = match event.kind {
                TimelineEventType::Conflict => Color::Red,
                TimelineEventType::Intervention => Color::Blue,
                TimelineEventType::Breakthrough => Color::Green,
                TimelineEventType::Setback => Color::Yellow,
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", event.date.format("%Y-%m")), dim),
                Span::styled("● ", Style::default().fg(color)),
                Span::styled(event.event.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(Span::styled(format!("         {}", event.description), dim)));
        }
    }

    if !study.key_players.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Key Players", heading)));
        for player in &study.key_players {
            let role = match &player.organization {
                Some(org) => format!("{}, {}", player.role, org),
                None => player.role.clone(),
            };
            lines.push(Line::from(vec![
                Span::styled(player.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!(" ({role})"), dim),
            ]));
            lines.push(Line::from(format!("  {}", player.contribution)));
        }
    }

    if !study.outcomes.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Outcomes", heading)));
        for outcome in &study.outcomes {
            let (mark, color) = match outcome.impact {
                OutcomeImpact::Positive => ("+", Color::Green),
                OutcomeImpact::Negative => ("-", Color::Red),
                OutcomeImpact::Mixed => ("~", Color::Yellow),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{mark} "), Style::default().fg(color)),
                Span::styled(
                    outcome.category.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(": {}", outcome.description)),
            ]));
            if let Some(metrics) = &outcome.metrics {
                lines.push(Line::from(Span::styled(format!("  {metrics}"), dim)));
            }
        }
    }

    if !study.lessons.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Lessons Learned", heading)));
        for (i, lesson) in study.lessons.iter().enumerate() {
            lines.push(Line::from(format!("{}. {}", i + 1, lesson)));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        area,
    );
}
