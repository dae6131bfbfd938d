use super::{severity_color, status_color};
use crate::app::{App, Focus};
use crate::braille::BrailleCanvas;
use crate::map::{draw_ring, place_markers, MapLayers, Marker};
use crate::ui::layout::ScreenLayout;
use crate::zones::{format_compact, ConflictZone, EffortStatus, FilterDimension};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, layout: &ScreenLayout) {
    render_sidebar(frame, app, layout.sidebar);
    render_map(frame, app, layout.map);
    if let Some(zone) = app.selected_zone() {
        render_detail(frame, zone, app, layout.detail);
    }
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Conflict Zones ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Braille gives 2x4 resolution per character
    let mut viewport = app.viewport.clone();
    viewport.resize(inner.width as usize * 2, inner.height as usize * 4);

    let layers = app
        .map_renderer
        .render(inner.width as usize, inner.height as usize, &viewport);
    let visible = app.visible_zones();
    let markers = place_markers(&visible, &app.selection, &viewport);

    let mut rings = BrailleCanvas::new(inner.width as usize, inner.height as usize);
    for marker in markers.iter().filter(|m| m.selected) {
        draw_ring(&mut rings, marker.dot.0, marker.dot.1, 5);
    }

    frame.render_widget(
        MapWidget {
            layers,
            rings,
            markers,
        },
        inner,
    );
}

/// Braille basemap with zone markers overlaid
struct MapWidget {
    layers: MapLayers,
    rings: BrailleCanvas,
    markers: Vec<Marker>,
}

impl MapWidget {
    /// Render a braille canvas layer with a specific color
    fn render_layer(&self, canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for cy in 0..canvas.height().min(area.height as usize) {
            for cx in 0..canvas.width().min(area.width as usize) {
                if let Some(ch) = canvas.glyph(cx, cy) {
                    buf[(area.x + cx as u16, area.y + cy as u16)]
                        .set_char(ch)
                        .set_fg(color);
                }
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: coastlines, borders, selection ring, markers, label
        self.render_layer(&self.layers.coastlines, Color::Cyan, area, buf);
        self.render_layer(&self.layers.borders, Color::DarkGray, area, buf);
        self.render_layer(&self.rings, Color::White, area, buf);

        for marker in &self.markers {
            let (cx, cy) = marker.cell;
            if cx >= area.width || cy >= area.height {
                continue;
            }
            let mut style = Style::default()
                .fg(severity_color(marker.severity))
                .add_modifier(Modifier::BOLD);
            if marker.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            buf[(area.x + cx, area.y + cy)]
                .set_char(marker.glyph())
                .set_style(style);
        }

        if let Some(marker) = self.markers.iter().find(|m| m.selected) {
            let (cx, cy) = marker.cell;
            let x = area.x + cx + 2;
            let y = area.y + cy;
            if x < area.right() && y < area.bottom() {
                let max_len = (area.right() - x) as usize;
                let label: String = marker.name.chars().take(max_len).collect();
                buf.set_string(
                    x,
                    y,
                    label,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                );
            }
        }
    }
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Sidebar;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Yellow } else { Color::DarkGray }))
        .title(Span::styled(" Filters ", Style::default().fg(Color::Cyan)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    // Search box
    let searching = app.focus == Focus::Search;
    let mut search = vec![
        Span::styled("/ ", dim),
        Span::styled(
            app.criteria.search.clone(),
            Style::default().fg(if searching { Color::Yellow } else { Color::White }),
        ),
    ];
    if searching {
        search.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    } else if app.criteria.search.is_empty() {
        search.push(Span::styled("search zones", dim));
    }
    lines.push(Line::from(search));

    // Result count and headline numbers
    let total = app.catalog().map(|c| c.zones.len()).unwrap_or(0);
    let summary = app.summary();
    lines.push(Line::from(vec![
        Span::styled(app.result_count().to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(format!(" of {total} zones"), dim),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format_compact(summary.people_affected), Style::default().fg(Color::Red)),
        Span::styled(" affected  ", dim),
        Span::styled(summary.active_efforts.to_string(), Style::default().fg(Color::Green)),
        Span::styled(" efforts  ", dim),
        Span::styled(summary.ngos.to_string(), Style::default().fg(Color::Blue)),
        Span::styled(" NGOs", dim),
    ]));

    let badges = app.criteria.active_badges();
    if !badges.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("x ", dim),
            Span::styled(badges.join(", "), Style::default().fg(Color::Magenta)),
        ]));
    }

    let mut cursor_line = 0;
    let mut index = 0;
    for dimension in FilterDimension::ALL {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            dimension.title(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for value in dimension.values() {
            let checked = app.criteria.contains(value);
            let mut style = Style::default().fg(if checked { Color::White } else { Color::Gray });
            if focused && index == app.sidebar_cursor {
                style = style.add_modifier(Modifier::REVERSED);
                cursor_line = lines.len();
            }
            lines.push(Line::from(Span::styled(
                format!("{} {}", if checked { "[x]" } else { "[ ]" }, value.label()),
                style,
            )));
            index += 1;
        }
    }

    // Keep the cursor row on screen
    let scroll = cursor_line.saturating_sub(inner.height.saturating_sub(1) as usize) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn render_detail(frame: &mut Frame, zone: &ConflictZone, app: &App, area: Rect) {
    let has_case = app
        .catalog()
        .and_then(|c| c.case_study_for_zone(&zone.id))
        .is_some();
    let hint = if has_case {
        " Enter: case study  Esc: close "
    } else {
        " Esc: close "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(severity_color(zone.severity)))
        .title(Span::styled(
            format!(" {} ", zone.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Span::styled(hint, Style::default().fg(Color::Yellow)));

    let dim = Style::default().fg(Color::DarkGray);
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let stats = &zone.statistics;

    let mut lines = vec![
        Line::from(vec![
            Span::styled(zone.status.label(), Style::default().fg(status_color(zone.status))),
            Span::styled(" · ", dim),
            Span::styled(
                format!("{} severity", zone.severity.label()),
                Style::default().fg(severity_color(zone.severity)),
            ),
        ]),
        Line::from(Span::styled(
            format!("{} · {}", zone.continent.label(), zone.conflict_type.label()),
            dim,
        )),
        Line::default(),
        Line::from(zone.description.as_str()),
        Line::default(),
        Line::from(Span::styled("Statistics", heading)),
        stat_line("Affected", format_compact(stats.affected_population)),
        stat_line("Displaced", format_compact(stats.displacement)),
    ];
    if let Some(casualties) = stats.casualties {
        lines.push(stat_line("Casualties", format_compact(casualties)));
    }
    lines.push(stat_line("Duration", stats.duration.clone()));
    if let Some(impact) = &stats.economic_impact {
        lines.push(stat_line("Economy", impact.clone()));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Peace efforts ({} active)", zone.active_efforts()),
        heading,
    )));
    for effort in &zone.peace_efforts {
        let color = match effort.status {
            EffortStatus::Active => Color::Green,
            EffortStatus::Completed => Color::Blue,
            EffortStatus::Suspended => Color::DarkGray,
        };
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(color)),
            Span::raw(effort.title.as_str()),
            Span::styled(format!(" ({}, {})", effort.kind.label(), effort.status.label()), dim),
        ]));
    }

    if !zone.ngos.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Organizations", heading)));
        for ngo in &zone.ngos {
            lines.push(Line::from(vec![Span::raw("• "), Span::raw(ngo.name.as_str())]));
            lines.push(Line::from(Span::styled(format!("  {}", ngo.impact), dim)));
        }
    }

    if !zone.community_stories.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Community voices", heading)));
        for story in &zone.community_stories {
            lines.push(Line::from(vec![
                Span::raw(format!("“{}”", story.title)),
                Span::styled(format!(" by {}", story.author), dim),
            ]));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Updated {}", zone.last_updated.format("%b %-d, %Y")),
        dim,
    )));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<11}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}
