use crate::map::projection::Viewport;
use crate::zones::{ConflictZone, Selection, Severity};

/// Horizontal reach of a click, in cells (cells are about twice as tall as wide)
const HIT_RADIUS_X: i32 = 2;
const HIT_RADIUS_Y: i32 = 1;

/// A zone placed on the character grid of the map area
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub zone_id: String,
    pub name: String,
    pub cell: (u16, u16),
    pub severity: Severity,
    pub selected: bool,
    /// Dot position, for drawing the selection ring
    pub dot: (i32, i32),
}

impl Marker {
    pub fn glyph(&self) -> char {
        severity_glyph(self.severity)
    }
}

pub fn severity_glyph(severity: Severity) -> char {
    match severity {
        Severity::Low => '·',
        Severity::Medium => '◦',
        Severity::High => '●',
        Severity::Critical => '◉',
    }
}

/// Place every on-screen zone. Order follows `zones`, so later zones win
/// when two share a cell.
pub fn place_markers(
    zones: &[&ConflictZone],
    selection: &Selection,
    viewport: &Viewport,
) -> Vec<Marker> {
    zones
        .iter()
        .filter_map(|zone| {
            let Placement { cell, dot } = locate(zone, viewport)?;
            Some(Marker {
                zone_id: zone.id.clone(),
                name: zone.name.clone(),
                cell,
                severity: zone.severity,
                selected: selection.is_selected(zone),
                dot,
            })
        })
        .collect()
}

struct Placement {
    cell: (u16, u16),
    dot: (i32, i32),
}

fn locate(zone: &ConflictZone, viewport: &Viewport) -> Option<Placement> {
    let (lat, lon) = (zone.coordinates.lat, zone.coordinates.lon);
    let cell = viewport.cell_of(lon, lat)?;
    Some(Placement {
        cell,
        dot: viewport.project(lon, lat),
    })
}

/// Marker nearest to `cell` within click reach, if any. Ties go to the
/// later marker, the one drawn on top.
pub fn hit_test(markers: &[Marker], cell: (u16, u16)) -> Option<&Marker> {
    let (x, y) = (cell.0 as i32, cell.1 as i32);
    markers
        .iter()
        .rev()
        .filter_map(|m| {
            let dx = m.cell.0 as i32 - x;
            let dy = m.cell.1 as i32 - y;
            if dx.abs() <= HIT_RADIUS_X && dy.abs() <= HIT_RADIUS_Y {
                // Weight rows double to roughly match on-screen distance
                Some((dx * dx + 4 * dy * dy, m))
            } else {
                None
            }
        })
        .min_by_key(|(dist, _)| *dist)
        .map(|(_, m)| m)
}
