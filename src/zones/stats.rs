use super::ConflictZone;

/// Headline numbers over the currently visible zones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneSummary {
    pub zones: usize,
    pub active_efforts: usize,
    pub people_affected: u64,
    pub ngos: usize,
}

impl ZoneSummary {
    pub fn of(zones: &[&ConflictZone]) -> Self {
        zones.iter().fold(Self::default(), |acc, zone| Self {
            zones: acc.zones + 1,
            active_efforts: acc.active_efforts + zone.active_efforts(),
            people_affected: acc
                .people_affected
                .saturating_add(zone.statistics.affected_population),
            ngos: acc.ngos + zone.ngos.len(),
        })
    }
}

/// Compact count: `1.2B`, `44.0M`, `750K`, `999`
///
/// Unit thresholds sit where the smaller unit would round up to 1000.
pub fn format_compact(n: u64) -> String {
    if n >= 999_950_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 999_500 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.0}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
