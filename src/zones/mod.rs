//! Conflict zone records and the closed enumerations used to filter them.
//!
//! Zones are immutable once the catalog is loaded. Every dimension the filter
//! engine can constrain is a closed enum, so an unknown value cannot be
//! constructed, let alone matched.

pub mod filter;
pub mod selection;
pub mod stats;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use filter::{compute_visible, FilterCriteria, FilterDimension, FilterUpdate, FilterValue};
pub use selection::{Selection, SelectionPolicy};
pub use stats::{format_compact, ZoneSummary};

/// Geographic position, stored as `[lat, lon]` in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are inside the valid WGS84 range
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<[f64; 2]> for LatLon {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLon> for [f64; 2] {
    fn from(p: LatLon) -> Self {
        [p.lat, p.lon]
    }
}

/// Declares a closed, serde-aware enum with a display label and an `ALL` table
/// in declaration order (the order the sidebar lists them in).
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $( $variant:ident => ($wire:literal, $label:literal) ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value as it appears in the dataset
            pub fn as_str(self) -> &'static str {
                match self { $($name::$variant => $wire,)+ }
            }

            /// Human-readable label
            pub fn label(self) -> &'static str {
                match self { $($name::$variant => $label,)+ }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

closed_enum! {
    pub enum Continent {
        Africa => ("Africa", "Africa"),
        Asia => ("Asia", "Asia"),
        Europe => ("Europe", "Europe"),
        NorthAmerica => ("North America", "North America"),
        SouthAmerica => ("South America", "South America"),
        Oceania => ("Oceania", "Oceania"),
    }
}

closed_enum! {
    pub enum ConflictType {
        Ethnic => ("ethnic", "Ethnic"),
        Religious => ("religious", "Religious"),
        Territorial => ("territorial", "Territorial"),
        Resource => ("resource", "Resource"),
        Political => ("political", "Political"),
        Separatist => ("separatist", "Separatist"),
        International => ("international", "International"),
    }
}

closed_enum! {
    /// Lifecycle stage of a conflict
    pub enum PeacebuildingStatus {
        ActiveConflict => ("active-conflict", "Active conflict"),
        Ceasefire => ("ceasefire", "Ceasefire"),
        Negotiation => ("negotiation", "Negotiation"),
        PostConflict => ("post-conflict", "Post-conflict"),
        StablePeace => ("stable-peace", "Stable peace"),
        AtRisk => ("at-risk", "At risk"),
    }
}

closed_enum! {
    /// Ordered intensity label: low < medium < high < critical
    pub enum Severity {
        Low => ("low", "Low"),
        Medium => ("medium", "Medium"),
        High => ("high", "High"),
        Critical => ("critical", "Critical"),
    }
}

closed_enum! {
    pub enum EffortType {
        Negotiation => ("negotiation", "Negotiation"),
        Mediation => ("mediation", "Mediation"),
        Peacekeeping => ("peacekeeping", "Peacekeeping"),
        Reconstruction => ("reconstruction", "Reconstruction"),
        Reconciliation => ("reconciliation", "Reconciliation"),
    }
}

closed_enum! {
    pub enum EffortStatus {
        Active => ("active", "Active"),
        Completed => ("completed", "Completed"),
        Suspended => ("suspended", "Suspended"),
    }
}

closed_enum! {
    pub enum StoryCategory {
        Hope => ("hope", "Hope"),
        Challenge => ("challenge", "Challenge"),
        Success => ("success", "Success"),
        Testimony => ("testimony", "Testimony"),
    }
}

closed_enum! {
    pub enum CaseStudyStatus {
        Ongoing => ("ongoing", "Ongoing"),
        Resolved => ("resolved", "Resolved"),
        Setback => ("setback", "Setback"),
    }
}

closed_enum! {
    pub enum TimelineEventType {
        Conflict => ("conflict", "Conflict"),
        Intervention => ("intervention", "Intervention"),
        Breakthrough => ("breakthrough", "Breakthrough"),
        Setback => ("setback", "Setback"),
    }
}

closed_enum! {
    pub enum OutcomeImpact {
        Positive => ("positive", "Positive"),
        Negative => ("negative", "Negative"),
        Mixed => ("mixed", "Mixed"),
    }
}

/// A documented conflict or peacebuilding situation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictZone {
    pub id: String,
    pub name: String,
    pub coordinates: LatLon,
    pub continent: Continent,
    pub conflict_type: ConflictType,
    pub status: PeacebuildingStatus,
    pub severity: Severity,
    pub description: String,
    pub background: String,
    #[serde(default)]
    pub peace_efforts: Vec<PeaceEffort>,
    #[serde(default)]
    pub ngos: Vec<Ngo>,
    #[serde(default)]
    pub community_stories: Vec<CommunityStory>,
    pub statistics: ConflictStatistics,
    pub last_updated: NaiveDate,
}

impl ConflictZone {
    /// Case-insensitive substring match on the name only
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }

    pub fn active_efforts(&self) -> usize {
        self.peace_efforts
            .iter()
            .filter(|e| e.status == EffortStatus::Active)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeaceEffort {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EffortType,
    pub status: EffortStatus,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ngo {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub focus: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityStory {
    pub id: String,
    pub title: String,
    pub author: String,
    pub date: NaiveDate,
    pub content: String,
    pub category: StoryCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictStatistics {
    pub affected_population: u64,
    pub displacement: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casualties: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic_impact: Option<String>,
    pub duration: String,
}

/// Longer narrative about one zone's peace process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub region: String,
    pub conflict_zone_id: String,
    pub summary: String,
    pub full_story: String,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub key_players: Vec<KeyPlayer>,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
    #[serde(default)]
    pub lessons: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: CaseStudyStatus,
    pub last_updated: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub event: String,
    #[serde(rename = "type")]
    pub kind: TimelineEventType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPlayer {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub contribution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub category: String,
    pub description: String,
    pub impact: OutcomeImpact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal zone for unit tests that don't need the bundled dataset
    pub fn zone(
        id: &str,
        name: &str,
        continent: Continent,
        conflict_type: ConflictType,
        status: PeacebuildingStatus,
        severity: Severity,
    ) -> ConflictZone {
        ConflictZone {
            id: id.to_string(),
            name: name.to_string(),
            coordinates: LatLon::new(0.0, 0.0),
            continent,
            conflict_type,
            status,
            severity,
            description: String::new(),
            background: String::new(),
            peace_efforts: Vec::new(),
            ngos: Vec::new(),
            community_stories: Vec::new(),
            statistics: ConflictStatistics {
                affected_population: 0,
                displacement: 0,
                casualties: None,
                economic_impact: None,
                duration: String::new(),
            },
            last_updated: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_is_ordered() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(PeacebuildingStatus::ActiveConflict.as_str(), "active-conflict");
        assert_eq!(Continent::NorthAmerica.as_str(), "North America");
        assert_eq!(PeacebuildingStatus::ALL.len(), 6);
        assert_eq!(ConflictType::ALL.len(), 7);
    }

    #[test]
    fn test_latlon_range() {
        assert!(LatLon::new(49.8, 24.0).is_valid());
        assert!(!LatLon::new(91.0, 0.0).is_valid());
        assert!(!LatLon::new(0.0, -181.0).is_valid());
        assert!(!LatLon::new(f64::NAN, 0.0).is_valid());
    }
}
