use super::{ConflictType, ConflictZone, Continent, PeacebuildingStatus, Severity};

/// Current filter state. An empty list places no constraint on its dimension.
///
/// Lists keep insertion order so active-filter badges read in the order the
/// user picked them; membership is all that matters for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub continents: Vec<Continent>,
    pub conflict_types: Vec<ConflictType>,
    pub statuses: Vec<PeacebuildingStatus>,
    pub severities: Vec<Severity>,
    pub search: String,
}

/// Partial update: `Some` replaces the whole field, `None` leaves it alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub continents: Option<Vec<Continent>>,
    pub conflict_types: Option<Vec<ConflictType>>,
    pub statuses: Option<Vec<PeacebuildingStatus>>,
    pub severities: Option<Vec<Severity>>,
    pub search: Option<String>,
}

impl FilterUpdate {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn continents(values: Vec<Continent>) -> Self {
        Self {
            continents: Some(values),
            ..Self::default()
        }
    }

    pub fn severities(values: Vec<Severity>) -> Self {
        Self {
            severities: Some(values),
            ..Self::default()
        }
    }
}

/// The four set-valued filter dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Continent,
    ConflictType,
    Status,
    Severity,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 4] = [
        FilterDimension::Continent,
        FilterDimension::ConflictType,
        FilterDimension::Status,
        FilterDimension::Severity,
    ];

    pub fn title(self) -> &'static str {
        match self {
            FilterDimension::Continent => "Continents",
            FilterDimension::ConflictType => "Conflict Types",
            FilterDimension::Status => "Peace Status",
            FilterDimension::Severity => "Severity",
        }
    }

    /// Every value selectable in this dimension, in display order
    pub fn values(self) -> Vec<FilterValue> {
        match self {
            FilterDimension::Continent => {
                Continent::ALL.iter().copied().map(FilterValue::Continent).collect()
            }
            FilterDimension::ConflictType => ConflictType::ALL
                .iter()
                .copied()
                .map(FilterValue::ConflictType)
                .collect(),
            FilterDimension::Status => PeacebuildingStatus::ALL
                .iter()
                .copied()
                .map(FilterValue::Status)
                .collect(),
            FilterDimension::Severity => {
                Severity::ALL.iter().copied().map(FilterValue::Severity).collect()
            }
        }
    }
}

/// One value in one dimension; pairs the field with a value of the right type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterValue {
    Continent(Continent),
    ConflictType(ConflictType),
    Status(PeacebuildingStatus),
    Severity(Severity),
}

impl FilterValue {
    pub fn dimension(self) -> FilterDimension {
        match self {
            FilterValue::Continent(_) => FilterDimension::Continent,
            FilterValue::ConflictType(_) => FilterDimension::ConflictType,
            FilterValue::Status(_) => FilterDimension::Status,
            FilterValue::Severity(_) => FilterDimension::Severity,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterValue::Continent(v) => v.label(),
            FilterValue::ConflictType(v) => v.label(),
            FilterValue::Status(v) => v.label(),
            FilterValue::Severity(v) => v.label(),
        }
    }
}

/// Remove `value` if present, append it otherwise
fn toggled<T: Copy + PartialEq>(current: &[T], value: T) -> Vec<T> {
    if current.contains(&value) {
        current.iter().copied().filter(|v| *v != value).collect()
    } else {
        let mut next = current.to_vec();
        next.push(value);
        next
    }
}

/// Empty constraint list matches everything
#[inline(always)]
fn admits<T: PartialEq>(allowed: &[T], value: &T) -> bool {
    allowed.is_empty() || allowed.contains(value)
}

impl FilterCriteria {
    /// Shallow per-field replacement
    pub fn update(&mut self, update: FilterUpdate) {
        if let Some(continents) = update.continents {
            self.continents = continents;
        }
        if let Some(conflict_types) = update.conflict_types {
            self.conflict_types = conflict_types;
        }
        if let Some(statuses) = update.statuses {
            self.statuses = statuses;
        }
        if let Some(severities) = update.severities {
            self.severities = severities;
        }
        if let Some(search) = update.search {
            self.search = search;
        }
    }

    /// Reset every dimension to its empty default
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Flip membership of `value` in its dimension
    pub fn toggle(&mut self, value: FilterValue) {
        let update = match value {
            FilterValue::Continent(v) => FilterUpdate {
                continents: Some(toggled(&self.continents, v)),
                ..FilterUpdate::default()
            },
            FilterValue::ConflictType(v) => FilterUpdate {
                conflict_types: Some(toggled(&self.conflict_types, v)),
                ..FilterUpdate::default()
            },
            FilterValue::Status(v) => FilterUpdate {
                statuses: Some(toggled(&self.statuses, v)),
                ..FilterUpdate::default()
            },
            FilterValue::Severity(v) => FilterUpdate {
                severities: Some(toggled(&self.severities, v)),
                ..FilterUpdate::default()
            },
        };
        self.update(update);
    }

    pub fn contains(&self, value: FilterValue) -> bool {
        match value {
            FilterValue::Continent(v) => self.continents.contains(&v),
            FilterValue::ConflictType(v) => self.conflict_types.contains(&v),
            FilterValue::Status(v) => self.statuses.contains(&v),
            FilterValue::Severity(v) => self.severities.contains(&v),
        }
    }

    /// True when any dimension constrains the result
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || !self.continents.is_empty()
            || !self.conflict_types.is_empty()
            || !self.statuses.is_empty()
            || !self.severities.is_empty()
    }

    /// Labels for every active constraint, search first
    pub fn active_badges(&self) -> Vec<String> {
        let mut badges = Vec::new();
        if !self.search.is_empty() {
            badges.push(format!("\"{}\"", self.search));
        }
        badges.extend(self.continents.iter().map(|v| v.label().to_string()));
        badges.extend(self.conflict_types.iter().map(|v| v.label().to_string()));
        badges.extend(self.statuses.iter().map(|v| v.label().to_string()));
        badges.extend(self.severities.iter().map(|v| v.label().to_string()));
        badges
    }

    /// Whether a single zone passes all five predicates
    pub fn matches(&self, zone: &ConflictZone) -> bool {
        self.matches_with_needle(zone, &self.search.to_lowercase())
    }

    fn matches_with_needle(&self, zone: &ConflictZone, needle_lower: &str) -> bool {
        (needle_lower.is_empty() || zone.name_contains(needle_lower))
            && admits(&self.continents, &zone.continent)
            && admits(&self.conflict_types, &zone.conflict_type)
            && admits(&self.statuses, &zone.status)
            && admits(&self.severities, &zone.severity)
    }
}

/// Visible subset of `zones` under `criteria`, in dataset order
pub fn compute_visible<'a>(
    zones: &'a [ConflictZone],
    criteria: &FilterCriteria,
) -> Vec<&'a ConflictZone> {
    // Lower-case the needle once rather than per zone
    let needle = criteria.search.to_lowercase();
    zones
        .iter()
        .filter(|zone| criteria.matches_with_needle(zone, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::fixtures::zone;

    fn sample() -> Vec<ConflictZone> {
        vec![
            zone(
                "a",
                "Alpha Ridge",
                Continent::Europe,
                ConflictType::Territorial,
                PeacebuildingStatus::ActiveConflict,
                Severity::Critical,
            ),
            zone(
                "b",
                "Bravo Delta",
                Continent::Asia,
                ConflictType::Political,
                PeacebuildingStatus::PostConflict,
                Severity::High,
            ),
            zone(
                "c",
                "Charlie Basin",
                Continent::Africa,
                ConflictType::Ethnic,
                PeacebuildingStatus::Ceasefire,
                Severity::High,
            ),
            zone(
                "d",
                "Delta Coast",
                Continent::Asia,
                ConflictType::Territorial,
                PeacebuildingStatus::ActiveConflict,
                Severity::Critical,
            ),
        ]
    }

    fn ids(zones: &[&ConflictZone]) -> Vec<String> {
        zones.iter().map(|z| z.id.clone()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything_in_order() {
        let zones = sample();
        let visible = compute_visible(&zones, &FilterCriteria::default());
        assert_eq!(ids(&visible), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_name_only() {
        let mut zones = sample();
        zones[0].description = "delta mentioned only in the description".into();
        let mut criteria = FilterCriteria::default();
        criteria.update(FilterUpdate::search("DELTA"));
        assert_eq!(ids(&compute_visible(&zones, &criteria)), vec!["b", "d"]);
    }

    #[test]
    fn test_each_dimension_in_isolation() {
        let zones = sample();

        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::Continent(Continent::Asia));
        assert_eq!(ids(&compute_visible(&zones, &c)), vec!["b", "d"]);

        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::ConflictType(ConflictType::Ethnic));
        assert_eq!(ids(&compute_visible(&zones, &c)), vec!["c"]);

        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::Status(PeacebuildingStatus::ActiveConflict));
        assert_eq!(ids(&compute_visible(&zones, &c)), vec!["a", "d"]);

        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::Severity(Severity::High));
        assert_eq!(ids(&compute_visible(&zones, &c)), vec!["b", "c"]);
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let zones = sample();
        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::Continent(Continent::Asia));
        c.toggle(FilterValue::Severity(Severity::Critical));
        assert_eq!(ids(&compute_visible(&zones, &c)), vec!["d"]);
    }

    #[test]
    fn test_values_within_a_dimension_combine_with_or() {
        let zones = sample();
        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::Continent(Continent::Africa));
        c.toggle(FilterValue::Continent(Continent::Europe));
        assert_eq!(ids(&compute_visible(&zones, &c)), vec!["a", "c"]);
    }

    #[test]
    fn test_unmatched_value_filters_out_everything() {
        let zones = sample();
        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::Continent(Continent::Oceania));
        assert!(compute_visible(&zones, &c).is_empty());
    }

    #[test]
    fn test_update_replaces_rather_than_merges() {
        let mut c = FilterCriteria::default();
        c.update(FilterUpdate::continents(vec![Continent::Asia, Continent::Europe]));
        c.update(FilterUpdate::continents(vec![Continent::Africa]));
        assert_eq!(c.continents, vec![Continent::Africa]);
        // Untouched fields survive
        c.update(FilterUpdate::search("x"));
        assert_eq!(c.continents, vec![Continent::Africa]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::Status(PeacebuildingStatus::Ceasefire));
        assert!(c.contains(FilterValue::Status(PeacebuildingStatus::Ceasefire)));
        c.toggle(FilterValue::Status(PeacebuildingStatus::Ceasefire));
        assert_eq!(c, FilterCriteria::default());
    }

    #[test]
    fn test_toggle_appends_in_pick_order() {
        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::Severity(Severity::Critical));
        c.toggle(FilterValue::Severity(Severity::Low));
        assert_eq!(c.severities, vec![Severity::Critical, Severity::Low]);
        assert_eq!(c.active_badges(), vec!["Critical", "Low"]);
    }

    #[test]
    fn test_clear_is_idempotent_reset() {
        let zones = sample();
        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::Continent(Continent::Asia));
        c.update(FilterUpdate::search("bravo"));
        assert!(c.is_active());
        c.clear();
        c.clear();
        assert!(!c.is_active());
        assert_eq!(compute_visible(&zones, &c).len(), zones.len());
    }

    #[test]
    fn test_matches_agrees_with_compute_visible() {
        let zones = sample();
        let mut c = FilterCriteria::default();
        c.toggle(FilterValue::ConflictType(ConflictType::Territorial));
        c.update(FilterUpdate::search("coast"));
        let visible = compute_visible(&zones, &c);
        for z in &zones {
            assert_eq!(c.matches(z), visible.iter().any(|v| v.id == z.id));
        }
    }
}
