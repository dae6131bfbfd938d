use super::ConflictZone;

/// What happens to a selection when a filter change hides it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Keep the selected zone open even when filters exclude it
    #[default]
    Retain,
    /// Clear the selection once its zone leaves the visible set
    EvictHidden,
}

/// Single-slot holder of the zone shown in the detail panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    zone_id: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `zone`, replacing any previous selection
    pub fn select(&mut self, zone: &ConflictZone) {
        if self.zone_id.as_deref() != Some(zone.id.as_str()) {
            self.zone_id = Some(zone.id.clone());
        }
    }

    /// Drop the selection; no-op when nothing is selected
    pub fn clear(&mut self) {
        self.zone_id = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.zone_id.as_deref()
    }

    pub fn is_selected(&self, zone: &ConflictZone) -> bool {
        self.selected() == Some(zone.id.as_str())
    }

    /// Resolve the selection against the full dataset
    pub fn selected_zone<'a>(&self, zones: &'a [ConflictZone]) -> Option<&'a ConflictZone> {
        let id = self.selected()?;
        zones.iter().find(|z| z.id == id)
    }

    /// Apply `policy` after the visible set changed. Returns true if the
    /// selection was evicted.
    pub fn reconcile(&mut self, visible: &[&ConflictZone], policy: SelectionPolicy) -> bool {
        match (policy, self.selected()) {
            (SelectionPolicy::EvictHidden, Some(id)) if !visible.iter().any(|z| z.id == id) => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Step through `visible` by `offset`, wrapping. Starts at the first
    /// (or last, for negative offsets) zone when nothing visible is selected.
    pub fn cycle(&mut self, visible: &[&ConflictZone], offset: isize) -> Option<String> {
        if visible.is_empty() {
            return None;
        }
        let len = visible.len() as isize;
        let current = self
            .selected()
            .and_then(|id| visible.iter().position(|z| z.id == id));
        let next = match current {
            Some(idx) => (idx as isize + offset).rem_euclid(len),
            None if offset < 0 => len - 1,
            None => 0,
        };
        let zone = visible[next as usize];
        self.select(zone);
        Some(zone.id.clone())
    }
}
