//! Static zone and case-study dataset.
//!
//! The dataset ships inside the binary as JSON and is decoded once at startup.
//! Loading runs on a worker thread behind a fixed delay so the UI can show its
//! loading state; the result comes back over a channel polled each frame.

use crate::zones::{CaseStudy, ConflictZone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

const BUNDLED_DATASET: &[u8] = include_bytes!("../../assets/dataset.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode dataset: {0}")]
    Decode(#[from] simd_json::Error),

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("zone '{id}' has out-of-range coordinates ({lat}, {lon})")]
    InvalidCoordinates { id: String, lat: f64, lon: f64 },

    #[error("dataset loader exited without a result")]
    LoaderExited,
}

/// Read-only collection of zones and case studies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub zones: Vec<ConflictZone>,
    #[serde(default)]
    pub case_studies: Vec<CaseStudy>,
}

impl Catalog {
    /// The dataset compiled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_DATASET.to_vec())
    }

    /// Decode and validate a JSON document (simd-json parses in place)
    pub fn from_json(mut bytes: Vec<u8>) -> Result<Self, CatalogError> {
        let catalog: Catalog = simd_json::serde::from_slice(&mut bytes)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let bytes = std::fs::read(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(bytes)
    }

    /// Reject duplicate ids and impossible coordinates
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut zone_ids = HashSet::new();
        for zone in &self.zones {
            if !zone_ids.insert(zone.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "zone",
                    id: zone.id.clone(),
                });
            }
            if !zone.coordinates.is_valid() {
                return Err(CatalogError::InvalidCoordinates {
                    id: zone.id.clone(),
                    lat: zone.coordinates.lat,
                    lon: zone.coordinates.lon,
                });
            }
        }

        let mut study_ids = HashSet::new();
        for study in &self.case_studies {
            if !study_ids.insert(study.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "case study",
                    id: study.id.clone(),
                });
            }
            if !zone_ids.contains(study.conflict_zone_id.as_str()) {
                warn!(
                    case_study = %study.id,
                    zone = %study.conflict_zone_id,
                    "Case study refers to a zone that is not in the dataset"
                );
            }
        }

        Ok(())
    }

    pub fn zone(&self, id: &str) -> Option<&ConflictZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn case_study(&self, id: &str) -> Option<&CaseStudy> {
        self.case_studies.iter().find(|s| s.id == id)
    }

    /// Case study written about `zone_id`, if any
    pub fn case_study_for_zone(&self, zone_id: &str) -> Option<&CaseStudy> {
        self.case_studies
            .iter()
            .find(|s| s.conflict_zone_id == zone_id)
    }
}

/// Where the catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Bundled,
    File(PathBuf),
}

impl DatasetSource {
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        match self {
            DatasetSource::Bundled => Catalog::bundled(),
            DatasetSource::File(path) => Catalog::from_path(path),
        }
    }
}

/// Startup state of the catalog
#[derive(Debug)]
pub enum LoadState {
    Loading { since: Instant },
    Ready(Catalog),
    Failed(String),
}

impl LoadState {
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            LoadState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading { .. })
    }
}

/// Handle to a catalog load running on a worker thread
pub struct CatalogLoader {
    rx: Receiver<Result<Catalog, CatalogError>>,
}

impl CatalogLoader {
    /// Start loading `source` after `delay`
    pub fn spawn(source: DatasetSource, delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            thread::sleep(delay);
            let result = source.load();
            match &result {
                Ok(catalog) => info!(
                    zones = catalog.zones.len(),
                    case_studies = catalog.case_studies.len(),
                    "Dataset loaded"
                ),
                Err(e) => warn!(error = %e, "Dataset failed to load"),
            }
            // Receiver may be gone if the app quit first
            let _ = tx.send(result);
        });
        debug!(?delay, "Dataset load scheduled");
        Self { rx }
    }

    /// Non-blocking check; `Some` once the worker has finished
    pub fn try_finish(&self) -> Option<Result<Catalog, CatalogError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(CatalogError::LoaderExited)),
        }
    }

    /// Block until the worker finishes
    pub fn wait(self) -> Result<Catalog, CatalogError> {
        self.rx.recv().unwrap_or(Err(CatalogError::LoaderExited))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::{compute_visible, Continent, FilterCriteria, FilterUpdate, Severity};

    fn visible_ids(catalog: &Catalog, criteria: &FilterCriteria) -> Vec<String> {
        compute_visible(&catalog.zones, criteria)
            .into_iter()
            .map(|z| z.id.clone())
            .collect()
    }

    #[test]
    fn test_bundled_dataset_decodes() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.zones.len(), 6);
        assert_eq!(catalog.case_studies.len(), 2);
        let ukraine = catalog.zone("ukraine-russia").unwrap();
        assert_eq!(ukraine.continent, Continent::Europe);
        assert_eq!(ukraine.severity, Severity::Critical);
        assert!((ukraine.coordinates.lat - 49.8397).abs() < 1e-9);
        assert_eq!(ukraine.statistics.casualties, Some(500_000));
    }

    #[test]
    fn test_end_to_end_filtering_over_bundled_dataset() {
        let catalog = Catalog::bundled().unwrap();
        let mut criteria = FilterCriteria::default();

        criteria.update(FilterUpdate::continents(vec![Continent::Europe]));
        assert_eq!(visible_ids(&catalog, &criteria), vec!["ukraine-russia"]);

        criteria.update(FilterUpdate::severities(vec![Severity::Critical]));
        assert_eq!(visible_ids(&catalog, &criteria), vec!["ukraine-russia"]);

        criteria.update(FilterUpdate::continents(Vec::new()));
        assert_eq!(
            visible_ids(&catalog, &criteria),
            vec!["ukraine-russia", "israel-palestine"]
        );
    }

    #[test]
    fn test_search_sudan_any_case() {
        let catalog = Catalog::bundled().unwrap();
        for needle in ["sudan", "SUDAN", "SuDaN"] {
            let mut criteria = FilterCriteria::default();
            criteria.update(FilterUpdate::search(needle));
            assert_eq!(visible_ids(&catalog, &criteria), vec!["south-sudan"]);
        }
    }

    #[test]
    fn test_case_study_lookup_by_zone() {
        let catalog = Catalog::bundled().unwrap();
        let study = catalog.case_study_for_zone("colombia-farc").unwrap();
        assert_eq!(study.id, "colombia-peace-model");
        assert!(catalog.case_study_for_zone("syria-civil-war").is_none());
        assert!(catalog.case_study("northern-ireland-good-friday").is_some());
    }

    #[test]
    fn test_duplicate_zone_id_rejected() {
        let mut catalog = Catalog::bundled().unwrap();
        let dup = catalog.zones[0].clone();
        catalog.zones.push(dup);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateId { kind: "zone", .. })
        ));
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        let mut catalog = Catalog::bundled().unwrap();
        catalog.zones[0].coordinates.lat = 120.0;
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_a_decode_error() {
        let result = Catalog::from_json(br#"{"zones": [{"id": 3}]}"#.to_vec());
        assert!(matches!(result, Err(CatalogError::Decode(_))));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let result = DatasetSource::File(PathBuf::from("/nonexistent/peacemap.json")).load();
        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }

    #[test]
    fn test_loader_delivers_catalog() {
        let loader = CatalogLoader::spawn(DatasetSource::Bundled, Duration::ZERO);
        let catalog = loader.wait().unwrap();
        assert_eq!(catalog.zones.len(), 6);
    }
}
