//! In-memory dataset of district records
//!
//! The dataset is loaded once when the service starts and never changes afterwards. A dataset
//! that cannot be loaded is replaced by a single placeholder district with all counts zero, so
//! that the service always starts and every query has something to answer from.

use crate::error::{error_causes, DatasetError};
use crate::models::{normalize_district_name, RegionRecord, SENTINEL_DISTRICT};

use hashbrown::HashMap;
use std::path::Path;
use tracing::{event, Level};

/// Immutable, ordered collection of [RegionRecord]s.
///
/// Records keep the order of the source file. District names are unique after normalization.
#[derive(Debug)]
pub struct DatasetStore {
    /// Records in source order
    records: Vec<RegionRecord>,

    /// Normalized district name to index into `records`
    index: HashMap<String, usize>,

    /// Whether this is the placeholder dataset
    fallback: bool,
}

impl DatasetStore {
    /// Build a store from records, validating them.
    ///
    /// An empty list of records is a valid (empty) store.
    ///
    /// # Arguments
    ///
    /// * `records`: District records, in the order they should be served
    pub fn from_records(records: Vec<RegionRecord>) -> Result<Self, DatasetError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if record.district_name.is_empty() {
                return Err(DatasetError::EmptyDistrictName { index: position });
            }
            let name = record.normalized_name();
            if index.contains_key(&name) {
                return Err(DatasetError::DuplicateDistrict { name });
            }
            index.insert(name, position);
        }
        Ok(Self {
            records,
            index,
            fallback: false,
        })
    }

    /// Returns the placeholder store: a single district named `SAMPLE` with all counts zero.
    pub fn sentinel() -> Self {
        let record = RegionRecord::new(SENTINEL_DISTRICT);
        let mut index = HashMap::with_capacity(1);
        index.insert(record.normalized_name(), 0);
        Self {
            records: vec![record],
            index,
            fallback: true,
        }
    }

    /// Load a store from a JSON file containing an array of district records.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to the dataset file
    #[tracing::instrument(level = "DEBUG", skip_all)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<RegionRecord> =
            serde_json::from_str(&contents).map_err(|source| DatasetError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        Self::from_records(records)
    }

    /// Load a store from a JSON file, falling back to the placeholder store on failure.
    ///
    /// Never fails. Load errors are logged.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to the dataset file
    pub fn load_or_sentinel<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(store) => {
                event!(
                    Level::INFO,
                    "Loaded data for {} districts from {}",
                    store.len(),
                    path.display()
                );
                store
            }
            Err(error) => {
                event!(Level::ERROR, "Error loading data: {}", error);
                for cause in error_causes(&error) {
                    event!(Level::ERROR, "Caused by: {}", cause);
                }
                event!(
                    Level::WARN,
                    "Serving placeholder district {}",
                    SENTINEL_DISTRICT
                );
                Self::sentinel()
            }
        }
    }

    /// Returns all records in source order.
    pub fn records(&self) -> &[RegionRecord] {
        &self.records
    }

    /// Returns the record whose normalized name equals `normalized_name`.
    pub fn find(&self, normalized_name: &str) -> Option<&RegionRecord> {
        self.index
            .get(normalized_name)
            .map(|position| &self.records[*position])
    }

    /// Returns the record matching `name` after normalization.
    pub fn find_by_name(&self, name: &str) -> Option<&RegionRecord> {
        self.find(&normalize_district_name(name))
    }

    /// Returns the number of districts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no districts.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if this is the placeholder store.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::sentinel()
    }
}
