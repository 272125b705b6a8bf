//! Persisted layout for the columnar store.
//!
//! On disk a store is a directory:
//!
//! ```text
//! <root>/
//!   manifest.json            { "version": 1, "dates": ["2024-03-01", ...] }
//!   segments/<date>.json     one serialized ColumnBatch per snapshot date
//!   dictionaries/<field>.json  { "NYSE": 0, "NASDAQ": 1, ... } per field
//! ```
//!
//! Dictionaries are append-only, so rows written against an older vocabulary
//! stay decodable after later growth. Range loads read only the segment
//! files inside the requested window; dictionaries are always loaded whole.
//!
//! Commits write segment, then dictionaries, then manifest, each through a
//! temp file renamed into place. The manifest is the commit point: a crash
//! mid-commit leaves it pointing only at fully written state.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dictionary::{CategoricalDictionary, DictionarySet, Field};
use crate::errors::Result;
use crate::store::column_batch::ColumnBatch;
use crate::store::snapshot_store::ColumnarStore;
use crate::store::store_errors::StoreError;

/// Current persisted format version.
pub const STORE_FORMAT_VERSION: u32 = 1;

const MANIFEST_FILE: &str = "manifest.json";
const SEGMENTS_DIR: &str = "segments";
const DICTIONARIES_DIR: &str = "dictionaries";

/// The manifest at the root of a persisted store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreManifest {
    pub version: u32,
    pub dates: Vec<NaiveDate>,
}

/// Directory-backed persistence for [`ColumnarStore`].
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(SEGMENTS_DIR)).map_err(StoreError::Io)?;
        fs::create_dir_all(root.join(DICTIONARIES_DIR)).map_err(StoreError::Io)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the full history.
    pub fn load(&self) -> Result<ColumnarStore> {
        self.load_range(None, None)
    }

    /// Loads only the segments inside the inclusive date window.
    ///
    /// Dictionaries and the manifest are read regardless; segment files
    /// outside the window are not opened.
    pub fn load_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<ColumnarStore> {
        let manifest = self.read_manifest()?;
        let dictionaries = self.read_dictionaries()?;

        let mut batches = BTreeMap::new();
        for date in manifest.dates {
            if start.map_or(false, |s| date < s) || end.map_or(false, |e| date > e) {
                continue;
            }
            let path = self.segment_path(date);
            if !path.exists() {
                return Err(StoreError::Corruption(format!(
                    "manifest lists {} but segment file {} is missing",
                    date,
                    path.display()
                ))
                .into());
            }
            let bytes = fs::read(&path).map_err(StoreError::Io)?;
            let batch: ColumnBatch =
                serde_json::from_slice(&bytes).map_err(StoreError::Serde)?;
            if batch.snapshot_date != date {
                return Err(StoreError::Corruption(format!(
                    "segment {} holds data for {}",
                    path.display(),
                    batch.snapshot_date
                ))
                .into());
            }
            batches.insert(date, batch);
        }

        ColumnarStore::from_parts(dictionaries, batches)
    }

    /// Persists one date's batch plus the (possibly grown) dictionaries,
    /// then publishes the date in the manifest.
    pub fn commit_date(&self, store: &ColumnarStore, date: NaiveDate) -> Result<()> {
        let batch = store.batch(date).ok_or_else(|| {
            StoreError::Corruption(format!("commit requested for absent date {}", date))
        })?;
        batch.check_integrity()?;

        self.write_json(&self.segment_path(date), batch)?;
        self.write_dictionaries(store.dictionaries())?;

        let mut manifest = self.read_manifest()?;
        if !manifest.dates.contains(&date) {
            manifest.dates.push(date);
            manifest.dates.sort_unstable();
        }
        self.write_json(&self.root.join(MANIFEST_FILE), &manifest)?;
        Ok(())
    }

    fn read_manifest(&self) -> Result<StoreManifest> {
        let path = self.root.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(StoreManifest {
                version: STORE_FORMAT_VERSION,
                dates: Vec::new(),
            });
        }
        let bytes = fs::read(&path).map_err(StoreError::Io)?;
        let manifest: StoreManifest =
            serde_json::from_slice(&bytes).map_err(StoreError::Serde)?;
        if manifest.version != STORE_FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: manifest.version,
            }
            .into());
        }
        Ok(manifest)
    }

    fn read_dictionaries(&self) -> Result<DictionarySet> {
        let mut dictionaries = DictionarySet::new();
        for field in Field::ALL {
            let path = self.dictionary_path(field);
            if !path.exists() {
                continue;
            }
            let bytes = fs::read(&path).map_err(StoreError::Io)?;
            let map: HashMap<String, u32> =
                serde_json::from_slice(&bytes).map_err(StoreError::Serde)?;
            let dictionary = CategoricalDictionary::from_map(field, map)
                .map_err(|e| StoreError::Corruption(e.to_string()))?;
            dictionaries.set(field, dictionary);
        }
        Ok(dictionaries)
    }

    fn write_dictionaries(&self, dictionaries: &DictionarySet) -> Result<()> {
        for field in Field::ALL {
            let dictionary = dictionaries.get(field);
            if dictionary.is_empty() {
                continue;
            }
            self.write_json(&self.dictionary_path(field), &dictionary.to_map())?;
        }
        Ok(())
    }

    fn segment_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join(SEGMENTS_DIR).join(format!("{}.json", date))
    }

    fn dictionary_path(&self, field: Field) -> PathBuf {
        self.root
            .join(DICTIONARIES_DIR)
            .join(format!("{}.json", field.as_str()))
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(value).map_err(StoreError::Serde)?;
        fs::write(&tmp, bytes).map_err(StoreError::Io)?;
        fs::rename(&tmp, path).map_err(StoreError::Io)?;
        Ok(())
    }
}
