//! core::persist
//!
//! The persistence gateway: the rule store's single doorway to disk.
//!
//! # Contract
//!
//! - `load` never fails fatally. A missing file yields the all-empty
//!   default structure; an unreadable or malformed file also yields the
//!   default, with a warning for the caller to surface. The session
//!   continues either way.
//! - `save` writes the whole document (not incrementally) atomically:
//!   temp file in the same directory, fsync, rename. A failed save is an
//!   explicit error; the in-memory store remains valid and usable.
//!
//! There is no write-ahead log and no cross-process locking: last writer
//! wins.
//!
//! # Example
//!
//! ```no_run
//! use curbside::core::persist::RulesFile;
//! use curbside::core::store::RuleStore;
//!
//! let file = RulesFile::new()?;
//! let loaded = file.load();
//! if let Some(warning) = loaded.warning {
//!     eprintln!("warning: {warning}");
//! }
//!
//! let mut store = loaded.store;
//! // ... mutate store ...
//! file.save(&store)?;
//! # Ok::<(), curbside::core::persist::PersistError>(())
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use super::paths;
use super::store::RuleStore;

/// Errors from the persistence gateway.
///
/// Read errors are folded into [`StoreLoad::warning`] instead; only
/// environment problems (no home directory) and write failures surface
/// as hard errors.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot determine home directory for the rules file")]
    NoHomeDir,

    #[error("failed to write rules file '{path}': {message}")]
    WriteError {
        path: PathBuf,
        message: String,
    },
}

/// Result of loading the rule store from disk.
#[derive(Debug)]
pub struct StoreLoad {
    /// The loaded store, or the all-empty default structure.
    pub store: RuleStore,
    /// A recoverable condition worth telling the user about (for
    /// example, a corrupt file that was replaced with the default).
    pub warning: Option<String>,
}

/// The persisted rule store file.
#[derive(Debug, Clone)]
pub struct RulesFile {
    path: PathBuf,
}

impl RulesFile {
    /// Gateway at the default location (`~/.curbside/rules.json`).
    ///
    /// # Errors
    ///
    /// Returns `PersistError::NoHomeDir` if the home directory cannot be
    /// determined.
    pub fn new() -> Result<Self, PersistError> {
        let path = paths::default_rules_path().ok_or(PersistError::NoHomeDir)?;
        Ok(Self { path })
    }

    /// Gateway at a custom path (`--store`, config override, tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path this gateway reads and writes.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the rule store.
    ///
    /// Never fails: malformed or missing durable state yields the
    /// all-empty default structure, reported through
    /// [`StoreLoad::warning`] when it is worth surfacing.
    pub fn load(&self) -> StoreLoad {
        if !self.path.exists() {
            return StoreLoad {
                store: RuleStore::default(),
                warning: None,
            };
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                return StoreLoad {
                    store: RuleStore::default(),
                    warning: Some(format!(
                        "cannot read rules file '{}' ({e}); starting with an empty store",
                        self.path.display()
                    )),
                }
            }
        };

        match serde_json::from_str(&contents) {
            Ok(store) => StoreLoad {
                store,
                warning: None,
            },
            Err(e) => StoreLoad {
                store: RuleStore::default(),
                warning: Some(format!(
                    "rules file '{}' is malformed ({e}); starting with an empty store",
                    self.path.display()
                )),
            },
        }
    }

    /// Write the whole store atomically.
    ///
    /// # Errors
    ///
    /// Returns `PersistError::WriteError` on any I/O failure. The
    /// original file is left intact in that case (the temp file, not the
    /// target, absorbs partial writes).
    pub fn save(&self, store: &RuleStore) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PersistError::WriteError {
                path: self.path.clone(),
                message: format!("cannot create directory: {e}"),
            })?;
        }

        // Serialization of RuleStore cannot fail (string keys, string
        // values), but the error path is kept rather than unwrapped.
        let contents = serde_json::to_string_pretty(store).map_err(|e| {
            PersistError::WriteError {
                path: self.path.clone(),
                message: format!("cannot serialize store: {e}"),
            }
        })?;

        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| PersistError::WriteError {
                    path: temp_path.clone(),
                    message: format!("cannot create temp file: {e}"),
                })?;

            file.write_all(contents.as_bytes())
                .map_err(|e| PersistError::WriteError {
                    path: temp_path.clone(),
                    message: format!("cannot write rules: {e}"),
                })?;

            file.sync_all().map_err(|e| PersistError::WriteError {
                path: temp_path.clone(),
                message: format!("cannot sync to disk: {e}"),
            })?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| PersistError::WriteError {
            path: self.path.clone(),
            message: format!("cannot rename temp file: {e}"),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ScopeKey;
    use tempfile::TempDir;

    fn temp_file() -> (TempDir, RulesFile) {
        let temp = TempDir::new().expect("create temp dir");
        let file = RulesFile::with_path(temp.path().join("rules.json"));
        (temp, file)
    }

    #[test]
    fn missing_file_loads_default() {
        let (_temp, file) = temp_file();
        let loaded = file.load();
        assert_eq!(loaded.store, RuleStore::default());
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_temp, file) = temp_file();

        let mut store = RuleStore::default();
        let zip: ScopeKey = "zip:94105".parse().unwrap();
        let city: ScopeKey = "city:Sacramento, CA".parse().unwrap();
        store.create_scope(&zip).unwrap();
        store.create_scope(&city).unwrap();
        store.set_instruction(&zip, "bottle", "blue bin").unwrap();
        store.set_provider(&zip, "Recology").unwrap();
        store
            .set_instruction(&ScopeKey::National, "default", "ask locally")
            .unwrap();

        file.save(&store).unwrap();
        let loaded = file.load();

        assert_eq!(loaded.store, store);
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn corrupt_file_loads_default_with_warning() {
        let (_temp, file) = temp_file();
        fs::write(file.path(), "{not json at all").unwrap();

        let loaded = file.load();
        assert_eq!(loaded.store, RuleStore::default());
        let warning = loaded.warning.expect("warning for corrupt file");
        assert!(warning.contains("malformed"));
    }

    #[test]
    fn wrong_shape_loads_default_with_warning() {
        let (_temp, file) = temp_file();
        // Valid JSON, wrong shape for a store
        fs::write(file.path(), r#"{"zips": {"94105": "not an object"}}"#).unwrap();

        let loaded = file.load();
        assert_eq!(loaded.store, RuleStore::default());
        assert!(loaded.warning.is_some());
    }

    #[test]
    fn save_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let file = RulesFile::with_path(temp.path().join("nested/dir/rules.json"));

        file.save(&RuleStore::default()).unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn save_leaves_no_temp_residue() {
        let (_temp, file) = temp_file();
        file.save(&RuleStore::default()).unwrap();
        assert!(!file.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn saved_document_has_all_partitions() {
        let (_temp, file) = temp_file();
        file.save(&RuleStore::default()).unwrap();

        let raw = fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        for partition in ["zips", "cities", "states", "national_default"] {
            assert!(value.get(partition).is_some(), "missing {partition}");
        }
    }

    #[test]
    fn overwrite_replaces_whole_document() {
        let (_temp, file) = temp_file();

        let mut store = RuleStore::default();
        let key: ScopeKey = "state:CA".parse().unwrap();
        store.create_scope(&key).unwrap();
        file.save(&store).unwrap();

        // Second save from an empty store must not leave the old scope
        file.save(&RuleStore::default()).unwrap();
        assert!(!file.load().store.contains(&key));
    }
}
