// src/core/commons.rs

use crate::models::{DefaultReason, LoadOutcome};
use serde::de::DeserializeOwned;
use std::{fs, io::ErrorKind, path::Path};

/// Reads and parses an optional JSON file.
///
/// Never fails: an absent file is `Defaulted(Missing)`, an unreadable or
/// unparsable one is `Defaulted(Corrupt(reason))`.
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> LoadOutcome<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No file at '{}'.", path.display());
            return LoadOutcome::Defaulted(DefaultReason::Missing);
        }
        Err(e) => {
            log::debug!("'{}' is unreadable: {}", path.display(), e);
            return LoadOutcome::Defaulted(DefaultReason::Corrupt(e.to_string()));
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => LoadOutcome::Loaded(value),
        Err(e) => {
            log::debug!("'{}' could not be parsed: {}", path.display(), e);
            LoadOutcome::Defaulted(DefaultReason::Corrupt(e.to_string()))
        }
    }
}
