use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::ImportError;
use crate::import::{has_extension, ImportFormat};
use crate::models::Package;

/// Accepted shapes for one package entry in a JSON file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PackageEntry {
    /// `["RUN", [15000, 1, 75]]`
    Pair(String, Value),
    /// `{"workout_type": "RUN", "data": [15000, 1, 75]}`
    Object(Package),
}

impl From<PackageEntry> for Package {
    fn from(entry: PackageEntry) -> Self {
        match entry {
            PackageEntry::Pair(workout_type, data) => Package::new(workout_type, data),
            PackageEntry::Object(package) => package,
        }
    }
}

/// JSON package file importer. The file holds one array of packages.
pub struct JsonImporter;

impl JsonImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse packages from a JSON document
    pub fn parse_str(&self, content: &str) -> Result<Vec<Package>, ImportError> {
        let root: Value = serde_json::from_str(content).map_err(|e| ImportError::ParseError {
            format: "JSON".to_string(),
            location: format!("line {}, column {}", e.line(), e.column()),
            reason: e.to_string(),
        })?;

        let entries = root.as_array().ok_or_else(|| ImportError::ParseError {
            format: "JSON".to_string(),
            location: "document root".to_string(),
            reason: "expected an array of packages".to_string(),
        })?;

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                PackageEntry::deserialize(entry)
                    .map(Package::from)
                    .map_err(|_| ImportError::ParseError {
                        format: "JSON".to_string(),
                        location: format!("package #{}", index),
                        reason: format!(
                            "expected [\"CODE\", [values]] or {{\"workout_type\", \"data\"}}, got {}",
                            entry
                        ),
                    })
            })
            .collect()
    }
}

impl Default for JsonImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFormat for JsonImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "json")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<Package>, ImportError> {
        let content = fs::read_to_string(file_path).map_err(|_| ImportError::FileNotFound {
            path: file_path.to_path_buf(),
        })?;
        self.parse_str(&content)
    }

    fn get_format_name(&self) -> &'static str {
        "JSON"
    }
}
