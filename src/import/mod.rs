use std::path::Path;
use tracing::{debug, info};

use crate::error::ImportError;
use crate::models::Package;

pub mod csv;
pub mod json;

/// Trait for reading sensor packages from different file formats
pub trait ImportFormat {
    /// Check if this importer can handle the given file
    fn can_import(&self, file_path: &Path) -> bool;

    /// Read every package in the file, in file order
    fn import_file(&self, file_path: &Path) -> Result<Vec<Package>, ImportError>;

    /// Get the format name for this importer
    fn get_format_name(&self) -> &'static str;
}

/// Manager for coordinating the package file formats
pub struct ImportManager {
    importers: Vec<Box<dyn ImportFormat>>,
}

impl ImportManager {
    /// Create a new import manager with all available importers
    pub fn new() -> Self {
        let importers: Vec<Box<dyn ImportFormat>> = vec![
            Box::new(json::JsonImporter::new()),
            Box::new(csv::CsvImporter::new()),
        ];

        Self { importers }
    }

    /// Like [`new`](Self::new), with CSV cells split on `delimiter`
    pub fn with_csv_delimiter(delimiter: u8) -> Self {
        let importers: Vec<Box<dyn ImportFormat>> = vec![
            Box::new(json::JsonImporter::new()),
            Box::new(csv::CsvImporter::with_delimiter(delimiter)),
        ];

        Self { importers }
    }

    /// Import a file, auto-detecting the format from its extension
    pub fn import_file(&self, file_path: &Path) -> Result<Vec<Package>, ImportError> {
        for importer in &self.importers {
            if importer.can_import(file_path) {
                return self.run(importer.as_ref(), file_path);
            }
        }

        Err(self.unsupported(
            file_path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("<none>"),
        ))
    }

    /// Import a file with an explicitly named format
    pub fn import_file_as(&self, file_path: &Path, format: &str) -> Result<Vec<Package>, ImportError> {
        let importer = self
            .importers
            .iter()
            .find(|importer| importer.get_format_name().eq_ignore_ascii_case(format))
            .ok_or_else(|| self.unsupported(format))?;

        self.run(importer.as_ref(), file_path)
    }

    /// Names of the supported formats
    pub fn supported_formats(&self) -> Vec<&'static str> {
        self.importers.iter().map(|i| i.get_format_name()).collect()
    }

    fn unsupported(&self, format: &str) -> ImportError {
        ImportError::UnsupportedFormat {
            format: format.to_string(),
            supported: self.supported_formats().join(", "),
        }
    }

    fn run(&self, importer: &dyn ImportFormat, file_path: &Path) -> Result<Vec<Package>, ImportError> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound {
                path: file_path.to_path_buf(),
            });
        }

        debug!(
            file = %file_path.display(),
            format = importer.get_format_name(),
            "Importing packages"
        );
        let packages = importer.import_file(file_path)?;
        info!(
            file = %file_path.display(),
            count = packages.len(),
            "Packages imported"
        );
        Ok(packages)
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}

fn has_extension(file_path: &Path, wanted: &str) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}
