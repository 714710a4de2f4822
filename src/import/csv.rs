use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use crate::error::ImportError;
use crate::import::{has_extension, ImportFormat};
use crate::models::Package;

/// CSV package importer.
///
/// No header row; each record is `CODE,v1,v2,...` and records may have
/// different lengths. Lines starting with `#` are comments. Cells that parse
/// as numbers become JSON numbers, anything else is kept as a string so the
/// registry can reject it with the position of the bad value.
pub struct CsvImporter {
    delimiter: u8,
}

impl CsvImporter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Parse packages from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<Package>, ImportError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut packages = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| ImportError::ParseError {
                format: "CSV".to_string(),
                location: format!("record #{}", index),
                reason: e.to_string(),
            })?;

            if record.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            packages.push(Self::record_to_package(&record));
        }

        Ok(packages)
    }

    fn record_to_package(record: &StringRecord) -> Package {
        let workout_type = record.get(0).unwrap_or_default().to_string();
        let data = record
            .iter()
            .skip(1)
            .map(Self::cell_to_value)
            .collect::<Vec<_>>();

        Package::new(workout_type, Value::Array(data))
    }

    fn cell_to_value(cell: &str) -> Value {
        if let Ok(int) = cell.parse::<i64>() {
            return Value::from(int);
        }
        cell.parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(cell.to_string()))
    }
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFormat for CsvImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "csv")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<Package>, ImportError> {
        let file = std::fs::File::open(file_path).map_err(|_| ImportError::FileNotFound {
            path: file_path.to_path_buf(),
        })?;
        self.parse_reader(file)
    }

    fn get_format_name(&self) -> &'static str {
        "CSV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flexible_records() {
        let input = "# reference packages\nSWM,720,1,80,25,40\nRUN, 15000, 1, 75\nWLK,9000,1.5,75,180\n";
        let packages = CsvImporter::new().parse_reader(input.as_bytes()).unwrap();

        assert_eq!(packages.len(), 3);
        assert_eq!(packages[0], Package::new("SWM", json!([720, 1, 80, 25, 40])));
        assert_eq!(packages[1], Package::new("RUN", json!([15000, 1, 75])));
        assert_eq!(packages[2].data, json!([9000, 1.5, 75, 180]));
    }

    #[test]
    fn test_non_numeric_cells_kept_as_strings() {
        let packages = CsvImporter::new()
            .parse_reader("RUN,15000,fast,75\n".as_bytes())
            .unwrap();
        assert_eq!(packages[0].data, json!([15000, "fast", 75]));
    }

    #[test]
    fn test_custom_delimiter() {
        let packages = CsvImporter::with_delimiter(b';')
            .parse_reader("RUN;15000;1;75\n".as_bytes())
            .unwrap();
        assert_eq!(packages[0].data, json!([15000, 1, 75]));
    }

    #[test]
    fn test_code_only_record() {
        let packages = CsvImporter::new().parse_reader("RUN\n".as_bytes()).unwrap();
        assert_eq!(packages[0].data, json!([]));
    }
}
