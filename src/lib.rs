// Library interface for workout-stats
// The CLI and integration tests both go through these modules

pub mod config;
pub mod error;
pub mod formulas;
pub mod import;
pub mod logging;
pub mod models;
pub mod registry;
pub mod report;

// Re-export commonly used types for convenience
pub use error::{ImportError, PackageError, Result, StatsError};
pub use formulas::{Running, SportsWalking, Swimming, Training, Workout};
pub use models::{ActivityType, Package, SensorReading};
pub use registry::{read_package, read_raw_package, read_tokens, resolve};
pub use report::{InfoMessage, OutputFormat, ReportLocale};
pub use logging::{LogConfig, LogFormat, LogLevel};

use std::path::Path;

/// Reports computed from one package file, plus the packages it rejected
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub reports: Vec<InfoMessage>,
    pub rejected: Vec<ImportError>,
    pub total: usize,
}

/// Import a package file with `manager` and compute every package in it.
///
/// `format` forces an importer by name; otherwise it is picked from the
/// file extension.
pub fn process_file(
    manager: &import::ImportManager,
    path: &Path,
    format: Option<&str>,
    keep_going: bool,
) -> Result<BatchOutcome> {
    let packages = match format {
        Some(format) => manager.import_file_as(path, format)?,
        None => manager.import_file(path)?,
    };

    let (reports, rejected) = process_packages(&packages, keep_going)?;
    Ok(BatchOutcome {
        reports,
        rejected,
        total: packages.len(),
    })
}

/// Reference packages used by the `demo` command
pub fn demo_packages() -> Vec<Package> {
    vec![
        Package::new("SWM", serde_json::json!([720, 1, 80, 25, 40])),
        Package::new("RUN", serde_json::json!([15000, 1, 75])),
        Package::new("WLK", serde_json::json!([9000, 1, 75, 180])),
    ]
}

/// Read every package and collect its report.
///
/// With `keep_going` false the first rejected package aborts the batch;
/// otherwise rejected packages are returned alongside the good reports,
/// tagged with their index.
pub fn process_packages(
    packages: &[Package],
    keep_going: bool,
) -> std::result::Result<(Vec<InfoMessage>, Vec<ImportError>), ImportError> {
    let mut reports = Vec::with_capacity(packages.len());
    let mut rejected = Vec::new();

    for (index, package) in packages.iter().enumerate() {
        match read_raw_package(package) {
            Ok(workout) => reports.push(workout.show_training_info()),
            Err(source) => {
                let err = ImportError::Package { index, source };
                if !keep_going {
                    return Err(err);
                }
                tracing::debug!(index, error = %err, "Package rejected");
                rejected.push(err);
            }
        }
    }

    Ok((reports, rejected))
}
