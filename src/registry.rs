//! Workout registry: activity code lookup and package reading

use tracing::debug;

use crate::error::PackageError;
use crate::formulas::Workout;
use crate::models::{ActivityType, Package, SensorReading};

/// Activity codes accepted in sensor packages, in registry order
pub const KNOWN_CODES: [&str; 3] = ["RUN", "WLK", "SWM"];

const REGISTRY: [(&str, ActivityType); 3] = [
    ("RUN", ActivityType::Running),
    ("WLK", ActivityType::SportsWalking),
    ("SWM", ActivityType::Swimming),
];

/// Resolve an activity code. Matching is exact and case-sensitive.
pub fn resolve(code: &str) -> Result<ActivityType, PackageError> {
    REGISTRY
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, activity)| *activity)
        .ok_or_else(|| PackageError::unknown_activity(code))
}

/// Known activity types, in registry order
pub fn activities() -> impl Iterator<Item = ActivityType> {
    REGISTRY.iter().map(|(_, activity)| *activity)
}

/// Read a package: resolve the code, then validate the reading.
///
/// The code is checked first, so a package that is wrong in both ways
/// reports `UnknownActivityType`.
pub fn read_package(code: &str, reading: &SensorReading) -> Result<Workout, PackageError> {
    let activity = resolve(code)?;
    debug!(code, activity = %activity, "Activity resolved");
    Workout::from_reading(activity, reading)
}

/// Read a package whose reading is still untyped JSON
pub fn read_raw_package(package: &Package) -> Result<Workout, PackageError> {
    let activity = resolve(&package.workout_type)?;
    let reading = SensorReading::from_json(&package.data)?;
    Workout::from_reading(activity, &reading)
}

/// Read a package whose reading is still text, e.g. from the command line.
///
/// Like [`read_package`], the code is resolved before any token is parsed.
pub fn read_tokens<S: AsRef<str>>(code: &str, tokens: &[S]) -> Result<Workout, PackageError> {
    let activity = resolve(code)?;
    let reading = SensorReading::parse_tokens(tokens)?;
    debug!(code, reading = %reading, "Tokens parsed");
    Workout::from_reading(activity, &reading)
}
