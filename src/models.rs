use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PackageError;

/// Activity types supported by the workout registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    Running,
    SportsWalking,
    Swimming,
}

impl ActivityType {
    /// Three-letter code used in sensor packages
    pub fn code(&self) -> &'static str {
        match self {
            ActivityType::Running => "RUN",
            ActivityType::SportsWalking => "WLK",
            ActivityType::Swimming => "SWM",
        }
    }

    /// Name printed as the training type in reports
    pub fn name(&self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::SportsWalking => "SportsWalking",
            ActivityType::Swimming => "Swimming",
        }
    }

    /// Number of reading values the activity consumes
    pub fn arity(&self) -> usize {
        match self {
            ActivityType::Running => 3,
            ActivityType::SportsWalking => 4,
            ActivityType::Swimming => 5,
        }
    }

    /// Meaning of each reading position, in order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ActivityType::Running => &["steps", "duration_h", "weight_kg"],
            ActivityType::SportsWalking => &["steps", "duration_h", "weight_kg", "height_cm"],
            ActivityType::Swimming => &[
                "strokes",
                "duration_h",
                "weight_kg",
                "pool_length_m",
                "pool_count",
            ],
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum number of values in any sensor reading
pub const MIN_READING_LEN: usize = 3;

/// Ordered numeric values received from a sensor for one session.
///
/// Integers and floats are both accepted and stored as `f64`. A reading is
/// only constructed through the checked constructors, so every value is
/// finite and there are at least [`MIN_READING_LEN`] of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SensorReading(Vec<f64>);

impl SensorReading {
    /// Build a reading from already-numeric values
    pub fn new(values: Vec<f64>) -> Result<Self, PackageError> {
        let rendered = render_values(&values);
        if values.len() < MIN_READING_LEN {
            return Err(PackageError::invalid_reading(
                rendered,
                format!(
                    "expected at least {} values, got {}",
                    MIN_READING_LEN,
                    values.len()
                ),
            ));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(PackageError::invalid_reading(
                rendered,
                format!("value at position {} is not a finite number", pos),
            ));
        }
        Ok(Self(values))
    }

    /// Build a reading from loosely typed JSON.
    ///
    /// The value must be an array whose elements are all JSON numbers;
    /// strings, booleans and nulls are rejected even when they look numeric.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, PackageError> {
        let items = value.as_array().ok_or_else(|| {
            PackageError::invalid_reading(value.to_string(), "reading is not a list")
        })?;

        let mut values = Vec::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            match item.as_f64() {
                Some(v) => values.push(v),
                None => {
                    return Err(PackageError::invalid_reading(
                        value.to_string(),
                        format!("value at position {} is not numeric: {}", pos, item),
                    ))
                }
            }
        }

        Self::new(values)
    }

    /// Build a reading from text tokens (CLI arguments, CSV cells)
    pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, PackageError> {
        let mut values = Vec::with_capacity(tokens.len());
        for (pos, token) in tokens.iter().enumerate() {
            let token = token.as_ref().trim();
            let value = token.parse::<f64>().map_err(|_| {
                PackageError::invalid_reading(
                    format!(
                        "[{}]",
                        tokens
                            .iter()
                            .map(|t| t.as_ref().trim())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                    format!("value at position {} is not numeric: {:?}", pos, token),
                )
            })?;
            values.push(value);
        }

        Self::new(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_values(&self.0))
    }
}

fn render_values(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// One sensor package: an activity code plus its reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Three-letter activity code as received (not yet resolved)
    pub workout_type: String,

    /// Raw reading; validated when the package is read
    pub data: serde_json::Value,
}

impl Package {
    pub fn new(workout_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            workout_type: workout_type.into(),
            data,
        }
    }
}
