//! Formula evaluator for workout statistics
//!
//! Each activity type owns a closed-form set of formulas for distance,
//! mean speed and calories burned. The coefficients are calibration
//! constants and are not configurable.
//!
//! # Architecture
//!
//! - **Training**: trait with the shared distance/speed formulas and the
//!   per-activity calorie formula
//! - **Running**, **SportsWalking**, **Swimming**: one struct per activity,
//!   holding the typed reading fields
//! - **Workout**: tagged variant selected by the registry; dispatches to the
//!   matching formula set
//!
//! # Example
//!
//! ```rust
//! use workout_stats::formulas::{Running, Training};
//!
//! let run = Running::new(15000.0, 1.0, 75.0);
//! assert!((run.distance() - 9.75).abs() < 1e-9);
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::PackageError;
use crate::models::{ActivityType, SensorReading};
use crate::report::InfoMessage;

/// Step length in meters for running and walking
pub const LEN_STEP: f64 = 0.65;
/// Meters in a kilometer
pub const M_IN_KM: f64 = 1000.0;
/// Minutes in an hour
pub const MIN_IN_H: f64 = 60.0;

mod running {
    pub const SPEED_MULT: f64 = 18.0;
    pub const SPEED_SHIFT: f64 = 1.79;
}

mod walking {
    pub const WEIGHT_MULT_1: f64 = 0.035;
    pub const WEIGHT_MULT_2: f64 = 0.029;
    pub const KMH_IN_MSEC: f64 = 0.278;
    pub const CM_IN_M: f64 = 100.0;
}

mod swimming {
    pub const LEN_STEP: f64 = 1.38;
    pub const SPEED_SHIFT: f64 = 1.1;
    pub const SPEED_MULT: f64 = 2.0;
}

/// Shared formula set for one training session
pub trait Training {
    /// Distance covered by one step or stroke, in meters
    const LEN_STEP: f64 = LEN_STEP;

    fn activity(&self) -> ActivityType;

    /// Steps or strokes counted by the sensor
    fn action(&self) -> f64;

    /// Session duration in hours
    fn duration(&self) -> f64;

    /// Distance in km
    fn distance(&self) -> f64 {
        self.action() * Self::LEN_STEP / M_IN_KM
    }

    /// Mean speed in km/h
    fn mean_speed(&self) -> f64 {
        self.distance() / self.duration()
    }

    /// Calories burned over the session
    fn spent_calories(&self) -> f64;

    /// Package all computed values into a report
    fn show_training_info(&self) -> InfoMessage {
        InfoMessage {
            training_type: self.activity().name().to_string(),
            duration: self.duration(),
            distance: self.distance(),
            speed: self.mean_speed(),
            calories: self.spent_calories(),
        }
    }
}

/// Running session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Running {
    pub action: f64,
    pub duration: f64,
    pub weight: f64,
}

impl Running {
    pub fn new(action: f64, duration: f64, weight: f64) -> Self {
        Self {
            action,
            duration,
            weight,
        }
    }
}

impl Training for Running {
    fn activity(&self) -> ActivityType {
        ActivityType::Running
    }

    fn action(&self) -> f64 {
        self.action
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    /// (18 × speed + 1.79) × weight / 1000 × duration_min
    fn spent_calories(&self) -> f64 {
        let speed_transform = running::SPEED_MULT * self.mean_speed() + running::SPEED_SHIFT;
        speed_transform * self.weight / M_IN_KM * self.duration * MIN_IN_H
    }
}

/// Sports walking session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SportsWalking {
    pub action: f64,
    pub duration: f64,
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
}

impl SportsWalking {
    pub fn new(action: f64, duration: f64, weight: f64, height: f64) -> Self {
        Self {
            action,
            duration,
            weight,
            height,
        }
    }
}

impl Training for SportsWalking {
    fn activity(&self) -> ActivityType {
        ActivityType::SportsWalking
    }

    fn action(&self) -> f64 {
        self.action
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn spent_calories(&self) -> f64 {
        let speed_ms = self.mean_speed() * walking::KMH_IN_MSEC;
        let speed_height_ratio = speed_ms.powi(2) / (self.height / walking::CM_IN_M);
        let speed_weight_mult = walking::WEIGHT_MULT_1 * self.weight
            + speed_height_ratio * walking::WEIGHT_MULT_2 * self.weight;

        speed_weight_mult * self.duration * MIN_IN_H
    }
}

/// Pool swimming session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Swimming {
    /// Stroke count
    pub action: f64,
    pub duration: f64,
    pub weight: f64,
    /// Pool length in meters
    pub length_pool: f64,
    /// Number of pool lengths swum
    pub count_pool: f64,
}

impl Swimming {
    pub fn new(action: f64, duration: f64, weight: f64, length_pool: f64, count_pool: f64) -> Self {
        Self {
            action,
            duration,
            weight,
            length_pool,
            count_pool,
        }
    }
}

impl Training for Swimming {
    const LEN_STEP: f64 = swimming::LEN_STEP;

    fn activity(&self) -> ActivityType {
        ActivityType::Swimming
    }

    fn action(&self) -> f64 {
        self.action
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    /// Speed comes from pool geometry, not from the stroke distance
    fn mean_speed(&self) -> f64 {
        self.length_pool * self.count_pool / M_IN_KM / self.duration
    }

    fn spent_calories(&self) -> f64 {
        (self.mean_speed() + swimming::SPEED_SHIFT)
            * swimming::SPEED_MULT
            * self.weight
            * self.duration
    }
}

/// A validated workout, one variant per activity type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Workout {
    Running(Running),
    SportsWalking(SportsWalking),
    Swimming(Swimming),
}

impl Workout {
    /// Build the workout for `activity` from a checked reading.
    ///
    /// The reading length must equal the activity's arity, duration must be
    /// nonzero, and a walking height must be nonzero.
    pub fn from_reading(
        activity: ActivityType,
        reading: &SensorReading,
    ) -> Result<Self, PackageError> {
        let values = reading.values();
        if values.len() != activity.arity() {
            return Err(PackageError::invalid_reading(
                reading.to_string(),
                format!(
                    "{} expects {} values ({}), got {}",
                    activity.code(),
                    activity.arity(),
                    activity.fields().join(", "),
                    values.len()
                ),
            ));
        }
        if values[1] == 0.0 {
            return Err(PackageError::invalid_reading(
                reading.to_string(),
                "duration must be nonzero",
            ));
        }

        let workout = match activity {
            ActivityType::Running => Workout::Running(Running::new(values[0], values[1], values[2])),
            ActivityType::SportsWalking => {
                if values[3] == 0.0 {
                    return Err(PackageError::invalid_reading(
                        reading.to_string(),
                        "height must be nonzero",
                    ));
                }
                Workout::SportsWalking(SportsWalking::new(
                    values[0], values[1], values[2], values[3],
                ))
            }
            ActivityType::Swimming => Workout::Swimming(Swimming::new(
                values[0], values[1], values[2], values[3], values[4],
            )),
        };

        debug!(activity = activity.code(), reading = %reading, "Workout built");
        Ok(workout)
    }

    pub fn activity(&self) -> ActivityType {
        match self {
            Workout::Running(w) => w.activity(),
            Workout::SportsWalking(w) => w.activity(),
            Workout::Swimming(w) => w.activity(),
        }
    }

    pub fn duration(&self) -> f64 {
        match self {
            Workout::Running(w) => w.duration(),
            Workout::SportsWalking(w) => w.duration(),
            Workout::Swimming(w) => w.duration(),
        }
    }

    pub fn distance(&self) -> f64 {
        match self {
            Workout::Running(w) => w.distance(),
            Workout::SportsWalking(w) => w.distance(),
            Workout::Swimming(w) => w.distance(),
        }
    }

    pub fn mean_speed(&self) -> f64 {
        match self {
            Workout::Running(w) => w.mean_speed(),
            Workout::SportsWalking(w) => w.mean_speed(),
            Workout::Swimming(w) => w.mean_speed(),
        }
    }

    pub fn spent_calories(&self) -> f64 {
        match self {
            Workout::Running(w) => w.spent_calories(),
            Workout::SportsWalking(w) => w.spent_calories(),
            Workout::Swimming(w) => w.spent_calories(),
        }
    }

    pub fn show_training_info(&self) -> InfoMessage {
        match self {
            Workout::Running(w) => w.show_training_info(),
            Workout::SportsWalking(w) => w.show_training_info(),
            Workout::Swimming(w) => w.show_training_info(),
        }
    }
}
