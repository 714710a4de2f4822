//! Report formatting
//!
//! Renders computed workout values as the fixed-template text line, as JSON,
//! or as a summary table for batches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Computed workout report. Built once by the formula set, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoMessage {
    /// Training type name (Running, SportsWalking, Swimming)
    pub training_type: String,
    /// Duration in hours
    pub duration: f64,
    /// Distance in km
    pub distance: f64,
    /// Mean speed in km/h
    pub speed: f64,
    /// Calories burned
    pub calories: f64,
}

/// Language of the text report labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLocale {
    #[default]
    Ru,
    En,
}

impl FromStr for ReportLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" => Ok(ReportLocale::Ru),
            "en" => Ok(ReportLocale::En),
            _ => Err(format!("Invalid report locale: {}", s)),
        }
    }
}

/// How reports are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One localized line per workout
    #[default]
    Text,
    /// Pretty JSON array of reports
    Json,
    /// Table with one row per workout
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl InfoMessage {
    /// Render the report with labels in `locale`, every number to 3 decimals
    pub fn get_message(&self, locale: ReportLocale) -> String {
        match locale {
            ReportLocale::Ru => format!(
                "Тип тренировки: {}; Длительность: {:.3} ч.; Дистанция: {:.3} км; \
                 Ср. скорость: {:.3} км/ч; Потрачено ккал: {:.3}.",
                self.training_type, self.duration, self.distance, self.speed, self.calories
            ),
            ReportLocale::En => format!(
                "Training type: {}; Duration: {:.3} h; Distance: {:.3} km; \
                 Mean speed: {:.3} km/h; Calories burned: {:.3}.",
                self.training_type, self.duration, self.distance, self.speed, self.calories
            ),
        }
    }
}

impl fmt::Display for InfoMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_message(ReportLocale::default()))
    }
}

/// Format a report as text; free-function form of [`InfoMessage::get_message`]
pub fn format(report: &InfoMessage, locale: ReportLocale) -> String {
    report.get_message(locale)
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Type")]
    training_type: String,
    #[tabled(rename = "Duration (h)")]
    duration: String,
    #[tabled(rename = "Distance (km)")]
    distance: String,
    #[tabled(rename = "Speed (km/h)")]
    speed: String,
    #[tabled(rename = "Calories")]
    calories: String,
}

impl From<&InfoMessage> for ReportRow {
    fn from(report: &InfoMessage) -> Self {
        Self {
            training_type: report.training_type.clone(),
            duration: format!("{:.3}", report.duration),
            distance: format!("{:.3}", report.distance),
            speed: format!("{:.3}", report.speed),
            calories: format!("{:.3}", report.calories),
        }
    }
}

/// Render a batch of reports in the requested output format
pub fn render(
    reports: &[InfoMessage],
    output: OutputFormat,
    locale: ReportLocale,
) -> serde_json::Result<String> {
    match output {
        OutputFormat::Text => Ok(reports
            .iter()
            .map(|r| r.get_message(locale))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(reports),
        OutputFormat::Table => {
            let rows: Vec<ReportRow> = reports.iter().map(ReportRow::from).collect();
            Ok(Table::new(rows).with(Style::modern()).to_string())
        }
    }
}
