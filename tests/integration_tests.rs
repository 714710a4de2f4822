//! End-to-end tests: package in, formatted report out
//!
//! Covers the reference packages, both error kinds, and batch processing
//! from JSON and CSV package files.

use serde_json::json;
use std::fs;
use tempfile::tempdir;
use workout_stats::error::ErrorSeverity;
use workout_stats::import::ImportManager;
use workout_stats::report::{render, OutputFormat};
use workout_stats::{
    demo_packages, process_file, process_packages, read_package, read_raw_package, read_tokens,
    ActivityType, ImportError, Package, PackageError, ReportLocale, SensorReading, StatsError,
};

fn reading(values: &[f64]) -> SensorReading {
    SensorReading::new(values.to_vec()).unwrap()
}

#[test]
fn test_running_reference_package() {
    let workout = read_package("RUN", &reading(&[15000.0, 1.0, 75.0])).unwrap();
    let report = workout.show_training_info();

    assert_eq!(report.training_type, "Running");
    assert!((report.distance - 9.75).abs() < 1e-9);
    assert!((report.speed - 9.75).abs() < 1e-9);
    assert!((report.calories - 797.805).abs() < 1e-6);
    assert_eq!(
        report.get_message(ReportLocale::Ru),
        "Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 9.750 км; \
         Ср. скорость: 9.750 км/ч; Потрачено ккал: 797.805."
    );
}

#[test]
fn test_walking_reference_package() {
    let workout = read_package("WLK", &reading(&[9000.0, 1.0, 75.0, 180.0])).unwrap();
    let report = workout.show_training_info();

    assert_eq!(report.training_type, "SportsWalking");
    assert!((report.distance - 5.85).abs() < 1e-9);
    assert!((report.speed - 5.85).abs() < 1e-9);
    assert_eq!(
        report.get_message(ReportLocale::Ru),
        "Тип тренировки: SportsWalking; Длительность: 1.000 ч.; Дистанция: 5.850 км; \
         Ср. скорость: 5.850 км/ч; Потрачено ккал: 349.252."
    );
}

#[test]
fn test_swimming_reference_package() {
    let workout = read_package("SWM", &reading(&[720.0, 1.0, 80.0, 25.0, 40.0])).unwrap();
    let report = workout.show_training_info();

    assert_eq!(report.training_type, "Swimming");
    assert!((report.speed - 1.0).abs() < 1e-9);
    assert!((report.calories - 336.0).abs() < 1e-9);
    assert_eq!(
        report.get_message(ReportLocale::En),
        "Training type: Swimming; Duration: 1.000 h; Distance: 0.994 km; \
         Mean speed: 1.000 km/h; Calories burned: 336.000."
    );
}

#[test]
fn test_unknown_code_always_rejected() {
    for values in [vec![15000.0, 1.0, 75.0], vec![720.0, 1.0, 80.0, 25.0, 40.0]] {
        let err = read_package("BIK", &reading(&values)).unwrap_err();
        assert_eq!(
            err,
            PackageError::UnknownActivityType {
                code: "BIK".to_string()
            }
        );
    }
}

#[test]
fn test_unknown_code_wins_over_bad_tokens() {
    // Command-line packages: code resolved before any token is parsed
    for tokens in [&["15000", "1"][..], &["15000", "x", "75"][..]] {
        let err = StatsError::from(read_tokens("BIK", tokens).unwrap_err());
        assert!(
            matches!(err, StatsError::Package(PackageError::UnknownActivityType { ref code }) if code == "BIK"),
            "{:?}",
            tokens
        );
    }
}

#[test]
fn test_two_element_reading_rejected() {
    for code in ["RUN", "WLK", "SWM"] {
        let err = read_raw_package(&Package::new(code, json!([15000, 1]))).unwrap_err();
        assert!(matches!(err, PackageError::InvalidReading { .. }), "{}", code);
    }
    assert!(SensorReading::new(vec![15000.0, 1.0]).is_err());
}

#[test]
fn test_demo_packages_in_reference_order() {
    let (reports, rejected) = process_packages(&demo_packages(), false).unwrap();
    assert!(rejected.is_empty());

    let types: Vec<&str> = reports.iter().map(|r| r.training_type.as_str()).collect();
    assert_eq!(types, ["Swimming", "Running", "SportsWalking"]);

    let text = render(&reports, OutputFormat::Text, ReportLocale::Ru).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().next().unwrap().contains("Дистанция: 0.994 км"));
}

#[test]
fn test_batch_stops_on_first_bad_package() {
    let packages = vec![
        Package::new("RUN", json!([15000, 1, 75])),
        Package::new("BIK", json!([1, 1, 1])),
        Package::new("WLK", json!([9000, 1, 75])),
    ];

    let err = process_packages(&packages, false).unwrap_err();
    match err {
        ImportError::Package { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(source, PackageError::UnknownActivityType { .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_batch_keep_going_collects_rejections() {
    let packages = vec![
        Package::new("RUN", json!([15000, 1, 75])),
        Package::new("BIK", json!([1, 1, 1])),
        Package::new("WLK", json!([9000, 1, 75])),
        Package::new("SWM", json!([720, 1, 80, 25, 40])),
    ];

    let (reports, rejected) = process_packages(&packages, true).unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(rejected.len(), 2);
    assert!(matches!(rejected[1], ImportError::Package { index: 2, .. }));
}

#[test]
fn test_json_file_batch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("packages.json");
    fs::write(
        &path,
        r#"[
            ["SWM", [720, 1, 80, 25, 40]],
            {"workout_type": "RUN", "data": [15000, 1, 75]},
            ["WLK", [9000, 1, 75, 180]]
        ]"#,
    )
    .unwrap();

    let packages = ImportManager::new().import_file(&path).unwrap();
    let (reports, _) = process_packages(&packages, false).unwrap();
    assert_eq!(reports.len(), 3);
    assert!((reports[2].calories - 349.2518).abs() < 1e-3);
}

#[test]
fn test_csv_file_with_non_numeric_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("packages.csv");
    fs::write(&path, "RUN,15000,1,75\nWLK,9000,one,75,180\n").unwrap();

    let packages = ImportManager::new().import_file(&path).unwrap();
    let (reports, rejected) = process_packages(&packages, true).unwrap();
    assert_eq!(reports.len(), 1);
    match &rejected[0] {
        ImportError::Package {
            source: PackageError::InvalidReading { reason, .. },
            ..
        } => assert!(reason.contains("position 1")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_json_report_round_trips_activity_name() {
    let workout = read_package("WLK", &reading(&[9000.0, 1.0, 75.0, 180.0])).unwrap();
    assert_eq!(workout.activity(), ActivityType::SportsWalking);

    let json = render(&[workout.show_training_info()], OutputFormat::Json, ReportLocale::Ru).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["training_type"], "SportsWalking");
}

#[test]
fn test_process_file_outcome() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("packages.txt");
    fs::write(&path, "RUN,15000,1,75\nBIK,1,1,1\n").unwrap();

    let manager = ImportManager::new();
    let outcome = process_file(&manager, &path, Some("csv"), true).unwrap();
    assert_eq!(outcome.total, 2);
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.rejected.len(), 1);

    let err = process_file(&manager, &path, Some("csv"), false).unwrap_err();
    assert_eq!(err.severity(), ErrorSeverity::Warning);
    assert!(err.user_message().contains("BIK"));
}

#[test]
fn test_process_file_unsupported_format() {
    let manager = ImportManager::new();
    let err = process_file(&manager, std::path::Path::new("packages.gpx"), None, false).unwrap_err();
    assert!(matches!(err, StatsError::Import(ImportError::UnsupportedFormat { .. })));
    assert_eq!(err.severity(), ErrorSeverity::Error);
    assert!(err.user_message().contains("supported: JSON, CSV"));
}

#[test]
fn test_process_file_with_semicolon_delimiter() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("packages.csv");
    fs::write(&path, "SWM;720;1;80;25;40\nRUN;15000;1;75\n").unwrap();

    let outcome = process_file(&ImportManager::with_csv_delimiter(b';'), &path, None, false).unwrap();
    assert_eq!(outcome.total, 2);
    assert!(outcome.rejected.is_empty());
    assert!((outcome.reports[1].calories - 797.805).abs() < 1e-6);
}
