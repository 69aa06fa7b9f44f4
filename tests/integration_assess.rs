// tests/integration_assess.rs
//
// Сквозные тесты: синтетический штрих-код → Assessor → QualityReport.

use std::collections::BTreeMap;

use ultraverify::prelude::*;
use ultraverify::scan::sample;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Чистый символ: чередующиеся блоки `dark`/`light` шириной `module` px.
fn synth_barcode(width: usize, height: usize, module: usize, dark: u8, light: u8) -> LumaImage {
    let mut data = Vec::with_capacity(width * height);
    for _ in 0..height {
        for x in 0..width {
            data.push(if (x / module) % 2 == 0 { dark } else { light });
        }
    }
    LumaImage { data, width, height }
}

#[test]
fn clean_symbol_grades_a() {
    init_logs();
    let img = synth_barcode(64, 40, 8, 30, 230);
    let report = ultraverify::assess(&img).expect("assess");

    assert_eq!(report.scans.len(), 8);
    assert_eq!(report.overall_grade, Grade::A);
    assert_eq!(report.degenerate_scans(), 0);

    let sc = report.parameter(Parameter::SymbolContrast).unwrap();
    assert_eq!(sc.average_score, 200.0);
    let m = report.parameter(Parameter::Modulation).unwrap();
    assert_eq!(m.average_score, 1.0);
    let d = report.parameter(Parameter::Defect).unwrap();
    assert_eq!(d.average_score, 0.0);
}

#[test]
fn scan_rows_skip_boundaries() {
    let img = synth_barcode(16, 100, 4, 0, 255);
    let sampling = sample(&img, 10).unwrap();
    assert_eq!(sampling.rows.len(), 10);
    assert_eq!(sampling.boundary_rows(), Some((0, 99)));

    let report = ultraverify::assess(&img).unwrap();
    let rows: Vec<usize> = report.scans.iter().map(|s| s.row).collect();
    assert_eq!(rows, sampling.rows[1..9].to_vec());
    let idx: Vec<usize> = report.scans.iter().map(|s| s.scan_index).collect();
    assert_eq!(idx, (1..=8).collect::<Vec<_>>());
}

#[test]
fn low_contrast_symbol_fails_rmin_and_contrast() {
    let img = synth_barcode(64, 20, 8, 150, 200);
    let report = ultraverify::assess(&img).unwrap();

    let sc = report.parameter(Parameter::SymbolContrast).unwrap();
    assert_eq!(sc.average_score, 50.0);
    assert_eq!(sc.grade, Grade::F);
    assert_eq!(report.parameter(Parameter::RminPass).unwrap().grade, Grade::F);
    assert_eq!(report.overall_grade, Grade::F);
}

#[test]
fn blank_image_yields_fail_scores_not_error() {
    let img = LumaImage { data: vec![255; 32 * 32], width: 32, height: 32 };
    let report = ultraverify::assess(&img).unwrap();
    assert_eq!(report.degenerate_scans(), 8);
    assert!(report.scans.iter().all(|s| s.scores == ScoreSet::FAIL));
    assert_eq!(report.overall_grade, Grade::F);
}

#[test]
fn structural_errors_abort() {
    let empty = LumaImage { data: Vec::new(), width: 0, height: 0 };
    assert!(matches!(ultraverify::assess(&empty), Err(GradeError::InvalidInput(_))));

    let img = synth_barcode(16, 16, 4, 0, 255);
    let too_few = AssessorBuilder::new().num_scans(2).build();
    assert!(matches!(
        too_few.assess(&img),
        Err(GradeError::ImageTooSmall { num_scans: 2, .. })
    ));
}

#[test]
fn single_row_image_is_graded_from_duplicates() {
    let img = synth_barcode(16, 1, 4, 0, 255);
    let report = ultraverify::assess(&img).unwrap();
    assert_eq!(report.scans.len(), 8);
    assert!(report.scans.iter().all(|s| s.row == 0));
    assert_eq!(report.overall_grade, Grade::A);
}

#[test]
fn missing_threshold_key_is_invalid_configuration() {
    let mut entries = BTreeMap::new();
    entries.insert(
        Parameter::SymbolContrast,
        ParameterThresholds::higher_is_better([178.5, 140.25, 102.0, 51.0]),
    );
    entries.insert(
        Parameter::Modulation,
        ParameterThresholds::higher_is_better([0.7, 0.6, 0.5, 0.4]),
    );
    entries.insert(Parameter::RminPass, ParameterThresholds::lower_is_better([0.5]));
    assert!(matches!(
        ThresholdTable::new(entries),
        Err(GradeError::InvalidConfiguration(_))
    ));
}

#[test]
fn custom_thresholds_change_grades() {
    // SC = 100: по умолчанию D, с мягкой таблицей — A
    let img = synth_barcode(64, 20, 8, 20, 120);
    let default_report = ultraverify::assess(&img).unwrap();
    assert_eq!(
        default_report.parameter(Parameter::SymbolContrast).unwrap().grade,
        Grade::D
    );

    let json = r#"{
        "SymbolContrast": {"values": [90, 70, 50, 30], "lower_is_better": false},
        "Modulation": {"values": [0.7, 0.6, 0.5, 0.4], "lower_is_better": false},
        "Defect": {"values": [0.15, 0.20, 0.25, 0.30], "lower_is_better": true},
        "RminPass": {"values": [0.5], "lower_is_better": true}
    }"#;
    let table = ThresholdTable::from_json_str(json).unwrap();
    let report = AssessorBuilder::new().thresholds(table).build().assess(&img).unwrap();
    assert_eq!(report.parameter(Parameter::SymbolContrast).unwrap().grade, Grade::A);
    assert_eq!(report.overall_grade, Grade::A);
}

#[test]
fn parallel_matches_sequential() {
    // немного шума по строкам, чтобы линии отличались
    let mut img = synth_barcode(96, 60, 6, 40, 220);
    for (i, v) in img.data.iter_mut().enumerate() {
        if (i * 7919) % 13 == 0 {
            *v = v.saturating_add(25);
        }
    }
    let seq = AssessorBuilder::new().num_scans(20).build().assess(&img).unwrap();
    let par = AssessorBuilder::new()
        .num_scans(20)
        .parallel(true)
        .build()
        .assess(&img)
        .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn float_images_are_not_clamped() {
    let width = 40;
    let height = 12;
    let data: Vec<f64> = (0..width * height)
        .map(|i| if ((i % width) / 5) % 2 == 0 { -100.0 } else { 900.0 })
        .collect();
    let img = FloatImage { data, width, height };
    let report = ultraverify::assess(&img).unwrap();
    assert_eq!(report.parameter(Parameter::SymbolContrast).unwrap().average_score, 1000.0);
    assert_eq!(report.overall_grade, Grade::A);
}

#[test]
fn report_serializes_to_json() {
    let img = synth_barcode(64, 40, 8, 30, 230);
    let report = ultraverify::assess(&img).unwrap();
    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["overall_grade"], "A");
    assert_eq!(v["scans"].as_array().unwrap().len(), 8);
    assert_eq!(v["summary"]["RminPass"]["grade"], "A");
}
