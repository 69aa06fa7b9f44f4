//! Сводка по скан-линиям: средние по параметрам и итоговая оценка.
//!
//! Итог символа — худшая из четырёх оценок по средним (A > B > C > D > F).
//! Отчёт строится один раз и дальше не меняется; отрисовка работает только с ним.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::grading::{Grade, GradeSet, Parameter, ScoreSet, ThresholdTable};
use crate::scan::ProfileAnalysis;

/// Отчёт по одной скан-линии.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScanReport {
    /// Номер линии, с 1.
    pub scan_index: usize,
    /// y-координата строки.
    pub row: usize,
    pub scores: ScoreSet,
    pub grades: GradeSet,
    /// Строка была вырожденной и получила «провальные» оценки.
    pub degenerate: bool,
}

impl ScanReport {
    pub fn new(scan_index: usize, row: usize, analysis: &ProfileAnalysis, table: &ThresholdTable) -> Self {
        let scores = analysis.scores();
        Self {
            scan_index,
            row,
            scores,
            grades: scores.grade(table),
            degenerate: analysis.is_degenerate(),
        }
    }
}

/// Среднее значение параметра по всем линиям и его оценка.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ParameterSummary {
    /// NaN, если линий нет.
    pub average_score: f64,
    pub grade: Grade,
}

/// Итоговый отчёт оценки качества.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityReport {
    pub scans: Vec<ScanReport>,
    pub summary: BTreeMap<Parameter, ParameterSummary>,
    pub overall_grade: Grade,
}

impl QualityReport {
    #[inline]
    pub fn parameter(&self, p: Parameter) -> Option<&ParameterSummary> {
        self.summary.get(&p)
    }

    /// Сколько линий были вырожденными.
    pub fn degenerate_scans(&self) -> usize {
        self.scans.iter().filter(|s| s.degenerate).count()
    }
}

/// Свести отчёты по линиям в общий.
///
/// Пустой список: средние NaN, оценки принудительно F.
#[allow(clippy::cast_precision_loss)]
pub fn summarize(scans: Vec<ScanReport>, table: &ThresholdTable) -> QualityReport {
    let summary: BTreeMap<Parameter, ParameterSummary> = Parameter::ALL
        .into_iter()
        .map(|p| {
            let entry = if scans.is_empty() {
                ParameterSummary { average_score: f64::NAN, grade: Grade::F }
            } else {
                let sum: f64 = scans.iter().map(|s| s.scores.get(p)).sum();
                let average_score = sum / scans.len() as f64;
                ParameterSummary {
                    average_score,
                    grade: table.grade_for(p, average_score),
                }
            };
            (p, entry)
        })
        .collect();

    let overall_grade = Grade::worst(summary.values().map(|s| s.grade));

    QualityReport {
        scans,
        summary,
        overall_grade,
    }
}
