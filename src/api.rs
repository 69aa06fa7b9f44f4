// src/api.rs
//
// Верхнеуровневый API: выборка строк → анализ каждой → оценки → сводка.
// Таблица порогов неизменяема и живёт внутри Assessor.

use log::{debug, info};

use crate::core::error::GradeError;
use crate::core::types::ScanSource;
use crate::grading::ThresholdTable;
use crate::report::{summarize, QualityReport, ScanReport};
use crate::scan::{analyze, sample, ProfileAnalysis, ScanLine};

/// Параметры оценки.
#[derive(Clone, Debug)]
pub struct AssessOptions {
    /// Сколько строк брать (равномерно по высоте), включая две граничные.
    pub num_scans: usize,
    pub thresholds: ThresholdTable,
    /// Анализировать линии параллельно (нужна фича `parallel`).
    pub parallel: bool,
}

impl Default for AssessOptions {
    fn default() -> Self {
        Self {
            num_scans: 10,
            thresholds: ThresholdTable::iso_default(),
            parallel: false,
        }
    }
}

/// Оценщик качества 1D-символа.
#[derive(Clone, Debug, Default)]
pub struct Assessor {
    opts: AssessOptions,
}

impl Assessor {
    #[inline]
    pub fn new(opts: AssessOptions) -> Self {
        Self { opts }
    }

    #[inline]
    pub fn options(&self) -> &AssessOptions {
        &self.opts
    }

    /// Полная оценка изображения. Ошибка — только структурная (вход/размер).
    pub fn assess<S: ScanSource + ?Sized>(&self, img: &S) -> Result<QualityReport, GradeError> {
        let sampling = sample(img, self.opts.num_scans)?;
        info!(
            "assess: {}x{}, линий для анализа {}",
            img.width(),
            img.height(),
            sampling.lines.len()
        );

        let scans = self.grade_lines(&sampling.lines);
        for s in &scans {
            debug!(
                "  скан #{} (y={}): SC={:.1}({}) MOD={:.2}({}) DEF={:.2}({}) Rmin={}({}){}",
                s.scan_index,
                s.row,
                s.scores.symbol_contrast,
                s.grades.symbol_contrast,
                s.scores.modulation,
                s.grades.modulation,
                s.scores.defect,
                s.grades.defect,
                s.scores.rmin_pass,
                s.grades.rmin_pass,
                if s.degenerate { " [вырожденная]" } else { "" }
            );
        }

        let report = summarize(scans, &self.opts.thresholds);
        info!("assess: итоговая оценка {}", report.overall_grade);
        Ok(report)
    }

    fn grade_line(&self, line: &ScanLine) -> ScanReport {
        let analysis = analyze(&line.profile);
        if let ProfileAnalysis::Degenerate(reason) = analysis {
            debug!("скан #{} (y={}): {reason}, оценки провальные", line.index, line.row);
        }
        ScanReport::new(line.index, line.row, &analysis, &self.opts.thresholds)
    }

    #[cfg(feature = "parallel")]
    fn grade_lines(&self, lines: &[ScanLine]) -> Vec<ScanReport> {
        use rayon::prelude::*;

        if self.opts.parallel {
            // collect у индексированного par_iter сохраняет порядок
            lines.par_iter().map(|l| self.grade_line(l)).collect()
        } else {
            lines.iter().map(|l| self.grade_line(l)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn grade_lines(&self, lines: &[ScanLine]) -> Vec<ScanReport> {
        lines.iter().map(|l| self.grade_line(l)).collect()
    }
}

/// Сборщик оценщика.
#[derive(Clone, Debug, Default)]
pub struct AssessorBuilder {
    opts: AssessOptions,
}

impl AssessorBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn num_scans(mut self, n: usize) -> Self {
        self.opts.num_scans = n;
        self
    }

    /// Полная замена таблицы порогов.
    #[inline]
    pub fn thresholds(mut self, table: ThresholdTable) -> Self {
        self.opts.thresholds = table;
        self
    }

    #[inline]
    pub fn parallel(mut self, on: bool) -> Self {
        self.opts.parallel = on;
        self
    }

    #[inline]
    pub fn build(self) -> Assessor {
        Assessor::new(self.opts)
    }
}
