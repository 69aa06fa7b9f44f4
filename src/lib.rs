#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Публичные модули
pub mod api;      // высокий уровень: Assessor и его сборщик
pub mod core;     // общие типы/ошибки (GrayImage, ScanSource и др.)
pub mod prelude;  // удобные re-export'ы

pub mod binarize; // глобальная бинаризация и элементы строки
pub mod grading;  // параметры, оценки, таблица порогов
pub mod report;   // сводка по линиям
pub mod scan;     // выборка и анализ скан-линий

// Реэкспорт базовых типов в корень
pub use crate::api::{AssessOptions, Assessor, AssessorBuilder};
pub use crate::core::error::GradeError;
pub use crate::core::types::{FloatImage, GrayImage, LumaImage, ScanProfile, ScanSource};
pub use crate::grading::{Grade, Parameter, ThresholdTable};
pub use crate::report::QualityReport;

/// Оценка со стандартными параметрами (10 линий, стандартные пороги).
#[inline]
pub fn assess<S: ScanSource + ?Sized>(img: &S) -> Result<QualityReport, GradeError> {
    Assessor::default().assess(img)
}
