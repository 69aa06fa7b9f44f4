//! Всё нужное для типичного использования одним `use`.

pub use crate::api::{AssessOptions, Assessor, AssessorBuilder};
pub use crate::core::error::GradeError;
pub use crate::core::types::{FloatImage, GrayImage, LumaImage, ScanProfile, ScanSource};
pub use crate::grading::{
    Direction, Grade, GradeSet, Parameter, ParameterThresholds, ScoreSet, ThresholdTable,
};
pub use crate::report::{ParameterSummary, QualityReport, ScanReport};
pub use crate::scan::{analyze, ProfileAnalysis};
