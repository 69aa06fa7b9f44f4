//! Скан-линии: выборка строк и анализ профилей.

pub mod analyzer;
pub mod sampler;

pub use analyzer::{analyze, DegenerateReason, ProfileAnalysis};
pub use sampler::{sample, sample_rows, ScanLine, Sampling};
