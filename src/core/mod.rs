// src/core/mod.rs
//
// Общие типы и ошибки, не зависящие от конкретных метрик.

pub mod error;
pub mod types;
