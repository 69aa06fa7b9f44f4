//! Выбор скан-линий: `num_scans` строк равномерно по высоте.
//!
//! Первая и последняя строки — только визуальные маркеры границ,
//! в оценку идут внутренние `num_scans - 2`.

use log::debug;

use crate::core::error::GradeError;
use crate::core::types::{ScanProfile, ScanSource};

/// Одна анализируемая скан-линия.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanLine {
    /// Номер линии среди анализируемых, с 1.
    pub index: usize,
    /// y-координата строки.
    pub row: usize,
    pub profile: ScanProfile,
}

/// Результат выборки: все координаты и внутренние линии для анализа.
#[derive(Clone, Debug, PartialEq)]
pub struct Sampling {
    /// Все `num_scans` координат, по неубыванию.
    pub rows: Vec<usize>,
    pub lines: Vec<ScanLine>,
}

impl Sampling {
    /// Граничные строки (первая и последняя), не участвующие в оценке.
    #[inline]
    pub fn boundary_rows(&self) -> Option<(usize, usize)> {
        Some((*self.rows.first()?, *self.rows.last()?))
    }
}

/// `n` равномерных координат на `[0, height-1]`, округление к ближайшей строке.
pub fn sample_rows(height: usize, n: usize) -> Vec<usize> {
    let last = height.saturating_sub(1);
    match n {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let den = 2 * (n - 1);
            (0..n).map(|i| (2 * i * last + (n - 1)) / den).collect()
        }
    }
}

/// Выбрать строки изображения и извлечь внутренние профили.
pub fn sample<S: ScanSource + ?Sized>(img: &S, num_scans: usize) -> Result<Sampling, GradeError> {
    img.validate()?;
    if num_scans < 3 {
        return Err(GradeError::ImageTooSmall {
            num_scans,
            usable: num_scans.saturating_sub(2),
        });
    }

    let rows = sample_rows(img.height(), num_scans);
    let lines: Vec<ScanLine> = rows[1..rows.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, &row)| ScanLine {
            index: i + 1,
            row,
            profile: img.profile(row),
        })
        .collect();

    if lines.is_empty() {
        return Err(GradeError::ImageTooSmall { num_scans, usable: 0 });
    }

    debug!(
        "sample: {}x{} -> rows={:?} (внутренних {})",
        img.width(),
        img.height(),
        rows,
        lines.len()
    );
    Ok(Sampling { rows, lines })
}
