// src/core/types.rs
//
// Представления изображений и профилей сканирования.
// Ядро только читает изображение; владеет им вызывающая сторона.

use std::ops::Deref;

use crate::core::error::GradeError;

/// Простое представление градаций серого.
/// Буфер `data` — построчно, по строкам (row-major), 8 бит на пиксель.
#[derive(Clone, Copy, Debug)]
pub struct GrayImage<'a> {
    pub data: &'a [u8],
    pub width: usize,
    pub height: usize,
}

impl<'a> GrayImage<'a> {
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

/// LumaImage — «владельческая» 8-битная картинка.
#[derive(Clone, Debug)]
pub struct LumaImage {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl LumaImage {
    #[inline]
    pub fn as_gray(&self) -> GrayImage<'_> {
        GrayImage {
            data: &self.data,
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

/// Позволяем делать `.into()` из GrayImage в LumaImage (копия буфера).
impl<'a> From<GrayImage<'a>> for LumaImage {
    #[inline]
    fn from(g: GrayImage<'a>) -> Self {
        Self {
            data: g.data.to_vec(),
            width: g.width,
            height: g.height,
        }
    }
}

/// Изображение с «открытой» шкалой яркости (f64, без клиппинга).
/// Нужна, когда вход уже нормирован или получен не из 8-битного источника.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatImage {
    pub data: Vec<f64>,
    pub width: usize,
    pub height: usize,
}

impl FloatImage {
    #[inline]
    pub fn row(&self, y: usize) -> &[f64] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

/// Одна горизонтальная строка яркостей, взятая на фиксированном `y`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanProfile(Vec<f64>);

impl ScanProfile {
    #[inline]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[inline]
    pub fn from_u8(row: &[u8]) -> Self {
        Self(row.iter().map(|&v| f64::from(v)).collect())
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for ScanProfile {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for ScanProfile {
    #[inline]
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Источник скан-профилей: всё, что умеет отдать строку яркостей.
///
/// Многоканальные изображения сводятся к одному каналу до этого уровня.
pub trait ScanSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Фактическая длина буфера (для проверки согласованности размеров).
    fn sample_count(&self) -> usize;

    /// Строка `y` как профиль. Вызывается только для `y < height()`.
    fn profile(&self, y: usize) -> ScanProfile;

    /// Проверка «структурной» корректности входа.
    fn validate(&self) -> Result<(), GradeError> {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return Err(GradeError::InvalidInput(format!(
                "пустое изображение {w}x{h}"
            )));
        }
        let expected = w
            .checked_mul(h)
            .ok_or_else(|| GradeError::InvalidInput("переполнение размера".into()))?;
        if self.sample_count() < expected {
            return Err(GradeError::InvalidInput(format!(
                "буфер {} меньше, чем {w}x{h}",
                self.sample_count()
            )));
        }
        Ok(())
    }
}

impl<'a> ScanSource for GrayImage<'a> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn sample_count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn profile(&self, y: usize) -> ScanProfile {
        ScanProfile::from_u8(self.row(y))
    }
}

impl ScanSource for LumaImage {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn sample_count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn profile(&self, y: usize) -> ScanProfile {
        ScanProfile::from_u8(self.row(y))
    }
}

impl ScanSource for FloatImage {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn sample_count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn profile(&self, y: usize) -> ScanProfile {
        ScanProfile::new(self.row(y).to_vec())
    }
}
