//! Глобальная бинаризация профиля и разбиение на элементы (бары/пробелы).
//!
//! Порог — середина между минимумом и максимумом строки. Адаптивный порог
//! здесь не нужен: оценка качества как раз должна «видеть» неравномерность.

/// Минимум и максимум профиля. `None` для пустой строки.
#[inline]
pub fn min_max(profile: &[f64]) -> Option<(f64, f64)> {
    let (&first, rest) = profile.split_first()?;
    Some(rest.iter().fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

/// Середина диапазона: `rmin + (rmax - rmin) / 2`.
#[inline]
pub fn mid_threshold(rmin: f64, rmax: f64) -> f64 {
    rmin + (rmax - rmin) / 2.0
}

/// Бинаризация строки: true = светлее порога (строго больше).
pub fn binarize_profile(profile: &[f64], threshold: f64) -> Vec<bool> {
    profile.iter().map(|&v| v > threshold).collect()
}

/// Индексы `i`, где `bin[i] != bin[i + 1]` — переходы через порог.
pub fn transitions(bin: &[bool]) -> Vec<usize> {
    bin.windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] != w[1])
        .map(|(i, _)| i)
        .collect()
}

/// Один элемент профиля между двумя соседними переходами.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Element {
    /// Первый индекс (включительно).
    pub start: usize,
    /// Последний индекс + 1.
    pub end: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Разбить профиль на элементы по переходам `edges`.
///
/// Элемент `k` занимает `(edges[k], edges[k + 1]]`, т.е. `edges[k]+1 ..= edges[k+1]`.
/// Пустые и выходящие за границы диапазоны пропускаются.
#[allow(clippy::cast_precision_loss)]
pub fn segment_elements(profile: &[f64], edges: &[usize]) -> Vec<Element> {
    let mut out = Vec::with_capacity(edges.len().saturating_sub(1));
    for w in edges.windows(2) {
        let start = w[0] + 1;
        let end = w[1] + 1;
        if start >= end || end > profile.len() {
            continue;
        }
        let seg = &profile[start..end];
        let Some((min, max)) = min_max(seg) else { continue };
        let mean = seg.iter().sum::<f64>() / seg.len() as f64;
        out.push(Element { start, end, min, max, mean });
    }
    out
}
