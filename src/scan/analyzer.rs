//! Анализ одной скан-линии: SC, модуляция, дефекты, Rmin.
//!
//! Алгоритм:
//! 1) rmin/rmax, SC = rmax - rmin; Rmin проходит, если rmin < 0.5 * rmax.
//! 2) Бинаризуем по середине диапазона и ищем переходы.
//! 3) Между соседними переходами — элементы; по каждому min/max/mean.
//! 4) MOD = min |mean_i - mean_{i+1}| / SC, Defect = max (max_i - min_i) / SC.
//!
//! Вырожденная строка не ошибка: она сворачивается в [`ScoreSet::FAIL`].

use std::fmt;

use crate::binarize::{binarize_profile, mid_threshold, min_max, segment_elements, transitions};
use crate::grading::ScoreSet;

/// Почему строку нельзя оценить.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DegenerateReason {
    /// Пустая или постоянная строка.
    Flat,
    /// rmax - rmin == 0 (или не число).
    ZeroContrast,
    TooFewEdges { found: usize },
    TooFewElements { found: usize },
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::Flat => f.write_str("плоская строка"),
            DegenerateReason::ZeroContrast => f.write_str("нулевой контраст"),
            DegenerateReason::TooFewEdges { found } => write!(f, "переходов {found} < 2"),
            DegenerateReason::TooFewElements { found } => write!(f, "элементов {found} < 2"),
        }
    }
}

/// Итог анализа: либо честные оценки, либо вырожденный случай.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ProfileAnalysis {
    Scored(ScoreSet),
    Degenerate(DegenerateReason),
}

impl ProfileAnalysis {
    /// Оценки; вырожденный случай сворачивается в [`ScoreSet::FAIL`].
    #[inline]
    pub fn scores(&self) -> ScoreSet {
        match self {
            ProfileAnalysis::Scored(s) => *s,
            ProfileAnalysis::Degenerate(_) => ScoreSet::FAIL,
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, ProfileAnalysis::Degenerate(_))
    }
}

/// Проанализировать профиль. Чистая функция значений строки.
#[allow(clippy::float_cmp)]
pub fn analyze(profile: &[f64]) -> ProfileAnalysis {
    use ProfileAnalysis::Degenerate;

    let Some((rmin, rmax)) = min_max(profile) else {
        return Degenerate(DegenerateReason::Flat);
    };
    if rmin == rmax {
        return Degenerate(DegenerateReason::Flat);
    }

    let rmin_pass = if rmin < 0.5 * rmax { 1.0 } else { 0.0 };

    let sc = rmax - rmin;
    // NaN в строке тоже сюда
    if sc.is_nan() || sc <= 0.0 {
        return Degenerate(DegenerateReason::ZeroContrast);
    }

    let bin = binarize_profile(profile, mid_threshold(rmin, rmax));
    let edges = transitions(&bin);
    if edges.len() < 2 {
        return Degenerate(DegenerateReason::TooFewEdges { found: edges.len() });
    }

    let elems = segment_elements(profile, &edges);
    if elems.len() < 2 {
        return Degenerate(DegenerateReason::TooFewElements { found: elems.len() });
    }

    // поиск стартует с SC, поэтому MOD <= 1
    let ec_min = elems
        .windows(2)
        .map(|w| (w[0].mean - w[1].mean).abs())
        .fold(sc, f64::min);

    let defect = elems
        .iter()
        .map(|e| (e.max - e.min) / sc)
        .fold(0.0, f64::max);

    ProfileAnalysis::Scored(ScoreSet {
        symbol_contrast: sc,
        modulation: ec_min / sc,
        defect,
        rmin_pass,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{Grade, ThresholdTable};

    fn blocks(levels: &[f64], width: usize) -> Vec<f64> {
        levels
            .iter()
            .flat_map(|&v| std::iter::repeat(v).take(width))
            .collect()
    }

    #[test]
    fn constant_profile_fails() {
        let a = analyze(&[77.0; 16]);
        assert_eq!(a, ProfileAnalysis::Degenerate(DegenerateReason::Flat));
        assert_eq!(a.scores(), ScoreSet::FAIL);
        assert_eq!(analyze(&[]).scores(), ScoreSet::FAIL);
    }

    #[test]
    fn single_step_has_one_edge() {
        let p = [50.0, 50.0, 50.0, 50.0, 50.0, 200.0, 200.0, 200.0, 200.0, 200.0];
        let a = analyze(&p);
        assert_eq!(a, ProfileAnalysis::Degenerate(DegenerateReason::TooFewEdges { found: 1 }));
        let g = a.scores().grade(&ThresholdTable::iso_default());
        assert!(g.iter().all(|(_, grade)| grade == Grade::F));
    }

    #[test]
    fn two_edges_give_one_element() {
        // переходы 1 и 3 дают один элемент (2..=3)
        let p = [10.0, 10.0, 90.0, 90.0, 10.0, 10.0];
        assert_eq!(
            analyze(&p),
            ProfileAnalysis::Degenerate(DegenerateReason::TooFewElements { found: 1 })
        );
    }

    #[test]
    fn clean_alternating_blocks_score_ideally() {
        let p = blocks(&[50.0, 200.0, 50.0, 200.0], 5);
        let a = analyze(&p);
        let ProfileAnalysis::Scored(s) = a else { panic!("ожидались оценки: {a:?}") };
        assert_eq!(s.symbol_contrast, 150.0);
        assert_eq!(s.modulation, 1.0);
        assert_eq!(s.defect, 0.0);
        assert_eq!(s.rmin_pass, 1.0);

        // SC = 150 < 178.5: по стандартной таблице только B
        let g = s.grade(&ThresholdTable::iso_default());
        assert_eq!(g.symbol_contrast, Grade::B);
        assert_eq!(g.modulation, Grade::A);
        assert_eq!(g.defect, Grade::A);
        assert_eq!(g.rmin_pass, Grade::A);
        assert_eq!(g.worst(), Grade::B);
    }

    #[test]
    fn modulation_tracks_weakest_adjacent_pair() {
        // средние элементов: 20, 200, 90 (бледный бар), 200, 20
        let p = blocks(&[200.0, 20.0, 200.0, 90.0, 200.0, 20.0, 200.0], 4);
        let s = analyze(&p).scores();
        assert_eq!(s.symbol_contrast, 180.0);
        // min |Δ| = 110 → 110 / 180
        assert!((s.modulation - 110.0 / 180.0).abs() < 1e-12);
        assert_eq!(s.rmin_pass, 1.0);
    }

    #[test]
    fn defect_is_worst_internal_spread() {
        // пятно 170 внутри светлого элемента 200
        let p = [
            20.0, 20.0, 200.0, 170.0, 200.0, 20.0, 20.0, 200.0, 200.0, 20.0,
        ];
        let s = analyze(&p).scores();
        assert!((s.defect - 30.0 / 180.0).abs() < 1e-12);
    }

    #[test]
    fn weak_rmin_fails_rmin_pass() {
        let p = blocks(&[120.0, 200.0, 120.0, 200.0], 3);
        let s = analyze(&p).scores();
        assert_eq!(s.rmin_pass, 0.0);
        assert_eq!(s.symbol_contrast, 80.0);
    }

    #[test]
    fn nan_profile_is_degenerate() {
        let a = analyze(&[f64::NAN, f64::NAN, f64::NAN]);
        assert!(a.is_degenerate());
    }
}
