//! Таблица порогов: сырое значение параметра → буква A–F.
//!
//! Таблица неизменяема и передаётся явно в каждый вызов оценки.
//! Пользовательская таблица заменяет стандартную целиком (без слияния по ключам).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Grade, Parameter};
use crate::core::error::GradeError;

/// Направление «лучше» для параметра.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

/// Границы оценок одного параметра.
///
/// Для градуируемых параметров — 4 значения `[A, B, C, D]`, для `RminPass` — одно.
/// В JSON хранится как `{"values": [...], "lower_is_better": bool}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawThresholds", into = "RawThresholds")]
pub struct ParameterThresholds {
    pub values: Vec<f64>,
    pub direction: Direction,
}

impl ParameterThresholds {
    pub fn higher_is_better(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), direction: Direction::HigherIsBetter }
    }

    pub fn lower_is_better(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), direction: Direction::LowerIsBetter }
    }

    fn check(&self, p: Parameter) -> Result<(), GradeError> {
        let expected = if p == Parameter::RminPass { 1 } else { 4 };
        if self.values.len() != expected {
            return Err(GradeError::InvalidConfiguration(format!(
                "{p}: ожидается {expected} порог(а), получено {}",
                self.values.len()
            )));
        }
        if let Some(v) = self.values.iter().find(|v| !v.is_finite()) {
            return Err(GradeError::InvalidConfiguration(format!(
                "{p}: порог {v} не является конечным числом"
            )));
        }
        let monotonic = self.values.windows(2).all(|w| match self.direction {
            Direction::LowerIsBetter => w[0] <= w[1],
            Direction::HigherIsBetter => w[0] >= w[1],
        });
        if !monotonic {
            return Err(GradeError::InvalidConfiguration(format!(
                "{p}: пороги {:?} не монотонны для {:?}",
                self.values, self.direction
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawThresholds {
    values: Vec<f64>,
    lower_is_better: bool,
}

impl From<RawThresholds> for ParameterThresholds {
    fn from(raw: RawThresholds) -> Self {
        let direction = if raw.lower_is_better {
            Direction::LowerIsBetter
        } else {
            Direction::HigherIsBetter
        };
        Self { values: raw.values, direction }
    }
}

impl From<ParameterThresholds> for RawThresholds {
    fn from(t: ParameterThresholds) -> Self {
        Self {
            values: t.values,
            lower_is_better: t.direction == Direction::LowerIsBetter,
        }
    }
}

/// Полная проверенная таблица порогов для всех четырёх параметров.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    entries: BTreeMap<Parameter, ParameterThresholds>,
}

impl ThresholdTable {
    /// Собрать таблицу, проверив полноту и монотонность.
    pub fn new(entries: BTreeMap<Parameter, ParameterThresholds>) -> Result<Self, GradeError> {
        for p in Parameter::ALL {
            let t = entries.get(&p).ok_or_else(|| {
                GradeError::InvalidConfiguration(format!("нет порогов для {p}"))
            })?;
            t.check(p)?;
        }
        Ok(Self { entries })
    }

    /// Стандартная таблица (доли 0.70/0.55/0.40/0.20 от шкалы 255 для SC).
    ///
    /// Порог `RminPass` (0.5) хранится для полноты, но оценка по нему бинарная.
    pub fn iso_default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            Parameter::SymbolContrast,
            ParameterThresholds::higher_is_better([0.70 * 255.0, 0.55 * 255.0, 0.40 * 255.0, 0.20 * 255.0]),
        );
        entries.insert(
            Parameter::Modulation,
            ParameterThresholds::higher_is_better([0.7, 0.6, 0.5, 0.4]),
        );
        entries.insert(
            Parameter::Defect,
            ParameterThresholds::lower_is_better([0.15, 0.20, 0.25, 0.30]),
        );
        entries.insert(Parameter::RminPass, ParameterThresholds::lower_is_better([0.5]));
        Self { entries }
    }

    /// Разбор JSON вида `{"SymbolContrast": {"values": [...], "lower_is_better": false}, ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, GradeError> {
        let UniqueEntries(entries) = serde_json::from_str(json)
            .map_err(|e| GradeError::InvalidConfiguration(format!("JSON: {e}")))?;
        Self::new(entries)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, GradeError> {
        let data = fs::read_to_string(path).map_err(|e| {
            GradeError::InvalidConfiguration(format!("не удалось прочитать {}: {e}", path.display()))
        })?;
        Self::from_json_str(&data)
    }

    #[inline]
    pub fn get(&self, p: Parameter) -> Option<&ParameterThresholds> {
        self.entries.get(&p)
    }

    /// Оценка значения `score` параметра `p`.
    ///
    /// `RminPass` бинарен: 1 → A, иначе F. NaN не проходит ни одно сравнение и даёт F.
    #[allow(clippy::float_cmp)]
    pub fn grade_for(&self, p: Parameter, score: f64) -> Grade {
        const LADDER: [Grade; 4] = [Grade::A, Grade::B, Grade::C, Grade::D];

        if p == Parameter::RminPass {
            return if score == 1.0 { Grade::A } else { Grade::F };
        }
        let Some(t) = self.entries.get(&p) else {
            return Grade::NotApplicable;
        };
        let passes = |bound: f64| match t.direction {
            Direction::LowerIsBetter => score <= bound,
            Direction::HigherIsBetter => score >= bound,
        };
        t.values
            .iter()
            .zip(LADDER)
            .find(|(&bound, _)| passes(bound))
            .map_or(Grade::F, |(_, g)| g)
    }

    /// То же по строковому имени; неизвестное имя → `N/A`.
    pub fn grade_for_name(&self, name: &str, score: f64) -> Grade {
        Parameter::from_name(name).map_or(Grade::NotApplicable, |p| self.grade_for(p, score))
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::iso_default()
    }
}

impl<'de> Deserialize<'de> for ThresholdTable {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let UniqueEntries(entries) = UniqueEntries::deserialize(d)?;
        Self::new(entries).map_err(serde::de::Error::custom)
    }
}

/// Карта порогов, в которой параметр встречается ровно один раз.
///
/// `SymbolContrast` и `Symbol Contrast` — один ключ; повтор любого написания — ошибка.
struct UniqueEntries(BTreeMap<Parameter, ParameterThresholds>);

impl<'de> Deserialize<'de> for UniqueEntries {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> serde::de::Visitor<'de> for EntriesVisitor {
            type Value = UniqueEntries;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("таблицу порогов по параметрам")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = BTreeMap::new();
                while let Some((p, t)) = map.next_entry::<Parameter, ParameterThresholds>()? {
                    if entries.insert(p, t).is_some() {
                        return Err(serde::de::Error::custom(format!("параметр {p} задан повторно")));
                    }
                }
                Ok(UniqueEntries(entries))
            }
        }

        d.deserialize_map(EntriesVisitor)
    }
}
