//! Параметры качества, буквенные оценки и их наборы.
//!
//! Набор параметров закрыт (enum), поэтому «неизвестный параметр» возможен
//! только на границе со строковыми именами — см. [`Parameter::from_name`].

pub mod thresholds;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use thresholds::{Direction, ParameterThresholds, ThresholdTable};

/// Четыре параметра качества одной скан-линии.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Parameter {
    #[serde(alias = "Symbol Contrast")]
    SymbolContrast,
    Modulation,
    Defect,
    #[serde(alias = "Rmin Pass")]
    RminPass,
}

impl Parameter {
    /// Порядок вывода во всех отчётах.
    pub const ALL: [Parameter; 4] = [
        Parameter::SymbolContrast,
        Parameter::Modulation,
        Parameter::Defect,
        Parameter::RminPass,
    ];

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Parameter::SymbolContrast => "SymbolContrast",
            Parameter::Modulation => "Modulation",
            Parameter::Defect => "Defect",
            Parameter::RminPass => "RminPass",
        }
    }

    /// Человекочитаемая подпись (с пробелом), как в печатных отчётах.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Parameter::SymbolContrast => "Symbol Contrast",
            Parameter::Modulation => "Modulation",
            Parameter::Defect => "Defect",
            Parameter::RminPass => "Rmin Pass",
        }
    }

    /// Разбор имени: принимается и `SymbolContrast`, и `Symbol Contrast`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name || p.label() == name)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("неизвестный параметр: {s}"))
    }
}

/// Буквенная оценка. `NotApplicable` — «N/A» для неизвестных параметров.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Grade {
    /// Ранг: A=4 … F=0. `N/A` ранжируется ниже F (-1).
    #[inline]
    pub fn rank(self) -> i8 {
        match self {
            Grade::A => 4,
            Grade::B => 3,
            Grade::C => 2,
            Grade::D => 1,
            Grade::F => 0,
            Grade::NotApplicable => -1,
        }
    }

    /// Худшая из оценок; для пустого набора — F.
    pub fn worst<I: IntoIterator<Item = Grade>>(grades: I) -> Grade {
        grades
            .into_iter()
            .min_by_key(|g| g.rank())
            .unwrap_or(Grade::F)
    }

    /// A и B считаются «зелёными» в отчётах.
    #[inline]
    pub fn is_passing(self) -> bool {
        matches!(self, Grade::A | Grade::B)
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Сырые значения четырёх параметров для одной скан-линии.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub symbol_contrast: f64,
    pub modulation: f64,
    pub defect: f64,
    /// 1.0 — прошла, 0.0 — нет.
    pub rmin_pass: f64,
}

impl ScoreSet {
    /// Худшие значения, которыми заменяется вырожденная строка.
    pub const FAIL: ScoreSet = ScoreSet {
        symbol_contrast: 0.0,
        modulation: 0.0,
        defect: 1.0,
        rmin_pass: 0.0,
    };

    #[inline]
    pub fn get(&self, p: Parameter) -> f64 {
        match p {
            Parameter::SymbolContrast => self.symbol_contrast,
            Parameter::Modulation => self.modulation,
            Parameter::Defect => self.defect,
            Parameter::RminPass => self.rmin_pass,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, f64)> + '_ {
        Parameter::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Оценки по каждому параметру согласно таблице порогов.
    pub fn grade(&self, table: &ThresholdTable) -> GradeSet {
        GradeSet {
            symbol_contrast: table.grade_for(Parameter::SymbolContrast, self.symbol_contrast),
            modulation: table.grade_for(Parameter::Modulation, self.modulation),
            defect: table.grade_for(Parameter::Defect, self.defect),
            rmin_pass: table.grade_for(Parameter::RminPass, self.rmin_pass),
        }
    }
}

/// Буквенные оценки, один к одному с [`ScoreSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSet {
    pub symbol_contrast: Grade,
    pub modulation: Grade,
    pub defect: Grade,
    pub rmin_pass: Grade,
}

impl GradeSet {
    #[inline]
    pub fn get(&self, p: Parameter) -> Grade {
        match p {
            Parameter::SymbolContrast => self.symbol_contrast,
            Parameter::Modulation => self.modulation,
            Parameter::Defect => self.defect,
            Parameter::RminPass => self.rmin_pass,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, Grade)> + '_ {
        Parameter::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    #[inline]
    pub fn worst(&self) -> Grade {
        Grade::worst(self.iter().map(|(_, g)| g))
    }
}
