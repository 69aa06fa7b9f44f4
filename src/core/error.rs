// src/core/error.rs
//
// Ошибки верхнего уровня. Вырожденные скан-линии (плоская строка, нет перепадов)
// сюда НЕ попадают: они поглощаются анализатором в «провальные» оценки.

use thiserror::Error;

/// Фатальные ошибки оценки: частичный отчёт в этих случаях не строится.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GradeError {
    /// Изображение пустое или буфер не соответствует размерам.
    #[error("некорректный вход: {0}")]
    InvalidInput(String),

    /// Меньше трёх строк для сканирования (две крайние — только маркеры).
    #[error("изображение слишком мало: запрошено {num_scans} скан-линий, пригодных для анализа {usable}")]
    ImageTooSmall { num_scans: usize, usable: usize },

    /// Таблица порогов неполная или не монотонная.
    #[error("некорректная конфигурация порогов: {0}")]
    InvalidConfiguration(String),
}
