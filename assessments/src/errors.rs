//! Error types for the assessment library

use thiserror::Error;

/// Failures raised when converting a raw submission into a typed input or
/// when a calculation precondition is not met.
///
/// Out-of-range values are not errors: they are reported as messages by the
/// validators before calculation is attempted.
#[derive(Error, Debug)]
pub enum CalculationError {
    /// A measurement required by the selected method/sex branch is absent.
    /// The field name is the Portuguese label shown to the user.
    #[error("Medida obrigatória ausente: {0}")]
    MissingMeasurement(&'static str),

    #[error("Valor inválido para {field}: {value}")]
    InvalidChoice {
        field: &'static str,
        value: String,
    },

    #[error("Método de cálculo não suportado: {0}")]
    UnsupportedMethod(String),
}

/// Failures while loading persisted assessment history
///
/// Saving is best-effort and never returns these; they surface only on the
/// explicit load path.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupted history data: {0}")]
    Serde(#[from] serde_json::Error),
}
