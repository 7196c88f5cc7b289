//! Error types for the forecast core.

use thiserror::Error;

/// Result type alias using [`ForecastError`].
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Primary error type for forecast tile/point operations.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("no grib file found for model={model} offset={offset}")]
    FileNotFound { model: String, offset: i32 },

    #[error("failed to decode grib message: {0}")]
    GribDecodeError(String),

    #[error("no grib message matched parameter={parameter} level={level:?} level_type={level_type:?} step_type={step_type:?}")]
    NoMatchingMessage {
        parameter: String,
        level: Option<u32>,
        level_type: Option<String>,
        step_type: Option<String>,
    },

    #[error("insufficient data to build interpolator: {0}")]
    InsufficientData(String),

    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid tile coordinates z={z} x={x} y={y}")]
    InvalidCoords { z: i32, x: i64, y: i64 },
}

impl ForecastError {
    /// HTTP status code a transport layer should map this error to.
    ///
    /// `CacheUnavailable` and `SerializationError` are never surfaced this
    /// way in practice (callers swallow them and fall through to a
    /// recompute), but the mapping is total so a transport layer never has
    /// to guess.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ForecastError::UnknownModel(_)
            | ForecastError::FileNotFound { .. }
            | ForecastError::NoMatchingMessage { .. }
            | ForecastError::InvalidCoords { .. } => 404,

            ForecastError::GribDecodeError(_) | ForecastError::InsufficientData(_) => 500,

            ForecastError::CacheUnavailable(_) | ForecastError::SerializationError(_) => 500,

            ForecastError::Cancelled => 499,
        }
    }

    /// Whether this error should be swallowed (logged, degrade to a fresh
    /// compute) rather than propagated to the caller.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            ForecastError::CacheUnavailable(_) | ForecastError::SerializationError(_)
        )
    }
}

impl From<std::io::Error> for ForecastError {
    fn from(err: std::io::Error) -> Self {
        ForecastError::GribDecodeError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::SerializationError(err.to_string())
    }
}

impl From<bincode::Error> for ForecastError {
    fn from(err: bincode::Error) -> Self {
        ForecastError::SerializationError(err.to_string())
    }
}

impl From<grib2_parser::Grib2Error> for ForecastError {
    fn from(err: grib2_parser::Grib2Error) -> Self {
        ForecastError::GribDecodeError(err.to_string())
    }
}
