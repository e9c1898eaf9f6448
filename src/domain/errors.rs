use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised across the chart pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("Network Error: {0}")]
    Network(String),
    #[error("Parse Error: {0}")]
    Parse(String),
    #[error("Validation Error: {0}")]
    Validation(String),
    #[error("Storage Error: {0}")]
    Storage(String),
    #[error("Chart Error: {0}")]
    Chart(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
