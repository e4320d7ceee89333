use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct TourError {
    pub code: String,
    pub message: String,
    pub step_index: Option<usize>,
}

impl TourError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            step_index: None,
        }
    }

    pub fn at_step(code: impl Into<String>, message: impl Into<String>, step_index: usize) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            step_index: Some(step_index),
        }
    }
}
