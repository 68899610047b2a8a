use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

/// Failure writing the backing store. Reads never fail; they fall back to
/// defaults.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write store file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode store value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Rejected user input, raised before anything reaches the tracker.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields: name is required")]
    MissingName,
    #[error("Please fill in all fields: calories are required")]
    MissingCalories,
    #[error("calories must not be negative")]
    NegativeCalories,
    #[error("calories must be at most {}", u32::MAX)]
    CaloriesTooLarge,
    #[error("Please add a limit")]
    MissingLimit,
    #[error("limit must be greater than zero")]
    NonPositiveLimit,
    #[error("limit must be at most {}", u32::MAX)]
    LimitTooLarge,
    #[error("{field} must be a whole number")]
    NotANumber { field: &'static str },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
