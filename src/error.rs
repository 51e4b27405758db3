use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// JSON envelope for error responses: `{"error": {code, message, details}}`.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload, also embedded in bulk per-item outcomes.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application error taxonomy.
///
/// Validation errors (`InvalidUrl`, `InvalidFormat`) are raised before any
/// store call. Uniqueness conflicts surface as `AliasTaken` whether they were
/// caught optimistically by the allocator or authoritatively by the store's
/// unique constraint. `AliasExists` is the batch-local variant reported per
/// bulk line. Store and network failures map to `Unavailable`.
#[derive(Debug)]
pub enum AppError {
    InvalidUrl { message: String, details: Value },
    InvalidFormat { message: String, details: Value },
    AliasTaken { message: String, details: Value },
    AliasExists { message: String, details: Value },
    AllocationExhausted { message: String, details: Value },
    NotFound { message: String, details: Value },
    LimitReached { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    Unavailable { message: String, details: Value },
    PersistFailed { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidFormat {
            message: message.into(),
            details,
        }
    }

    pub fn alias_taken(message: impl Into<String>, details: Value) -> Self {
        Self::AliasTaken {
            message: message.into(),
            details,
        }
    }

    pub fn alias_exists(message: impl Into<String>, details: Value) -> Self {
        Self::AliasExists {
            message: message.into(),
            details,
        }
    }

    pub fn allocation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::AllocationExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn limit_reached(message: impl Into<String>, details: Value) -> Self {
        Self::LimitReached {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    pub fn persist_failed(message: impl Into<String>, details: Value) -> Self {
        Self::PersistFailed {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidFormat { .. } => "invalid_format",
            Self::AliasTaken { .. } => "alias_taken",
            Self::AliasExists { .. } => "alias_exists",
            Self::AllocationExhausted { .. } => "allocation_exhausted",
            Self::NotFound { .. } => "not_found",
            Self::LimitReached { .. } => "limit_reached",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Unavailable { .. } => "unavailable",
            Self::PersistFailed { .. } => "persist_failed",
            Self::Internal { .. } => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidFormat { .. } => StatusCode::BAD_REQUEST,
            Self::AliasTaken { .. } | Self::AliasExists { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::LimitReached { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::AllocationExhausted { .. } | Self::Unavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::PersistFailed { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::InvalidUrl { message, .. }
            | Self::InvalidFormat { message, .. }
            | Self::AliasTaken { message, .. }
            | Self::AliasExists { message, .. }
            | Self::AllocationExhausted { message, .. }
            | Self::NotFound { message, .. }
            | Self::LimitReached { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Unavailable { message, .. }
            | Self::PersistFailed { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    fn details(&self) -> &Value {
        match self {
            Self::InvalidUrl { details, .. }
            | Self::InvalidFormat { details, .. }
            | Self::AliasTaken { details, .. }
            | Self::AliasExists { details, .. }
            | Self::AllocationExhausted { details, .. }
            | Self::NotFound { details, .. }
            | Self::LimitReached { details, .. }
            | Self::Unauthorized { details, .. }
            | Self::Unavailable { details, .. }
            | Self::PersistFailed { details, .. }
            | Self::Internal { details, .. } => details,
        }
    }

    /// Converts to the serializable payload used in bulk per-item outcomes.
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.message().to_string(),
            details: self.details().clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::alias_taken(
                    "Alias already exists",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        tracing::error!("database error: {e}");
        AppError::unavailable("Storage backend unavailable", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::invalid_format(
            "Request validation failed",
            serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({})),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::invalid_url("bad", json!({})),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::invalid_format("bad", json!({})),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::alias_taken("taken", json!({})),
                StatusCode::CONFLICT,
            ),
            (
                AppError::alias_exists("taken", json!({})),
                StatusCode::CONFLICT,
            ),
            (
                AppError::not_found("missing", json!({})),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::limit_reached("quota", json!({})),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                AppError::unauthorized("no", json!({})),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::allocation_exhausted("spent", json!({})),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::unavailable("down", json!({})),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::persist_failed("lost", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "wrong status for {}", err.code());
        }
    }

    #[test]
    fn test_error_info_carries_code_and_message() {
        let err = AppError::alias_taken("Alias already exists", json!({ "alias": "my-post" }));
        let info = err.to_error_info();

        assert_eq!(info.code, "alias_taken");
        assert_eq!(info.message, "Alias already exists");
        assert_eq!(info.details["alias"], "my-post");
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::not_found("Short link not found", json!({}));
        assert_eq!(err.to_string(), "not_found: Short link not found");
    }

    #[test]
    fn test_validation_errors_map_to_invalid_format() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(url)]
            url: String,
        }

        let probe = Probe {
            url: "not-a-url".to_string(),
        };
        let err: AppError = probe.validate().unwrap_err().into();

        assert!(matches!(err, AppError::InvalidFormat { .. }));
    }
}
