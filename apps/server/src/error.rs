//! API error layer.
//!
//! Every failure surfaces to clients as a `{code, message}` JSON body with an
//! HTTP status derived from the error kind:
//!
//! | Kind                                  | Status | Code        |
//! |---------------------------------------|--------|-------------|
//! | Validation / imbalance                | 400    | VALIDATION / IMBALANCE |
//! | Missing resource (direct fetch)       | 404    | NOT_FOUND   |
//! | Missing reference (inside a posting)  | 400    | NOT_FOUND   |
//! | Duplicate key / referenced rows       | 409    | CONFLICT    |
//! | Sync leg unreachable or rejected      | 502    | SYNC_FAILED |
//! | Anything else                         | 500    | INTERNAL    |
//!
//! Postings report missing references as 400 because the id came from the
//! request body, not the URL; `ApiError::posting` applies that downgrade.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use tradepost_core::CoreError;
use tradepost_db::DbError;
use tradepost_sync::SyncError;

/// Handler result: JSON payload or an API error.
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Machine-readable error category carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Validation,
    Imbalance,
    NotFound,
    Conflict,
    SyncFailed,
    Internal,
}

/// An HTTP-mapped error: status plus the `{code, message}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::Validation, message)
    }

    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ErrorCode::NotFound,
            format!("{entity} {id} not found"),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal, message)
    }

    /// Downgrades a missing-reference 404 to 400 for posting paths.
    pub fn posting(mut self) -> Self {
        if self.status == StatusCode::NOT_FOUND {
            self.status = StatusCode::BAD_REQUEST;
        }
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: ErrorCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "Request failed");
        }
        let body = ErrorBody {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, err.to_string())
            }
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                Self::new(StatusCode::CONFLICT, ErrorCode::Conflict, err.to_string())
            }
            DbError::Core(CoreError::Imbalance { .. }) => {
                Self::new(StatusCode::BAD_REQUEST, ErrorCode::Imbalance, err.to_string())
            }
            DbError::Core(_) => Self::validation(err.to_string()),
            _ => {
                tracing::error!(error = %err, "Database error");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::RemoteUrlMissing => Self::validation(err.to_string()),
            SyncError::Db(db_err) => db_err.into(),
            _ if err.is_transport() => {
                Self::new(StatusCode::BAD_GATEWAY, ErrorCode::SyncFailed, err.to_string())
            }
            _ => Self::internal(err.to_string()),
        }
    }
}

/// `Json` extractor whose rejection is our 400 VALIDATION body instead of
/// axum's plain-text default. Request DTOs do the schema checking through
/// their serde derives; this keeps the failure shape uniform.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::validation(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err: ApiError = DbError::not_found("Product", "p1").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn posting_downgrades_missing_reference_to_400() {
        let err: ApiError = ApiError::from(DbError::not_found("Product", "p1")).posting();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn unique_violation_maps_to_409() {
        let err: ApiError = DbError::UniqueViolation {
            field: "sku".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[test]
    fn imbalance_keeps_its_own_code() {
        use tradepost_core::Money;

        let err: ApiError = DbError::Core(CoreError::Imbalance {
            debits: Money::from_cents(10_000),
            credits: Money::from_cents(9_000),
        })
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, ErrorCode::Imbalance);
    }

    #[test]
    fn missing_remote_url_is_a_client_error() {
        let err: ApiError = SyncError::RemoteUrlMissing.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn transport_failures_map_to_502() {
        let err: ApiError = SyncError::RemoteRejected { status: 500 }.into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.code, ErrorCode::SyncFailed);
    }

    #[test]
    fn error_body_shape() {
        let err = ApiError::validation("name is required");
        let body = serde_json::to_value(ErrorBody {
            code: err.code,
            message: err.message,
        })
        .unwrap();
        assert_eq!(body["code"], "VALIDATION");
        assert_eq!(body["message"], "name is required");
    }
}
