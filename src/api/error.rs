//--------------------------------------------------------------------------------------------------
// ENUMS
//--------------------------------------------------------------------------------------------------
// | Name     | Description                     | Key Methods |
// |----------|---------------------------------|-------------|
// | ApiError | Error types for the HTTP layer  | from        |
//--------------------------------------------------------------------------------------------------

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use thiserror::Error;

use crate::exchange::ExchangeError;
use crate::matching_engine::EngineError;

pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP-layer error. User-facing error kinds map to 400; anything the core itself did not
/// expect to surface maps to 500.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    msg: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { msg })).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::UnknownMarket(_) => Self::BadRequest(err.to_string()),
            ExchangeError::Engine(e) => e.into(),
        }
    }
}
