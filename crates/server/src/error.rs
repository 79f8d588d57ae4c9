use crate::dtos::edition::ErrorResponse;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::EditionError;
use log::{error, warn};

const INTERNAL_ERROR: &str = "Error interno del servidor";
const INVALID_BODY: &str = "El cuerpo de la solicitud debe ser un objeto JSON válido";
const INVALID_ID: &str = "La edición solicitada no existe";

/// Anything a handler can answer with instead of its success body
#[derive(Debug)]
pub enum ApiError {
    Edition(EditionError),
    /// Body missing, unreadable or not a JSON object
    InvalidBody(String),
    /// Path segment that cannot name an edition
    InvalidId(String),
}

impl From<EditionError> for ApiError {
    fn from(err: EditionError) -> Self {
        Self::Edition(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidId(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            Self::Edition(err) => match err {
                EditionError::Validation(_) | EditionError::Duplicate(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
                }
                EditionError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                EditionError::Database(err) => {
                    error!("Storage failure: {err}");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
                }
            },
            Self::InvalidBody(detail) => {
                warn!("Rejected request body: {detail}");
                (StatusCode::UNPROCESSABLE_ENTITY, INVALID_BODY.to_string())
            }
            Self::InvalidId(detail) => {
                warn!("Rejected edition id: {detail}");
                (StatusCode::NOT_FOUND, INVALID_ID.to_string())
            }
        };

        (status, Json(ErrorResponse { errors })).into_response()
    }
}
