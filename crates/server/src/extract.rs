use crate::error::ApiError;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use models::EditionRequest;
use serde_json::Value;

/// An edition body; anything but a JSON object is rejected through [`ApiError`]
pub struct EditionJson(pub EditionRequest);

impl<S> FromRequest<S> for EditionJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;

        // Arrays would otherwise bind to the fields by position
        if !value.is_object() {
            return Err(ApiError::InvalidBody(format!("expected an object, got {value}")));
        }

        serde_json::from_value(value)
            .map(Self)
            .map_err(|err| ApiError::InvalidBody(err.to_string()))
    }
}

/// The `{id}` segment of an edition route
pub struct EditionId(pub i32);

impl<S> FromRequestParts<S> for EditionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}
