use crate::{
    dtos::edition::{EditionBody, EditionEnvelope, EditionResponse, ErrorResponse, MessageResponse},
    error::ApiError,
    extract::{EditionId, EditionJson},
    state::AppState,
};
use axum::{Json, extract::State};
use database::services::EditionService;

/// List every edition, ordered by id
#[utoipa::path(
    get,
    path = "/editions",
    responses(
        (status = 200, description = "List of editions", body = [EditionResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Editions"
)]
pub async fn list_editions(
    State(state): State<AppState>,
) -> Result<Json<Vec<EditionResponse>>, ApiError> {
    let editions = EditionService::new(&state.db).list().await?;
    Ok(Json(editions.into_iter().map(Into::into).collect()))
}

/// Get a single edition by ID
#[utoipa::path(
    get,
    path = "/editions/{id}",
    params(
        ("id" = i32, Path, description = "Edition ID")
    ),
    responses(
        (status = 200, description = "Edition found", body = EditionResponse),
        (status = 404, description = "Edition not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Editions"
)]
pub async fn get_edition(
    State(state): State<AppState>,
    EditionId(id): EditionId,
) -> Result<Json<EditionResponse>, ApiError> {
    let edition = EditionService::new(&state.db).get(id).await?;
    Ok(Json(edition.into()))
}

/// Create an edition and enroll its students
#[utoipa::path(
    post,
    path = "/editions",
    request_body = EditionBody,
    responses(
        (status = 200, description = "Edition created", body = EditionEnvelope),
        (status = 422, description = "Invalid or conflicting edition", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Editions"
)]
pub async fn create_edition(
    State(state): State<AppState>,
    EditionJson(request): EditionJson,
) -> Result<Json<EditionEnvelope>, ApiError> {
    let edition = EditionService::new(&state.db).create(&request).await?;
    Ok(Json(EditionEnvelope {
        message: "Edición creada con éxito".to_string(),
        edition: edition.into(),
    }))
}

/// Replace an edition's fields and roster
#[utoipa::path(
    put,
    path = "/editions/{id}",
    params(
        ("id" = i32, Path, description = "Edition ID")
    ),
    request_body = EditionBody,
    responses(
        (status = 200, description = "Edition updated", body = EditionEnvelope),
        (status = 404, description = "Edition not found", body = ErrorResponse),
        (status = 422, description = "Invalid or conflicting edition", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Editions"
)]
pub async fn update_edition(
    State(state): State<AppState>,
    EditionId(id): EditionId,
    EditionJson(request): EditionJson,
) -> Result<Json<EditionEnvelope>, ApiError> {
    let edition = EditionService::new(&state.db).update(id, &request).await?;
    Ok(Json(EditionEnvelope {
        message: "Actualizado con éxito".to_string(),
        edition: edition.into(),
    }))
}

/// Delete an edition together with its roster
#[utoipa::path(
    delete,
    path = "/editions/{id}",
    params(
        ("id" = i32, Path, description = "Edition ID")
    ),
    responses(
        (status = 200, description = "Edition deleted", body = MessageResponse),
        (status = 404, description = "Edition not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Editions"
)]
pub async fn delete_edition(
    State(state): State<AppState>,
    EditionId(id): EditionId,
) -> Result<Json<MessageResponse>, ApiError> {
    EditionService::new(&state.db).delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Eliminado con éxito".to_string(),
    }))
}
