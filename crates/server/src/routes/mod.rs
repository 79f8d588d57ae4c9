pub mod edition;
pub mod health;
pub mod root;

use crate::{doc::ApiDoc, state::AppState};
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// All routes of the API, documentation included
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route(
            "/editions",
            get(edition::list_editions).post(edition::create_edition),
        )
        .route(
            "/editions/{id}",
            get(edition::get_edition)
                .put(edition::update_edition)
                .patch(edition::update_edition)
                .delete(edition::delete_edition),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
