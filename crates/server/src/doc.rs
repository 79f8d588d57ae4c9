use crate::routes::{edition, health, root};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        edition::list_editions,
        edition::get_edition,
        edition::create_edition,
        edition::update_edition,
        edition::delete_edition
    ),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Editions", description = "Course edition administration"),
    ),
    info(
        title = "Editions API",
        version = "1.0.0",
        description = "Administration of training course editions and their rosters",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
