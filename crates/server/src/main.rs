mod config;
mod doc;
mod dtos;
mod error;
mod extract;
mod routes;
mod state;
mod utils;

use crate::{config::Config, state::AppState, utils::shutdown::shutdown_signal};
use database::db::create_connection;
use log::info;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let db = create_connection(&config.database_url).await?;
    let app = routes::router(AppState { db });

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Running axum on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
