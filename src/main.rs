#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::routing::get;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use tower_http::services::ServeDir;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::config::Config;
use crate::database::Database;
use crate::database::DatabaseConfig;

mod apartments;
mod api;
mod config;
mod database;
mod graceful_shutdown;
mod health;
mod redirect;
#[cfg(test)]
mod tests;

const DEFAULT_RUST_LOG: &str = "apt_eval=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let config = Config::from_env()?;

    let app = setup_app(
        DatabaseConfig::DataDir(config.data_dir.clone()),
        &config.static_dir,
    )
    .await?;

    serve(&config, app).await?;

    tracing::info!("Servers exited properly");

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` if the database can not be opened or its schema can not be initialized
pub async fn setup_app(database_config: DatabaseConfig, static_dir: &Path) -> Result<Router> {
    let database = Database::from_config(database_config)
        .await
        .context("Failed to initialize database")?;

    Ok(create_router(database, static_dir))
}

/// Create the router for Apt Eval
fn create_router(database: Database, static_dir: &Path) -> Router {
    Router::new()
        .nest("/api", router())
        .route("/health", get(health::health))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(database))
}

/// Run the listeners until a terminate signal is received
///
/// With TLS the app is served on the secured listener and the plain listener redirects to it,
/// without TLS the plain listener serves the app
async fn serve(config: &Config, app: Router) -> Result<()> {
    let secure_handle = Handle::new();
    let plain_handle = Handle::new();

    tokio::spawn(graceful_shutdown::shutdown(vec![
        secure_handle.clone(),
        plain_handle.clone(),
    ]));

    if !config.tls {
        let address = config.plain_address();
        tracing::warn!("TLS is disabled, listening on http://{address}");

        axum_server::bind(address)
            .handle(plain_handle)
            .serve(app.into_make_service())
            .await
            .with_context(|| format!("Failed to serve on {address}"))?;

        return Ok(());
    }

    let tls_config = RustlsConfig::from_pem_file(&config.cert_file, &config.key_file)
        .await
        .with_context(|| {
            format!(
                "Failed to load certificate {} and key {}",
                config.cert_file.display(),
                config.key_file.display()
            )
        })?;

    let secure_address = config.secure_address();
    let plain_address = config.plain_address();

    tracing::info!("Listening on https://{secure_address}");
    tracing::info!("Redirecting http://{plain_address} to port {}", config.port);

    let secure = async {
        axum_server::bind_rustls(secure_address, tls_config)
            .handle(secure_handle)
            .serve(app.into_make_service())
            .await
            .with_context(|| format!("Secure server on {secure_address} failed"))
    };

    let plain = async {
        axum_server::bind(plain_address)
            .handle(plain_handle)
            .serve(redirect::router(config.port).into_make_service())
            .await
            .with_context(|| format!("Redirect server on {plain_address} failed"))
    };

    tokio::try_join!(secure, plain)?;

    Ok(())
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}
