pub use crate::common::RouteResult;

use std::sync::Arc;

use axum::{extract::FromRef, Router};
use observations::{database::Database, export::ExportFolders};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::WebConfig, middleware::authorization::ApiTokens};

pub mod api;
pub mod common;
pub mod config;
pub mod middleware;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub database: Arc<dyn Database>,
    pub tokens: Arc<ApiTokens>,
    pub exports: Arc<ExportFolders>,
}

impl WebState {
    pub fn new(database: Arc<dyn Database>, config: &WebConfig) -> Self {
        Self {
            database,
            tokens: Arc::new(config.tokens.clone()),
            exports: Arc::new(ExportFolders::new(&config.export_root)),
        }
    }
}

/// The complete application: routes, authorization, CORS and request tracing.
pub fn app(state: WebState) -> Router {
    api::routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn start_web_server(state: WebState, config: &WebConfig) -> std::io::Result<()> {
    if state.tokens.is_empty() {
        log::warn!("no API tokens configured, every guarded route will reject requests");
    }

    let listener = TcpListener::bind(config.address).await?;
    log::info!("listening on {}", config.address);
    axum::serve(listener, app(state).into_make_service()).await?;

    Ok(())
}
