use axum::{routing::get, Router};

use crate::{
    common::route_not_found, middleware::authorization::authorization_middleware,
    WebState,
};

pub mod downloads;
pub mod locations;
pub mod categorical;
pub mod temperatures;

/// Every route except the liveness reply at `/` requires a bearer token.
pub fn routes(state: WebState) -> Router {
    let guarded = Router::new()
        .merge(locations::routes())
        .merge(temperatures::routes())
        .merge(categorical::routes())
        .merge(downloads::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            authorization_middleware,
        ));

    Router::new()
        .route("/", get(hello))
        .merge(guarded)
        .fallback(route_not_found)
        .with_state(state)
}

async fn hello() -> &'static str {
    "Hello World!"
}
