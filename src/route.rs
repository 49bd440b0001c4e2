use std::sync::Arc;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{handler::*, middleware::mw_resolve_session, AppState};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Configure CORS so a separately served frontend can reach the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    Router::new()
        .route("/graphql", get(graphql_get).post(graphql_handler))
        .route_layer(from_fn_with_state(app_state.clone(), mw_resolve_session))
        .route("/", get(home))
        .nest_service("/static", ServeDir::new(&app_state.static_dir))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
