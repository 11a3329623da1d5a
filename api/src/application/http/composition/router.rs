use axum::{Router, middleware, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    analyze_composition::{__path_analyze_composition, analyze_composition},
    normalize_composition::{__path_normalize_composition, normalize_composition},
};
use crate::application::{http::server::app_state::AppState, user_middleware::user_middleware};

#[derive(OpenApi)]
#[openapi(paths(analyze_composition, normalize_composition))]
pub struct CompositionApiDoc;

pub fn composition_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{root_path}/compositions/analyze"),
            post(analyze_composition),
        )
        .route_layer(middleware::from_fn(user_middleware))
        .route(
            &format!("{root_path}/compositions/normalize"),
            post(normalize_composition),
        )
}
