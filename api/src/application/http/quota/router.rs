use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::get_quota::{__path_get_quota, get_quota};
use crate::application::{http::server::app_state::AppState, user_middleware::user_middleware};

#[derive(OpenApi)]
#[openapi(paths(get_quota))]
pub struct QuotaApiDoc;

pub fn quota_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/quota", state.args.server.root_path),
            get(get_quota),
        )
        .route_layer(middleware::from_fn(user_middleware))
}
