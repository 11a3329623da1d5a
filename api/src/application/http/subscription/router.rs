use axum::{Router, middleware, routing::put};
use utoipa::OpenApi;

use super::handlers::{
    grant_subscription::{__path_grant_subscription, grant_subscription},
    revoke_subscription::{__path_revoke_subscription, revoke_subscription},
};
use crate::application::{auth::admin_auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(grant_subscription, revoke_subscription))]
pub struct SubscriptionApiDoc;

pub fn subscription_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/subscriptions/{{user_id}}", state.args.server.root_path),
            put(grant_subscription).delete(revoke_subscription),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth))
}
