use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::application::http::{
    composition::router::CompositionApiDoc, health::router::HealthApiDoc,
    ingredient::router::IngredientApiDoc, quota::router::QuotaApiDoc,
    subscription::router::SubscriptionApiDoc,
};

struct AdminSecurity;

impl Modify for AdminSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inciscope API"
    ),
    modifiers(&AdminSecurity),
    nest(
        (path = "/compositions", api = CompositionApiDoc),
        (path = "/ingredients", api = IngredientApiDoc),
        (path = "/quota", api = QuotaApiDoc),
        (path = "/subscriptions", api = SubscriptionApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
