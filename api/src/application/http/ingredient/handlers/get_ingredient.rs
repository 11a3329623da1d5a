use axum::extract::{Path, State};
use inciscope_core::domain::{
    common::entities::app_errors::CoreError,
    ingredient::{entities::IngredientEntry, ports::IngredientService},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GetIngredientResponse {
    pub data: IngredientEntry,
}

#[utoipa::path(
    get,
    path = "/{name}",
    tag = "ingredient",
    summary = "Get an ingredient",
    description = "Looks up a knowledge base record by label spelling or canonical key.",
    responses(
        (status = 200, body = GetIngredientResponse),
        (status = 404, body = ErrorResponse)
    ),
    params(
        ("name" = String, Path, description = "Ingredient name, e.g. `Sodium Laureth Sulfate`"),
    )
)]
pub async fn get_ingredient(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<GetIngredientResponse>, ApiError> {
    let entry = state.service.get_ingredient(&name).map_err(|e| match e {
        CoreError::NotFound => ApiError::NotFound(format!("ingredient '{name}' not found")),
        other => ApiError::from(other),
    })?;

    Ok(Response::OK(GetIngredientResponse { data: entry }))
}
