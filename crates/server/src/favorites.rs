use api_types::recipe::RecipeShort;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

pub async fn add(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShort>), ServerError> {
    let recipe = state.engine.add_favorite(account.id, recipe_id).await?;
    Ok((StatusCode::CREATED, Json(views::recipe_short(recipe))))
}

pub async fn remove(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.remove_favorite(account.id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
