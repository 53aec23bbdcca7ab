//! Shopping cart toggles and the PDF download.

use api_types::recipe::RecipeShort;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use engine::{EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

pub async fn add(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShort>), ServerError> {
    let recipe = state
        .engine
        .add_to_shopping_list(account.id, recipe_id)
        .await?;
    Ok((StatusCode::CREATED, Json(views::recipe_short(recipe))))
}

pub async fn remove(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .remove_from_shopping_list(account.id, recipe_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The caller's aggregated shopping list as a PDF attachment.
pub async fn download(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let font = match &*state.font {
        Ok(font) => font,
        Err(err) => return Err(ServerError::Internal(err.to_string())),
    };
    let bytes = state.engine.export_shopping_list(account.id, font).await?;

    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    ))
}
