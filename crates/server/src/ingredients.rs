use api_types::ingredient::{IngredientSearch, IngredientView};
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{ServerError, server::ServerState, views};

/// Whole catalogue, or the ingredients whose name starts with `?name=`.
pub async fn list(
    State(state): State<ServerState>,
    Query(search): Query<IngredientSearch>,
) -> Result<Json<Vec<IngredientView>>, ServerError> {
    let ingredients = state
        .engine
        .list_ingredients(search.name.as_deref())
        .await?;
    Ok(Json(
        ingredients.into_iter().map(views::ingredient_view).collect(),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(ingredient_id): Path<i32>,
) -> Result<Json<IngredientView>, ServerError> {
    let ingredient = state.engine.ingredient(ingredient_id).await?;
    Ok(Json(views::ingredient_view(ingredient)))
}
