//! Recipe endpoints.

use api_types::{
    Page,
    recipe::{RecipeQuery, RecipeView, RecipeWrite, RecipeWritten},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::Query;
use engine::{Account, RecipeFilter, RecipeInput};

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

fn recipe_input(payload: RecipeWrite) -> RecipeInput {
    RecipeInput {
        name: payload.name,
        image: payload.image,
        text: payload.text,
        cooking_time: payload.cooking_time,
        ingredients: payload
            .ingredients
            .into_iter()
            .map(|line| (line.id, line.amount))
            .collect(),
        tags: payload.tags,
    }
}

pub async fn list(
    viewer: Option<Extension<Account>>,
    State(state): State<ServerState>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<Page<RecipeView>>, ServerError> {
    let filter = RecipeFilter {
        name: query.name,
        author: query.author,
        tags: query.tags,
        is_favorited: query.is_favorited == Some(1),
        is_in_shopping_cart: query.is_in_shopping_cart == Some(1),
    };
    let page = engine::Page::new(query.page, query.limit);

    let recipes = state
        .engine
        .list_recipes(viewer.map(|Extension(account)| account.id), &filter, page)
        .await?;
    Ok(Json(views::page(recipes, views::recipe_view)))
}

pub async fn get(
    viewer: Option<Extension<Account>>,
    State(state): State<ServerState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<RecipeView>, ServerError> {
    let recipe = state
        .engine
        .recipe(viewer.map(|Extension(account)| account.id), recipe_id)
        .await?;
    Ok(Json(views::recipe_view(recipe)))
}

pub async fn create(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
    Json(payload): Json<RecipeWrite>,
) -> Result<(StatusCode, Json<RecipeWritten>), ServerError> {
    let recipe = state
        .engine
        .create_recipe(account.id, recipe_input(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(views::recipe_written(recipe))))
}

pub async fn update(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
    Path(recipe_id): Path<i32>,
    Json(payload): Json<RecipeWrite>,
) -> Result<Json<RecipeWritten>, ServerError> {
    let recipe = state
        .engine
        .update_recipe(account.id, recipe_id, recipe_input(payload))
        .await?;
    Ok(Json(views::recipe_written(recipe)))
}

pub async fn delete(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_recipe(account.id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
