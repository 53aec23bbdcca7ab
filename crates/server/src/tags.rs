use api_types::tag::TagView;
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState, views};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TagView>>, ServerError> {
    let tags = state.engine.list_tags().await?;
    Ok(Json(tags.into_iter().map(views::tag_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(tag_id): Path<i32>,
) -> Result<Json<TagView>, ServerError> {
    let tag = state.engine.tag(tag_id).await?;
    Ok(Json(views::tag_view(tag)))
}
