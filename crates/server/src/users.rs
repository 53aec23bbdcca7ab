//! User endpoints: registration, profiles and subscriptions.

use api_types::{
    Page, PageQuery,
    subscription::{SubscriptionQuery, SubscriptionView},
    user::{UserCreated, UserNew, UserView},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{Account, NewUser};

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

pub async fn list(
    viewer: Option<Extension<Account>>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<UserView>>, ServerError> {
    let page = engine::Page::new(query.page, query.limit);
    let users = state
        .engine
        .list_users(viewer.map(|Extension(account)| account.id), page)
        .await?;
    Ok(Json(views::page(users, views::user_view)))
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserCreated>), ServerError> {
    let user = state
        .engine
        .register_user(NewUser {
            username: payload.username,
            email: payload.email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            password: payload.password,
            is_staff: false,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreated {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }),
    ))
}

pub async fn get(
    viewer: Option<Extension<Account>>,
    State(state): State<ServerState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserView>, ServerError> {
    let user = state
        .engine
        .user_profile(viewer.map(|Extension(account)| account.id), user_id)
        .await?;
    Ok(Json(views::user_view(user)))
}

pub async fn me(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
) -> Result<Json<UserView>, ServerError> {
    let user = state
        .engine
        .user_profile(Some(account.id), account.id)
        .await?;
    Ok(Json(views::user_view(user)))
}

/// Authors the caller follows, each with up to `recipes_limit` recipes.
pub async fn subscriptions(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<Json<Page<SubscriptionView>>, ServerError> {
    let page = engine::Page::new(query.page, query.limit);
    let subscriptions = state
        .engine
        .list_subscriptions(account.id, page, query.recipes_limit)
        .await?;
    Ok(Json(views::page(subscriptions, views::subscription_view)))
}

pub async fn subscribe(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
    Path(author_id): Path<i32>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<(StatusCode, Json<SubscriptionView>), ServerError> {
    let subscription = state
        .engine
        .subscribe(account.id, author_id, query.recipes_limit)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(views::subscription_view(subscription)),
    ))
}

pub async fn unsubscribe(
    AuthUser(account): AuthUser,
    State(state): State<ServerState>,
    Path(author_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.unsubscribe(account.id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
