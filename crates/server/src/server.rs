use axum::{
    Router, middleware,
    routing::{get, post},
};
use engine::{Engine, ExportError, FontResource};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::{auth, favorites, ingredients, recipes, shopping_cart, tags, users};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Export font loaded at startup. A failed load is kept so every
    /// download can report it.
    pub font: Arc<Result<FontResource, ExportError>>,
}

impl ServerState {
    pub fn new(engine: Engine, font: Result<FontResource, ExportError>) -> Self {
        Self {
            engine: Arc::new(engine),
            font: Arc::new(font),
        }
    }
}

/// All endpoints, mounted under `/api`.
pub fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/recipes/", get(recipes::list).post(recipes::create))
        .route(
            "/recipes/download_shopping_cart/",
            get(shopping_cart::download),
        )
        .route(
            "/recipes/{id}/",
            get(recipes::get)
                .patch(recipes::update)
                .delete(recipes::delete),
        )
        .route(
            "/recipes/{id}/favorite/",
            post(favorites::add).delete(favorites::remove),
        )
        .route(
            "/recipes/{id}/shopping_cart/",
            post(shopping_cart::add).delete(shopping_cart::remove),
        )
        .route("/tags/", get(tags::list))
        .route("/tags/{id}/", get(tags::get))
        .route("/ingredients/", get(ingredients::list))
        .route("/ingredients/{id}/", get(ingredients::get))
        .route("/users/", get(users::list).post(users::register))
        .route("/users/me/", get(users::me))
        .route("/users/subscriptions/", get(users::subscriptions))
        .route("/users/{id}/", get(users::get))
        .route(
            "/users/{id}/subscribe/",
            get(users::subscribe)
                .post(users::subscribe)
                .delete(users::unsubscribe),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::auth));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
