use axum::{
    Json,
    http::{StatusCode, header},
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};

mod auth;
mod favorites;
mod ingredients;
mod recipes;
mod server;
mod shopping_cart;
mod tags;
mod users;
mod views;

pub mod types {
    pub mod recipe {
        pub use api_types::recipe::{
            IngredientAmount, RecipeIngredientView, RecipeQuery, RecipeShort, RecipeView,
            RecipeWrite, RecipeWritten,
        };
    }

    pub mod tag {
        pub use api_types::tag::TagView;
    }

    pub mod ingredient {
        pub use api_types::ingredient::{IngredientSearch, IngredientView};
    }

    pub mod user {
        pub use api_types::user::{UserCreated, UserNew, UserView};
    }

    pub mod subscription {
        pub use api_types::subscription::{SubscriptionQuery, SubscriptionView};
    }

    pub use api_types::{Page, PageQuery};
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Missing or wrong credentials.
    Unauthorized,
    /// A failure the caller cannot fix, such as the export font being absent.
    Internal(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_)
        | EngineError::NotInRelation(_)
        | EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::Export(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Export(export_err) => {
            tracing::error!("shopping list export failed: {export_err}");
            export_err.to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Unauthorized => {
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Basic realm=\"foodgram\"")],
                    Json(Error {
                        error: "authentication required".to_string(),
                    }),
                )
                    .into_response();
            }
            ServerError::Internal(err) => {
                tracing::error!("{err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err)
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use engine::ExportError;

    use super::*;

    #[test]
    fn engine_forbidden_maps_to_403() {
        let res = ServerError::from(EngineError::Forbidden("forbidden".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicates_and_absent_relations_map_to_400() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let res = ServerError::from(EngineError::NotInRelation("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_validation_maps_to_400() {
        let res = ServerError::from(EngineError::InvalidInput("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn export_failure_maps_to_500() {
        let err = EngineError::Export(ExportError::FontNotFound(PathBuf::from("fonts/x.ttf")));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_asks_for_basic_auth() {
        let res = ServerError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"foodgram\""
        );
    }

    #[test]
    fn internal_maps_to_500() {
        let res = ServerError::Internal("font missing".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
