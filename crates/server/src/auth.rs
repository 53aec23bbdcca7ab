//! Basic-auth middleware and the extractor for endpoints that need a user.
//!
//! The middleware only authenticates. A request without an `Authorization`
//! header passes through anonymously; handlers that need a user take
//! [`AuthUser`], handlers that merely personalize take
//! `Option<Extension<Account>>`.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use engine::Account;

use crate::{ServerError, server::ServerState};

pub(crate) async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if let Some(TypedHeader(credentials)) = auth_header {
        if credentials.username().is_empty() || credentials.password().is_empty() {
            return Err(ServerError::Unauthorized);
        }
        let account = state
            .engine
            .authenticate(credentials.username(), credentials.password())
            .await?
            .ok_or(ServerError::Unauthorized)?;
        request.extensions_mut().insert(account);
    }

    Ok(next.run(request).await)
}

/// The authenticated caller. Rejects anonymous requests with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Account);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Account>()
            .cloned()
            .map(AuthUser)
            .ok_or(ServerError::Unauthorized)
    }
}
