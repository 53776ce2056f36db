// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{Extension, extract::FromRequestParts, http::request::Parts};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};

use super::error::{HttpError, HttpResult, IntoHttpResult};

/// Any caller with a valid bearer token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

/// A caller whose token carries the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

async fn bearer_token<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
) -> HttpResult<(HttpState, String)> {
    let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
        .await
        .map_err(|_| {
            HttpError::from_error(ApplicationError::infrastructure(
                "application state missing",
            ))
        })?;

    let header = parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| {
            HttpError::from_error(ApplicationError::unauthorized(
                "missing Authorization header",
            ))
        })?;

    Ok((app_state, header.token().to_string()))
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (app_state, token) = bearer_token(parts, state).await?;
        let user = app_state.services.authenticate(&token).await.into_http()?;
        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (app_state, token) = bearer_token(parts, state).await?;
        let user = app_state
            .services
            .authenticate_admin(&token)
            .await
            .into_http()?;
        Ok(Self(user))
    }
}
