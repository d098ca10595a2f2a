//! Bearer-token authentication.

use std::collections::HashMap;

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use database::Account;

use crate::error::WebError;
use crate::state::AppState;

/// The account resolved from the request's API token.
///
/// The token is read from `Authorization: Bearer <token>`, falling back to a
/// `token` query parameter so the HTML dashboard can be opened in a browser.
pub struct AuthAccount(pub Account);

fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    header.or_else(|| {
        Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(mut params)| params.remove("token"))
    })
    .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(WebError::NotAuthenticated)?;

        let account = database::account::get_account_by_token(state.db.pool(), &token)
            .await?
            .ok_or(WebError::NotAuthenticated)?;

        Ok(AuthAccount(account))
    }
}
