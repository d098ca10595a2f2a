//! Client routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{client, Client};
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthAccount;
use crate::error::Result;
use crate::state::AppState;

/// Request body for creating or updating a client.
#[derive(Deserialize)]
pub struct ClientRequest {
    pub name: String,
    pub hourly_rate: f64,
}

/// List the account's clients.
pub async fn list_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> Result<Json<Vec<Client>>> {
    let clients = client::list_clients(state.db.pool(), &account.id).await?;
    Ok(Json(clients))
}

/// Create a client.
pub async fn create_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Json(req): Json<ClientRequest>,
) -> Result<(StatusCode, Json<Client>)> {
    let created = client::create_client(state.db.pool(), &account.id, &req.name, req.hourly_rate).await?;
    info!(client = %created.id, "Created client");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a client's name and rate.
pub async fn update_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(id): Path<String>,
    Json(req): Json<ClientRequest>,
) -> Result<Json<Client>> {
    let updated =
        client::update_client(state.db.pool(), &account.id, &id, &req.name, req.hourly_rate).await?;
    Ok(Json(updated))
}

/// Delete a client and its reports.
pub async fn delete_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    client::delete_client(state.db.pool(), &account.id, &id).await?;
    info!(client = %id, "Deleted client");
    Ok(StatusCode::NO_CONTENT)
}
