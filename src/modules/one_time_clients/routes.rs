use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

use crate::modules::one_time_clients::domain::{
    NewOneTimeClient, OneTimeClient, OneTimeClientUpdate,
};
use crate::server::AppState;
use crate::shared::domain::Attribution;
use crate::shared::errors::AppResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeClientResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_by: String,
    pub created_by_name: String,
    pub created_date: String,
}

impl From<OneTimeClient> for OneTimeClientResponse {
    fn from(client: OneTimeClient) -> Self {
        Self {
            id: client.id,
            created_date: client.created_at.format("%Y-%m-%d").to_string(),
            first_name: client.first_name,
            last_name: client.last_name,
            phone: client.phone,
            email: client.email,
            address: client.address,
            created_by: client.created_by.username,
            created_by_name: client.created_by.display_name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateOneTimeClientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_by: Option<String>,
    pub created_by_name: Option<String>,
}

/// `email`/`address`: absent keeps, `null` clears.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOneTimeClientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub address: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

async fn list_clients(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OneTimeClientResponse>>> {
    let clients = state.one_time_clients.get_all_clients().await?;
    Ok(Json(
        clients.into_iter().map(OneTimeClientResponse::from).collect(),
    ))
}

async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<OneTimeClientResponse>> {
    Ok(Json(state.one_time_clients.get_client(id).await?.into()))
}

async fn create_client(
    State(state): State<AppState>,
    Json(body): Json<CreateOneTimeClientRequest>,
) -> AppResult<impl IntoResponse> {
    let client = NewOneTimeClient::new(
        body.first_name.as_deref(),
        body.last_name.as_deref(),
        body.phone.as_deref(),
        body.email.as_deref(),
        body.address.as_deref(),
        Attribution::from_request(body.created_by.as_deref(), body.created_by_name.as_deref())?,
    )?;

    let created = state.one_time_clients.create_client(client).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "One-time client created",
            "client": OneTimeClientResponse::from(created),
        })),
    ))
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateOneTimeClientRequest>,
) -> AppResult<impl IntoResponse> {
    let update = OneTimeClientUpdate {
        first_name: body.first_name,
        last_name: body.last_name,
        phone: body.phone,
        email: body.email,
        address: body.address,
    };

    let client = state.one_time_clients.update_client(id, update).await?;
    Ok(Json(json!({
        "message": "One-time client updated",
        "client": OneTimeClientResponse::from(client),
    })))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    state.one_time_clients.delete_client(id).await?;
    Ok(Json(json!({ "message": "One-time client deleted" })))
}
