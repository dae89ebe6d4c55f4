use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::modules::clients::domain::{ClientProfile, ClientProfileDraft, ClientProfileUpdate};
use crate::server::AppState;
use crate::shared::domain::Attribution;
use crate::shared::errors::AppResult;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client profile as the dashboard reads it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: i32,
    pub client_id_number: String,
    #[serde(rename = "CustomerFirstName")]
    pub customer_first_name: String,
    #[serde(rename = "CustomerLastName")]
    pub customer_last_name: String,
    #[serde(rename = "CustomerPhone")]
    pub customer_phone: String,
    pub created_by: String,
    pub created_by_name: String,
    pub last_edited_by: String,
    pub last_edited_by_name: String,
    pub created_date: String,
    pub last_edited_date: String,
}

impl From<ClientProfile> for ClientResponse {
    fn from(profile: ClientProfile) -> Self {
        Self {
            id: profile.id,
            created_date: profile.created_at.format(DATE_FORMAT).to_string(),
            last_edited_date: profile.last_edited_at.format(DATE_FORMAT).to_string(),
            client_id_number: profile.client_id_number.into_string(),
            customer_first_name: profile.first_name,
            customer_last_name: profile.last_name,
            customer_phone: profile.phone,
            created_by: profile.created_by.username,
            created_by_name: profile.created_by.display_name,
            last_edited_by: profile.last_edited_by.username,
            last_edited_by_name: profile.last_edited_by.display_name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateClientRequest {
    pub customer_first_name: Option<String>,
    pub customer_last_name: Option<String>,
    pub customer_phone: Option<String>,
    pub created_by: Option<String>,
    pub created_by_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateClientRequest {
    pub customer_first_name: Option<String>,
    pub customer_last_name: Option<String>,
    pub customer_phone: Option<String>,
    pub last_edited_by: Option<String>,
    pub last_edited_by_name: Option<String>,
}

/// Raw query parameters; `limit` stays a string so a non-numeric value is
/// reported in the usual error body.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/search", get(search_clients))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

async fn list_clients(State(state): State<AppState>) -> AppResult<Json<Vec<ClientResponse>>> {
    let clients = state.clients.get_all_clients().await?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

async fn search_clients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<ClientResponse>>> {
    let clients = state
        .clients
        .search_clients(params.q.as_deref(), params.limit.as_deref())
        .await?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ClientResponse>> {
    let client = state.clients.get_client(id).await?;
    Ok(Json(client.into()))
}

async fn create_client(
    State(state): State<AppState>,
    Json(body): Json<CreateClientRequest>,
) -> AppResult<impl IntoResponse> {
    let draft = ClientProfileDraft::new(
        body.customer_first_name.as_deref(),
        body.customer_last_name.as_deref(),
        body.customer_phone.as_deref(),
        Attribution::from_request(body.created_by.as_deref(), body.created_by_name.as_deref())?,
    )?;

    let client = state.clients.create_client(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Client created",
            "client": ClientResponse::from(client),
        })),
    ))
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateClientRequest>,
) -> AppResult<impl IntoResponse> {
    let editor = Attribution::from_request(
        body.last_edited_by.as_deref(),
        body.last_edited_by_name.as_deref(),
    )?;
    let update = ClientProfileUpdate {
        first_name: body.customer_first_name,
        last_name: body.customer_last_name,
        phone: body.customer_phone,
    };

    let client = state.clients.update_client(id, update, editor).await?;
    Ok(Json(json!({
        "message": "Client updated",
        "client": ClientResponse::from(client),
    })))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    state.clients.delete_client(id).await?;
    Ok(Json(json!({ "message": "Client deleted" })))
}
