use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::modules::employees::domain::Role;
use crate::modules::service_requests::application::ServiceRequestDetails;
use crate::modules::service_requests::domain::{
    ClientReference, NewServiceRequest, ServicePriority, ServiceRequestUpdate, ServiceStatus,
    StatusSummary, VehicleDetails,
};
use crate::server::AppState;
use crate::shared::domain::Attribution;
use crate::shared::errors::{AppError, AppResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestResponse {
    pub id: i32,
    pub client_id: Option<i32>,
    pub one_time_client_id: Option<i32>,
    pub client_name: String,
    pub vehicle_year: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_plate: String,
    pub vehicle_color: String,
    pub vehicle_location: String,
    pub is_dangerous: bool,
    pub has_heavy_traffic: bool,
    pub job_type: String,
    pub description: String,
    pub priority: ServicePriority,
    pub status: ServiceStatus,
    pub assigned_to: Option<String>,
    pub assigned_to_name: Option<String>,
    pub requested_date: String,
    pub completion_date: Option<String>,
    pub cost: f64,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_by_name: String,
    pub created_date: String,
    pub last_edited_by: Option<String>,
    pub last_edited_by_name: Option<String>,
    pub last_updated_date: String,
}

impl From<ServiceRequestDetails> for ServiceRequestResponse {
    fn from(details: ServiceRequestDetails) -> Self {
        let r = details.request;
        let (last_edited_by, last_edited_by_name) = match r.last_edited_by {
            Some(editor) => (Some(editor.username), Some(editor.display_name)),
            None => (None, None),
        };

        Self {
            id: r.id,
            client_id: r.client.client_id(),
            one_time_client_id: r.client.one_time_client_id(),
            client_name: details.client_name,
            vehicle_year: r.vehicle.year,
            vehicle_make: r.vehicle.make,
            vehicle_model: r.vehicle.model,
            vehicle_plate: r.vehicle.plate,
            vehicle_color: r.vehicle.color,
            vehicle_location: r.vehicle.location,
            is_dangerous: r.is_dangerous,
            has_heavy_traffic: r.has_heavy_traffic,
            job_type: r.job_type,
            description: r.description,
            priority: r.priority,
            status: r.status,
            assigned_to: r.assigned_to,
            assigned_to_name: r.assigned_to_name,
            requested_date: r.requested_date.format(DATE_TIME_FORMAT).to_string(),
            completion_date: r
                .completion_date
                .map(|d| d.format(DATE_TIME_FORMAT).to_string()),
            cost: r.cost,
            notes: r.notes,
            created_by: r.created_by.username,
            created_by_name: r.created_by.display_name,
            created_date: r.created_at.format(DATE_FORMAT).to_string(),
            last_edited_by,
            last_edited_by_name,
            last_updated_date: r.last_updated_at.format(DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummaryResponse {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl From<StatusSummary> for StatusSummaryResponse {
    fn from(s: StatusSummary) -> Self {
        Self {
            total: s.total,
            pending: s.pending,
            in_progress: s.in_progress,
            completed: s.completed,
            cancelled: s.cancelled,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateServiceRequestBody {
    pub client_id: Option<i32>,
    pub one_time_client_id: Option<i32>,
    pub vehicle_year: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_location: Option<String>,
    pub is_dangerous: Option<bool>,
    pub has_heavy_traffic: Option<bool>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub priority: Option<ServicePriority>,
    pub status: Option<ServiceStatus>,
    pub assigned_to: Option<String>,
    pub assigned_to_name: Option<String>,
    pub requested_date: Option<String>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_by_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateServiceRequestBody {
    pub vehicle_year: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_location: Option<String>,
    pub is_dangerous: Option<bool>,
    pub has_heavy_traffic: Option<bool>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub priority: Option<ServicePriority>,
    pub status: Option<ServiceStatus>,
    pub assigned_to: Option<String>,
    pub assigned_to_name: Option<String>,
    pub completion_date: Option<String>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub user_role: Option<String>,
    pub last_edited_by: Option<String>,
    pub last_edited_by_name: Option<String>,
}

/// Accepts RFC 3339 or a naive ISO timestamp, which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::InvalidArgument(format!("Invalid timestamp '{}'", raw)))
}

fn parse_optional_timestamp(raw: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value).map(Some),
    }
}

impl CreateServiceRequestBody {
    fn into_new_request(self) -> AppResult<NewServiceRequest> {
        let client = ClientReference::from_ids(self.client_id, self.one_time_client_id)?;
        let requested_date =
            parse_optional_timestamp(self.requested_date.as_deref())?.unwrap_or_else(Utc::now);

        Ok(NewServiceRequest {
            client,
            vehicle: VehicleDetails {
                year: self.vehicle_year.unwrap_or_default(),
                make: self.vehicle_make.unwrap_or_default(),
                model: self.vehicle_model.unwrap_or_default(),
                plate: self.vehicle_plate.unwrap_or_default(),
                color: self.vehicle_color.unwrap_or_default(),
                location: self.vehicle_location.unwrap_or_default(),
            },
            is_dangerous: self.is_dangerous.unwrap_or(false),
            has_heavy_traffic: self.has_heavy_traffic.unwrap_or(false),
            job_type: self.job_type.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            assigned_to: self.assigned_to,
            assigned_to_name: self.assigned_to_name,
            requested_date,
            completion_date: None,
            cost: self.cost.unwrap_or(0.0),
            notes: self.notes,
            created_by: Attribution::from_request(
                self.created_by.as_deref(),
                self.created_by_name.as_deref(),
            )?,
        })
    }
}

impl UpdateServiceRequestBody {
    fn into_parts(self) -> AppResult<(ServiceRequestUpdate, Attribution, Option<Role>)> {
        let role = self
            .user_role
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(str::parse::<Role>)
            .transpose()?;
        let editor = Attribution::from_request(
            self.last_edited_by.as_deref(),
            self.last_edited_by_name.as_deref(),
        )?;

        let update = ServiceRequestUpdate {
            vehicle_year: self.vehicle_year,
            vehicle_make: self.vehicle_make,
            vehicle_model: self.vehicle_model,
            vehicle_plate: self.vehicle_plate,
            vehicle_color: self.vehicle_color,
            vehicle_location: self.vehicle_location,
            is_dangerous: self.is_dangerous,
            has_heavy_traffic: self.has_heavy_traffic,
            job_type: self.job_type,
            description: self.description,
            priority: self.priority,
            status: self.status,
            assigned_to: self.assigned_to,
            assigned_to_name: self.assigned_to_name,
            completion_date: parse_optional_timestamp(self.completion_date.as_deref())?,
            cost: self.cost,
            notes: self.notes,
        };

        Ok((update, editor, role))
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests).post(create_request))
        .route("/stats/summary", get(status_summary))
        .route("/client/:client_id", get(list_for_client))
        .route(
            "/:id",
            get(get_request).put(update_request).delete(delete_request),
        )
}

async fn list_requests(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ServiceRequestResponse>>> {
    let requests = state.service_requests.list_requests().await?;
    Ok(Json(
        requests.into_iter().map(ServiceRequestResponse::from).collect(),
    ))
}

async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ServiceRequestResponse>> {
    Ok(Json(state.service_requests.get_request(id).await?.into()))
}

async fn list_for_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> AppResult<Json<Vec<ServiceRequestResponse>>> {
    let requests = state.service_requests.list_for_client(client_id).await?;
    Ok(Json(
        requests.into_iter().map(ServiceRequestResponse::from).collect(),
    ))
}

async fn status_summary(
    State(state): State<AppState>,
) -> AppResult<Json<StatusSummaryResponse>> {
    Ok(Json(state.service_requests.summary().await?.into()))
}

async fn create_request(
    State(state): State<AppState>,
    Json(body): Json<CreateServiceRequestBody>,
) -> AppResult<impl IntoResponse> {
    let created = state
        .service_requests
        .create_request(body.into_new_request()?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Service request created",
            "service_request": ServiceRequestResponse::from(created),
        })),
    ))
}

async fn update_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateServiceRequestBody>,
) -> AppResult<impl IntoResponse> {
    let (update, editor, role) = body.into_parts()?;
    let updated = state
        .service_requests
        .update_request(id, update, editor, role)
        .await?;
    Ok(Json(json!({
        "message": "Service request updated",
        "service_request": ServiceRequestResponse::from(updated),
    })))
}

async fn delete_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    state.service_requests.delete_request(id).await?;
    Ok(Json(json!({ "message": "Service request deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn timestamps_accept_rfc3339_and_naive_iso() {
        let zoned = parse_timestamp("2025-03-04T10:30:00-05:00").unwrap();
        assert_eq!(zoned.hour(), 15);

        let naive = parse_timestamp("2025-03-04T10:30").unwrap();
        assert_eq!((naive.day(), naive.hour(), naive.minute()), (4, 10, 30));

        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn create_body_needs_exactly_one_client() {
        let body = CreateServiceRequestBody {
            job_type: Some("Tow".to_string()),
            description: Some("Stuck".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            body.into_new_request(),
            Err(AppError::ValidationError(_))
        ));

        let body: CreateServiceRequestBody = serde_json::from_str(
            r#"{"one_time_client_id": 3, "job_type": "Tow", "description": "Stuck",
                "priority": "Emergency", "status": "In Progress"}"#,
        )
        .unwrap();
        let request = body.into_new_request().unwrap();
        assert_eq!(request.client, ClientReference::OneTime(3));
        assert_eq!(request.priority, ServicePriority::Emergency);
        assert_eq!(request.status, ServiceStatus::InProgress);
        assert_eq!(request.created_by.username, "system");
    }

    #[test]
    fn update_body_parses_role() {
        let body: UpdateServiceRequestBody =
            serde_json::from_str(r#"{"is_dangerous": true, "user_role": "admin"}"#).unwrap();
        let (update, _, role) = body.into_parts().unwrap();
        assert_eq!(update.is_dangerous, Some(true));
        assert_eq!(role, Some(Role::Admin));
    }
}
