use crate::modules::service_requests::domain::{
    ClientReference, NewServiceRequest, ServicePriority, ServiceRequest, ServiceStatus,
    VehicleDetails,
};
use crate::schema::service_requests;
use crate::shared::domain::Attribution;
use crate::shared::errors::AppResult;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

// ============= SERVICE REQUEST MODELS =============

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = service_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRequestRow {
    pub id: i32,
    pub client_id: Option<i32>,
    pub one_time_client_id: Option<i32>,
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
    pub requested_date: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
    pub cost: f64,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
    pub last_edited_by: Option<String>,
    pub last_edited_by_name: Option<String>,
    pub last_updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = service_requests)]
pub struct NewServiceRequestRow {
    pub client_id: Option<i32>,
    pub one_time_client_id: Option<i32>,
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
    pub requested_date: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
    pub cost: f64,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_by_name: String,
}

// The client reference is fixed at creation and not part of the changeset
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = service_requests)]
#[diesel(treat_none_as_null = true)]
pub struct ServiceRequestChangeset {
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
    pub completion_date: Option<DateTime<Utc>>,
    pub cost: f64,
    pub notes: Option<String>,
    pub last_edited_by: Option<String>,
    pub last_edited_by_name: Option<String>,
    pub last_updated_at: DateTime<Utc>,
}

impl ServiceRequestRow {
    /// Rows always satisfy the one-reference check constraint; anything
    /// else is reported as an error rather than guessed at.
    pub fn into_entity(self) -> AppResult<ServiceRequest> {
        let client = ClientReference::from_ids(self.client_id, self.one_time_client_id)?;
        let last_edited_by = self.last_edited_by.map(|username| {
            let display_name = self
                .last_edited_by_name
                .unwrap_or_else(|| username.clone());
            Attribution::new(username, display_name)
        });

        Ok(ServiceRequest {
            id: self.id,
            client,
            vehicle: VehicleDetails {
                year: self.vehicle_year,
                make: self.vehicle_make,
                model: self.vehicle_model,
                plate: self.vehicle_plate,
                color: self.vehicle_color,
                location: self.vehicle_location,
            },
            is_dangerous: self.is_dangerous,
            has_heavy_traffic: self.has_heavy_traffic,
            job_type: self.job_type,
            description: self.description,
            priority: self.priority,
            status: self.status,
            assigned_to: self.assigned_to,
            assigned_to_name: self.assigned_to_name,
            requested_date: self.requested_date,
            completion_date: self.completion_date,
            cost: self.cost,
            notes: self.notes,
            created_by: Attribution::new(self.created_by, self.created_by_name),
            created_at: self.created_at,
            last_edited_by,
            last_updated_at: self.last_updated_at,
        })
    }
}

impl From<NewServiceRequest> for NewServiceRequestRow {
    fn from(request: NewServiceRequest) -> Self {
        NewServiceRequestRow {
            client_id: request.client.client_id(),
            one_time_client_id: request.client.one_time_client_id(),
            vehicle_year: request.vehicle.year,
            vehicle_make: request.vehicle.make,
            vehicle_model: request.vehicle.model,
            vehicle_plate: request.vehicle.plate,
            vehicle_color: request.vehicle.color,
            vehicle_location: request.vehicle.location,
            is_dangerous: request.is_dangerous,
            has_heavy_traffic: request.has_heavy_traffic,
            job_type: request.job_type,
            description: request.description,
            priority: request.priority,
            status: request.status,
            assigned_to: request.assigned_to,
            assigned_to_name: request.assigned_to_name,
            requested_date: request.requested_date,
            completion_date: request.completion_date,
            cost: request.cost,
            notes: request.notes,
            created_by: request.created_by.username,
            created_by_name: request.created_by.display_name,
        }
    }
}

impl From<&ServiceRequest> for ServiceRequestChangeset {
    fn from(request: &ServiceRequest) -> Self {
        let (last_edited_by, last_edited_by_name) = match &request.last_edited_by {
            Some(editor) => (
                Some(editor.username.clone()),
                Some(editor.display_name.clone()),
            ),
            None => (None, None),
        };

        ServiceRequestChangeset {
            vehicle_year: request.vehicle.year.clone(),
            vehicle_make: request.vehicle.make.clone(),
            vehicle_model: request.vehicle.model.clone(),
            vehicle_plate: request.vehicle.plate.clone(),
            vehicle_color: request.vehicle.color.clone(),
            vehicle_location: request.vehicle.location.clone(),
            is_dangerous: request.is_dangerous,
            has_heavy_traffic: request.has_heavy_traffic,
            job_type: request.job_type.clone(),
            description: request.description.clone(),
            priority: request.priority,
            status: request.status,
            assigned_to: request.assigned_to.clone(),
            assigned_to_name: request.assigned_to_name.clone(),
            completion_date: request.completion_date,
            cost: request.cost,
            notes: request.notes.clone(),
            last_edited_by,
            last_edited_by_name,
            last_updated_at: request.last_updated_at,
        }
    }
}
