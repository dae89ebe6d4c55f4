use chrono::{DateTime, Utc};

use crate::modules::service_requests::domain::value_objects::{
    ClientReference, ServicePriority, ServiceStatus,
};
use crate::shared::domain::Attribution;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

// Column widths of `service_requests`.
pub const JOB_TYPE_MAX: usize = 50;
const VEHICLE_YEAR_MAX: usize = 4;
const VEHICLE_MAKE_MAX: usize = 80;
const VEHICLE_MODEL_MAX: usize = 80;
const VEHICLE_PLATE_MAX: usize = 20;
const VEHICLE_COLOR_MAX: usize = 30;
const VEHICLE_LOCATION_MAX: usize = 255;
const ASSIGNEE_MAX: usize = 80;
const ASSIGNEE_NAME_MAX: usize = 120;

fn check_widths(fields: &[(&str, Option<&str>, usize)]) -> AppResult<()> {
    for (field, value, max) in fields {
        if let Some(value) = value {
            Validator::validate_max_length(field, value, *max)?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleDetails {
    pub year: String,
    pub make: String,
    pub model: String,
    pub plate: String,
    pub color: String,
    pub location: String,
}

/// A tow job ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub id: i32,
    pub client: ClientReference,
    pub vehicle: VehicleDetails,
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
    pub created_by: Attribution,
    pub created_at: DateTime<Utc>,
    pub last_edited_by: Option<Attribution>,
    pub last_updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceRequest {
    pub client: ClientReference,
    pub vehicle: VehicleDetails,
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
    pub created_by: Attribution,
}

/// Partial update of a ticket; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRequestUpdate {
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
    pub completion_date: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

/// Ticket counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl StatusSummary {
    pub fn record(&mut self, status: ServiceStatus, count: i64) {
        self.total += count;
        match status {
            ServiceStatus::Pending => self.pending += count,
            ServiceStatus::InProgress => self.in_progress += count,
            ServiceStatus::Completed => self.completed += count,
            ServiceStatus::Cancelled => self.cancelled += count,
        }
    }
}

impl FromIterator<ServiceStatus> for StatusSummary {
    fn from_iter<I: IntoIterator<Item = ServiceStatus>>(iter: I) -> Self {
        let mut summary = StatusSummary::default();
        for status in iter {
            summary.record(status, 1);
        }
        summary
    }
}

impl NewServiceRequest {
    /// Reject text wider than its column.
    pub fn check_widths(&self) -> AppResult<()> {
        check_widths(&[
            ("job_type", Some(self.job_type.as_str()), JOB_TYPE_MAX),
            ("vehicle_year", Some(self.vehicle.year.as_str()), VEHICLE_YEAR_MAX),
            ("vehicle_make", Some(self.vehicle.make.as_str()), VEHICLE_MAKE_MAX),
            ("vehicle_model", Some(self.vehicle.model.as_str()), VEHICLE_MODEL_MAX),
            ("vehicle_plate", Some(self.vehicle.plate.as_str()), VEHICLE_PLATE_MAX),
            ("vehicle_color", Some(self.vehicle.color.as_str()), VEHICLE_COLOR_MAX),
            ("vehicle_location", Some(self.vehicle.location.as_str()), VEHICLE_LOCATION_MAX),
            ("assigned_to", self.assigned_to.as_deref(), ASSIGNEE_MAX),
            ("assigned_to_name", self.assigned_to_name.as_deref(), ASSIGNEE_NAME_MAX),
        ])?;
        self.created_by.check_widths()
    }
}

impl ServiceRequestUpdate {
    pub fn check_widths(&self) -> AppResult<()> {
        check_widths(&[
            ("job_type", self.job_type.as_deref(), JOB_TYPE_MAX),
            ("vehicle_year", self.vehicle_year.as_deref(), VEHICLE_YEAR_MAX),
            ("vehicle_make", self.vehicle_make.as_deref(), VEHICLE_MAKE_MAX),
            ("vehicle_model", self.vehicle_model.as_deref(), VEHICLE_MODEL_MAX),
            ("vehicle_plate", self.vehicle_plate.as_deref(), VEHICLE_PLATE_MAX),
            ("vehicle_color", self.vehicle_color.as_deref(), VEHICLE_COLOR_MAX),
            ("vehicle_location", self.vehicle_location.as_deref(), VEHICLE_LOCATION_MAX),
            ("assigned_to", self.assigned_to.as_deref(), ASSIGNEE_MAX),
            ("assigned_to_name", self.assigned_to_name.as_deref(), ASSIGNEE_NAME_MAX),
        ])
    }

    /// True when a supplied hazard flag differs from the stored one.
    pub fn changes_hazard_flags(&self, current: &ServiceRequest) -> bool {
        let dangerous = self
            .is_dangerous
            .is_some_and(|v| v != current.is_dangerous);
        let traffic = self
            .has_heavy_traffic
            .is_some_and(|v| v != current.has_heavy_traffic);
        dangerous || traffic
    }
}

impl ServiceRequest {
    /// Apply a partial update and stamp the editor. Moving to `Completed`
    /// without a completion date records the current time.
    pub fn apply_update(&mut self, update: ServiceRequestUpdate, editor: Attribution) {
        let now = Utc::now();

        if let Some(v) = update.vehicle_year {
            self.vehicle.year = v;
        }
        if let Some(v) = update.vehicle_make {
            self.vehicle.make = v;
        }
        if let Some(v) = update.vehicle_model {
            self.vehicle.model = v;
        }
        if let Some(v) = update.vehicle_plate {
            self.vehicle.plate = v;
        }
        if let Some(v) = update.vehicle_color {
            self.vehicle.color = v;
        }
        if let Some(v) = update.vehicle_location {
            self.vehicle.location = v;
        }
        if let Some(v) = update.is_dangerous {
            self.is_dangerous = v;
        }
        if let Some(v) = update.has_heavy_traffic {
            self.has_heavy_traffic = v;
        }
        if let Some(v) = update.job_type {
            self.job_type = v;
        }
        if let Some(v) = update.description {
            self.description = v;
        }
        if let Some(v) = update.priority {
            self.priority = v;
        }
        if let Some(v) = update.assigned_to {
            self.assigned_to = Some(v);
        }
        if let Some(v) = update.assigned_to_name {
            self.assigned_to_name = Some(v);
        }
        if let Some(v) = update.cost {
            self.cost = v;
        }
        if let Some(v) = update.notes {
            self.notes = Some(v);
        }
        if let Some(v) = update.completion_date {
            self.completion_date = Some(v);
        }
        if let Some(status) = update.status {
            self.status = status;
            if status == ServiceStatus::Completed && self.completion_date.is_none() {
                self.completion_date = Some(now);
            }
        }

        self.last_edited_by = Some(editor);
        self.last_updated_at = now;
    }
}
