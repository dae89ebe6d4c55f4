//! In-memory repository fakes for unit tests.
//!
//! Each fake keeps rows in insertion order behind a std mutex and mirrors the
//! uniqueness rules of the Postgres schema, so services see the same
//! `Conflict` errors they would get from the real store. Column widths are
//! not enforced here; the domain types reject over-wide text before any
//! repository call.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::modules::clients::domain::{ClientProfile, ClientProfileRepository, NewClientProfile};
use crate::modules::employees::domain::{NewUser, User, UserRepository};
use crate::modules::one_time_clients::domain::{
    NewOneTimeClient, OneTimeClient, OneTimeClientRepository,
};
use crate::modules::service_requests::domain::{
    NewServiceRequest, ServiceRequest, ServiceRequestRepository, StatusSummary,
};
use crate::shared::errors::{AppError, AppResult};

struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn missing(kind: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{} {} not found", kind, id))
}

// ============= CLIENT PROFILES =============

#[derive(Default)]
pub struct InMemoryClientProfiles {
    table: Mutex<Table<ClientProfile>>,
}

impl InMemoryClientProfiles {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientProfileRepository for InMemoryClientProfiles {
    async fn max_sequence(&self) -> AppResult<u64> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .map(|p| p.client_id_number.sequence())
            .max()
            .unwrap_or(0))
    }

    async fn insert(&self, profile: NewClientProfile) -> AppResult<ClientProfile> {
        let mut table = self.table.lock().unwrap();
        let clash = table.rows.iter().any(|p| {
            p.client_id_number.sequence() == profile.client_id_number.sequence()
                || p.client_id_number.as_str() == profile.client_id_number.as_str()
        });
        if clash {
            return Err(AppError::Conflict(format!(
                "client_id_number {} already exists",
                profile.client_id_number
            )));
        }

        let stored = ClientProfile {
            id: table.next_id(),
            client_id_number: profile.client_id_number,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            last_edited_by: profile.created_by.clone(),
            created_by: profile.created_by,
            created_at: profile.created_at,
            last_edited_at: profile.created_at,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ClientProfile>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_client_id_number(
        &self,
        client_id_number: &str,
    ) -> AppResult<Option<ClientProfile>> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .find(|p| p.client_id_number.as_str() == client_id_number)
            .cloned())
    }

    async fn search_fuzzy(&self, needle: &str, limit: usize) -> AppResult<Vec<ClientProfile>> {
        let needle = needle.to_lowercase();
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .filter(|p| {
                p.client_id_number.as_str().to_lowercase().contains(&needle)
                    || p.first_name.to_lowercase().contains(&needle)
                    || p.last_name.to_lowercase().contains(&needle)
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_all(&self) -> AppResult<Vec<ClientProfile>> {
        Ok(self.table.lock().unwrap().rows.clone())
    }

    async fn update(&self, profile: &ClientProfile) -> AppResult<ClientProfile> {
        let mut table = self.table.lock().unwrap();
        let row = table
            .rows
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| missing("Client", profile.id))?;
        *row = profile.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);
        Ok(table.rows.len() != before)
    }
}

// ============= ONE-TIME CLIENTS =============

#[derive(Default)]
pub struct InMemoryOneTimeClients {
    table: Mutex<Table<OneTimeClient>>,
}

impl InMemoryOneTimeClients {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OneTimeClientRepository for InMemoryOneTimeClients {
    async fn insert(&self, client: NewOneTimeClient) -> AppResult<OneTimeClient> {
        let mut table = self.table.lock().unwrap();
        let stored = OneTimeClient {
            id: table.next_id(),
            first_name: client.first_name,
            last_name: client.last_name,
            phone: client.phone,
            email: client.email,
            address: client.address,
            created_by: client.created_by,
            created_at: Utc::now(),
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<OneTimeClient>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|c| c.id == id).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<OneTimeClient>> {
        Ok(self.table.lock().unwrap().rows.clone())
    }

    async fn update(&self, client: &OneTimeClient) -> AppResult<OneTimeClient> {
        let mut table = self.table.lock().unwrap();
        let row = table
            .rows
            .iter_mut()
            .find(|c| c.id == client.id)
            .ok_or_else(|| missing("One-time client", client.id))?;
        *row = client.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|c| c.id != id);
        Ok(table.rows.len() != before)
    }
}

// ============= SERVICE REQUESTS =============

#[derive(Default)]
pub struct InMemoryServiceRequests {
    table: Mutex<Table<ServiceRequest>>,
}

impl InMemoryServiceRequests {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServiceRequestRepository for InMemoryServiceRequests {
    async fn insert(&self, request: NewServiceRequest) -> AppResult<ServiceRequest> {
        let now = Utc::now();
        let mut table = self.table.lock().unwrap();
        let stored = ServiceRequest {
            id: table.next_id(),
            client: request.client,
            vehicle: request.vehicle,
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
            created_by: request.created_by,
            created_at: now,
            last_edited_by: None,
            last_updated_at: now,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceRequest>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<ServiceRequest>> {
        Ok(self.table.lock().unwrap().rows.clone())
    }

    async fn find_by_client(&self, client_id: i32) -> AppResult<Vec<ServiceRequest>> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .filter(|r| r.client.client_id() == Some(client_id))
            .cloned()
            .collect())
    }

    async fn count_for_client(&self, client_id: i32) -> AppResult<i64> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .filter(|r| r.client.client_id() == Some(client_id))
            .count() as i64)
    }

    async fn count_for_one_time_client(&self, one_time_client_id: i32) -> AppResult<i64> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .filter(|r| r.client.one_time_client_id() == Some(one_time_client_id))
            .count() as i64)
    }

    async fn update(&self, request: &ServiceRequest) -> AppResult<ServiceRequest> {
        let mut table = self.table.lock().unwrap();
        let row = table
            .rows
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or_else(|| missing("Service request", request.id))?;
        *row = request.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        Ok(table.rows.len() != before)
    }

    async fn status_summary(&self) -> AppResult<StatusSummary> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().map(|r| r.status).collect())
    }
}

// ============= USERS =============

#[derive(Default)]
pub struct InMemoryUsers {
    table: Mutex<Table<User>>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut table = self.table.lock().unwrap();
        if table.rows.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "username {} already exists",
                user.username
            )));
        }
        let stored = User {
            id: table.next_id(),
            username: user.username,
            password_hash: user.password_hash,
            name: user.name,
            role: user.role,
            is_temporary_password: user.is_temporary_password,
            created_at: Utc::now(),
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|u| u.username == username).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        Ok(self.table.lock().unwrap().rows.clone())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut table = self.table.lock().unwrap();
        let row = table
            .rows
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| missing("User", user.id))?;
        *row = user.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|u| u.id != id);
        Ok(table.rows.len() != before)
    }
}
