use crate::modules::one_time_clients::domain::{NewOneTimeClient, OneTimeClient};
use crate::schema::one_time_clients;
use crate::shared::domain::Attribution;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = one_time_clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OneTimeClientRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_by: String,
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = one_time_clients)]
pub struct NewOneTimeClientRow {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_by: String,
    pub created_by_name: String,
}

// `treat_none_as_null` so a cleared email/address is written as NULL
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = one_time_clients)]
#[diesel(treat_none_as_null = true)]
pub struct OneTimeClientChangeset {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<OneTimeClientRow> for OneTimeClient {
    fn from(row: OneTimeClientRow) -> Self {
        OneTimeClient {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            email: row.email,
            address: row.address,
            created_by: Attribution::new(row.created_by, row.created_by_name),
            created_at: row.created_at,
        }
    }
}

impl From<NewOneTimeClient> for NewOneTimeClientRow {
    fn from(client: NewOneTimeClient) -> Self {
        NewOneTimeClientRow {
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

impl From<&OneTimeClient> for OneTimeClientChangeset {
    fn from(client: &OneTimeClient) -> Self {
        OneTimeClientChangeset {
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
            phone: client.phone.clone(),
            email: client.email.clone(),
            address: client.address.clone(),
        }
    }
}
