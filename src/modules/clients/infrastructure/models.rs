use crate::modules::clients::domain::{ClientIdNumber, ClientProfile};
use crate::schema::client_profiles;
use crate::shared::domain::Attribution;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

// ============= CLIENT PROFILE MODELS =============

// For reading from database
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = client_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientProfileRow {
    pub id: i32,
    pub client_id_seq: i64,
    pub client_id_number: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_phone: String,
    pub created_by: String,
    pub created_by_name: String,
    pub last_edited_by: String,
    pub last_edited_by_name: String,
    pub created_at: DateTime<Utc>,
    pub last_edited_at: DateTime<Utc>,
}

// For inserting new profiles; the editor columns start out as the creator
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = client_profiles)]
pub struct NewClientProfileRow {
    pub client_id_seq: i64,
    pub client_id_number: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_phone: String,
    pub created_by: String,
    pub created_by_name: String,
    pub last_edited_by: String,
    pub last_edited_by_name: String,
    pub created_at: DateTime<Utc>,
    pub last_edited_at: DateTime<Utc>,
}

// For updating existing profiles (identifier and creation data never change)
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = client_profiles)]
pub struct ClientProfileChangeset {
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_phone: String,
    pub last_edited_by: String,
    pub last_edited_by_name: String,
    pub last_edited_at: DateTime<Utc>,
}

impl From<ClientProfileRow> for ClientProfile {
    fn from(row: ClientProfileRow) -> Self {
        let sequence = u64::try_from(row.client_id_seq).unwrap_or_default();
        ClientProfile {
            id: row.id,
            client_id_number: ClientIdNumber::from_parts(row.client_id_number, sequence),
            first_name: row.customer_first_name,
            last_name: row.customer_last_name,
            phone: row.customer_phone,
            created_by: Attribution::new(row.created_by, row.created_by_name),
            last_edited_by: Attribution::new(row.last_edited_by, row.last_edited_by_name),
            created_at: row.created_at,
            last_edited_at: row.last_edited_at,
        }
    }
}

impl From<&ClientProfile> for ClientProfileChangeset {
    fn from(profile: &ClientProfile) -> Self {
        ClientProfileChangeset {
            customer_first_name: profile.first_name.clone(),
            customer_last_name: profile.last_name.clone(),
            customer_phone: profile.phone.clone(),
            last_edited_by: profile.last_edited_by.username.clone(),
            last_edited_by_name: profile.last_edited_by.display_name.clone(),
            last_edited_at: profile.last_edited_at,
        }
    }
}
