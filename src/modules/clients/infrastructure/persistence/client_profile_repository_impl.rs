use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::log_debug;
use crate::modules::clients::domain::{ClientProfile, ClientProfileRepository, NewClientProfile};
use crate::modules::clients::infrastructure::models::{
    ClientProfileChangeset, ClientProfileRow, NewClientProfileRow,
};
use crate::schema::client_profiles;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;

pub struct ClientProfileRepositoryImpl {
    db: Arc<Database>,
}

impl ClientProfileRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn to_row(profile: NewClientProfile) -> AppResult<NewClientProfileRow> {
        let client_id_seq = i64::try_from(profile.client_id_number.sequence()).map_err(|_| {
            AppError::StoreUnavailable(format!(
                "Client identifier {} exceeds the stored range",
                profile.client_id_number
            ))
        })?;

        Ok(NewClientProfileRow {
            client_id_seq,
            client_id_number: profile.client_id_number.into_string(),
            customer_first_name: profile.first_name,
            customer_last_name: profile.last_name,
            customer_phone: profile.phone,
            last_edited_by: profile.created_by.username.clone(),
            last_edited_by_name: profile.created_by.display_name.clone(),
            created_by: profile.created_by.username,
            created_by_name: profile.created_by.display_name,
            created_at: profile.created_at,
            last_edited_at: profile.created_at,
        })
    }
}

/// Escape LIKE metacharacters so user input matches literally.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ClientProfileRepository for ClientProfileRepositoryImpl {
    async fn max_sequence(&self) -> AppResult<u64> {
        self.db
            .with_connection(|conn| {
                let max: Option<i64> = client_profiles::table
                    .select(diesel::dsl::max(client_profiles::client_id_seq))
                    .first(conn)?;
                Ok(max.and_then(|m| u64::try_from(m).ok()).unwrap_or(0))
            })
            .await
    }

    async fn insert(&self, profile: NewClientProfile) -> AppResult<ClientProfile> {
        let row = Self::to_row(profile)?;
        self.db
            .with_connection(move |conn| {
                let stored = diesel::insert_into(client_profiles::table)
                    .values(&row)
                    .returning(ClientProfileRow::as_returning())
                    .get_result::<ClientProfileRow>(conn)?;
                Ok(ClientProfile::from(stored))
            })
            .await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ClientProfile>> {
        self.db
            .with_connection(move |conn| {
                let row = client_profiles::table
                    .find(id)
                    .select(ClientProfileRow::as_select())
                    .first::<ClientProfileRow>(conn)
                    .optional()?;
                Ok(row.map(ClientProfile::from))
            })
            .await
    }

    async fn find_by_client_id_number(
        &self,
        client_id_number: &str,
    ) -> AppResult<Option<ClientProfile>> {
        let number = client_id_number.to_string();
        self.db
            .with_connection(move |conn| {
                let row = client_profiles::table
                    .filter(client_profiles::client_id_number.eq(&number))
                    .select(ClientProfileRow::as_select())
                    .first::<ClientProfileRow>(conn)
                    .optional()?;
                Ok(row.map(ClientProfile::from))
            })
            .await
    }

    async fn search_fuzzy(&self, needle: &str, limit: usize) -> AppResult<Vec<ClientProfile>> {
        let pattern = format!("%{}%", escape_like(needle));
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        log_debug!("Fuzzy client search with pattern {}", pattern);

        self.db
            .with_connection(move |conn| {
                let rows = client_profiles::table
                    .filter(
                        client_profiles::client_id_number
                            .ilike(&pattern)
                            .or(client_profiles::customer_first_name.ilike(&pattern))
                            .or(client_profiles::customer_last_name.ilike(&pattern)),
                    )
                    .order(client_profiles::id.asc())
                    .limit(limit)
                    .select(ClientProfileRow::as_select())
                    .load::<ClientProfileRow>(conn)?;
                Ok(rows.into_iter().map(ClientProfile::from).collect())
            })
            .await
    }

    async fn get_all(&self) -> AppResult<Vec<ClientProfile>> {
        self.db
            .with_connection(|conn| {
                let rows = client_profiles::table
                    .order(client_profiles::id.asc())
                    .select(ClientProfileRow::as_select())
                    .load::<ClientProfileRow>(conn)?;
                Ok(rows.into_iter().map(ClientProfile::from).collect())
            })
            .await
    }

    async fn update(&self, profile: &ClientProfile) -> AppResult<ClientProfile> {
        let id = profile.id;
        let changes = ClientProfileChangeset::from(profile);
        self.db
            .with_connection(move |conn| {
                let row = diesel::update(client_profiles::table.find(id))
                    .set(&changes)
                    .returning(ClientProfileRow::as_returning())
                    .get_result::<ClientProfileRow>(conn)?;
                Ok(ClientProfile::from(row))
            })
            .await
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        self.db
            .with_connection(move |conn| {
                let deleted = diesel::delete(client_profiles::table.find(id)).execute(conn)?;
                Ok(deleted > 0)
            })
            .await
    }
}
