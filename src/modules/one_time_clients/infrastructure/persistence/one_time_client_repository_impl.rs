use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::modules::one_time_clients::domain::{
    NewOneTimeClient, OneTimeClient, OneTimeClientRepository,
};
use crate::modules::one_time_clients::infrastructure::models::{
    NewOneTimeClientRow, OneTimeClientChangeset, OneTimeClientRow,
};
use crate::schema::one_time_clients;
use crate::shared::errors::AppResult;
use crate::shared::Database;

pub struct OneTimeClientRepositoryImpl {
    db: Arc<Database>,
}

impl OneTimeClientRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OneTimeClientRepository for OneTimeClientRepositoryImpl {
    async fn insert(&self, client: NewOneTimeClient) -> AppResult<OneTimeClient> {
        let row = NewOneTimeClientRow::from(client);
        self.db
            .with_connection(move |conn| {
                let stored = diesel::insert_into(one_time_clients::table)
                    .values(&row)
                    .returning(OneTimeClientRow::as_returning())
                    .get_result::<OneTimeClientRow>(conn)?;
                Ok(stored.into())
            })
            .await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<OneTimeClient>> {
        self.db
            .with_connection(move |conn| {
                let row = one_time_clients::table
                    .find(id)
                    .select(OneTimeClientRow::as_select())
                    .first::<OneTimeClientRow>(conn)
                    .optional()?;
                Ok(row.map(OneTimeClient::from))
            })
            .await
    }

    async fn get_all(&self) -> AppResult<Vec<OneTimeClient>> {
        self.db
            .with_connection(|conn| {
                let rows = one_time_clients::table
                    .order(one_time_clients::id.asc())
                    .select(OneTimeClientRow::as_select())
                    .load::<OneTimeClientRow>(conn)?;
                Ok(rows.into_iter().map(OneTimeClient::from).collect())
            })
            .await
    }

    async fn update(&self, client: &OneTimeClient) -> AppResult<OneTimeClient> {
        let id = client.id;
        let changes = OneTimeClientChangeset::from(client);
        self.db
            .with_connection(move |conn| {
                let row = diesel::update(one_time_clients::table.find(id))
                    .set(&changes)
                    .returning(OneTimeClientRow::as_returning())
                    .get_result::<OneTimeClientRow>(conn)?;
                Ok(row.into())
            })
            .await
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        self.db
            .with_connection(move |conn| {
                let deleted = diesel::delete(one_time_clients::table.find(id)).execute(conn)?;
                Ok(deleted > 0)
            })
            .await
    }
}
