use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::modules::service_requests::domain::{
    NewServiceRequest, ServiceRequest, ServiceRequestRepository, ServiceStatus, StatusSummary,
};
use crate::modules::service_requests::infrastructure::models::{
    NewServiceRequestRow, ServiceRequestChangeset, ServiceRequestRow,
};
use crate::schema::service_requests;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::TimedOperation;
use crate::shared::Database;

pub struct ServiceRequestRepositoryImpl {
    db: Arc<Database>,
}

impl ServiceRequestRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn into_entities(rows: Vec<ServiceRequestRow>) -> AppResult<Vec<ServiceRequest>> {
    rows.into_iter().map(ServiceRequestRow::into_entity).collect()
}

#[async_trait]
impl ServiceRequestRepository for ServiceRequestRepositoryImpl {
    async fn insert(&self, request: NewServiceRequest) -> AppResult<ServiceRequest> {
        let row = NewServiceRequestRow::from(request);
        self.db
            .with_connection(move |conn| {
                diesel::insert_into(service_requests::table)
                    .values(&row)
                    .returning(ServiceRequestRow::as_returning())
                    .get_result::<ServiceRequestRow>(conn)?
                    .into_entity()
            })
            .await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceRequest>> {
        self.db
            .with_connection(move |conn| {
                service_requests::table
                    .find(id)
                    .select(ServiceRequestRow::as_select())
                    .first::<ServiceRequestRow>(conn)
                    .optional()?
                    .map(ServiceRequestRow::into_entity)
                    .transpose()
            })
            .await
    }

    async fn get_all(&self) -> AppResult<Vec<ServiceRequest>> {
        self.db
            .with_connection(|conn| {
                let rows = service_requests::table
                    .order(service_requests::id.asc())
                    .select(ServiceRequestRow::as_select())
                    .load::<ServiceRequestRow>(conn)?;
                into_entities(rows)
            })
            .await
    }

    async fn find_by_client(&self, client_id: i32) -> AppResult<Vec<ServiceRequest>> {
        self.db
            .with_connection(move |conn| {
                let rows = service_requests::table
                    .filter(service_requests::client_id.eq(client_id))
                    .order(service_requests::id.asc())
                    .select(ServiceRequestRow::as_select())
                    .load::<ServiceRequestRow>(conn)?;
                into_entities(rows)
            })
            .await
    }

    async fn count_for_client(&self, client_id: i32) -> AppResult<i64> {
        self.db
            .with_connection(move |conn| {
                Ok(service_requests::table
                    .filter(service_requests::client_id.eq(client_id))
                    .count()
                    .get_result::<i64>(conn)?)
            })
            .await
    }

    async fn count_for_one_time_client(&self, one_time_client_id: i32) -> AppResult<i64> {
        self.db
            .with_connection(move |conn| {
                Ok(service_requests::table
                    .filter(service_requests::one_time_client_id.eq(one_time_client_id))
                    .count()
                    .get_result::<i64>(conn)?)
            })
            .await
    }

    async fn update(&self, request: &ServiceRequest) -> AppResult<ServiceRequest> {
        let id = request.id;
        let changes = ServiceRequestChangeset::from(request);
        self.db
            .with_connection(move |conn| {
                diesel::update(service_requests::table.find(id))
                    .set(&changes)
                    .returning(ServiceRequestRow::as_returning())
                    .get_result::<ServiceRequestRow>(conn)?
                    .into_entity()
            })
            .await
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        self.db
            .with_connection(move |conn| {
                let deleted = diesel::delete(service_requests::table.find(id)).execute(conn)?;
                Ok(deleted > 0)
            })
            .await
    }

    async fn status_summary(&self) -> AppResult<StatusSummary> {
        let timer = TimedOperation::new("status_summary", "service_requests");
        let summary = self
            .db
            .with_connection(|conn| {
                let counts = service_requests::table
                    .group_by(service_requests::status)
                    .select((service_requests::status, diesel::dsl::count_star()))
                    .load::<(ServiceStatus, i64)>(conn)?;

                let mut summary = StatusSummary::default();
                for (status, count) in counts {
                    summary.record(status, count);
                }
                Ok(summary)
            })
            .await?;
        timer.finish();
        Ok(summary)
    }
}
