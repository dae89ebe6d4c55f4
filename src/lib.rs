pub mod modules;
mod schema;
pub mod server;
pub mod shared;

use std::sync::Arc;

use modules::{
    clients::ClientProfileRepositoryImpl, employees::UserRepositoryImpl,
    one_time_clients::OneTimeClientRepositoryImpl,
    service_requests::ServiceRequestRepositoryImpl,
};
use server::{AppState, Repositories};
use shared::utils::logger::init_logger;
use shared::{AppConfig, Database};

/// Load configuration, migrate the database and serve the API until a
/// shutdown signal arrives.
pub async fn run() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::from_env()?;

    let db = {
        let url = config.database_url.clone();
        let pool_max_size = config.pool_max_size;
        // Pool construction and migrations block on the network.
        tokio::task::spawn_blocking(move || -> Result<Database, shared::errors::AppError> {
            let db = Database::new(&url, pool_max_size)?;
            db.run_migrations()?;
            Ok(db)
        })
        .await??
    };
    let db = Arc::new(db);

    let state = AppState::new(
        Repositories {
            clients: Arc::new(ClientProfileRepositoryImpl::new(Arc::clone(&db))),
            one_time_clients: Arc::new(OneTimeClientRepositoryImpl::new(Arc::clone(&db))),
            service_requests: Arc::new(ServiceRequestRepositoryImpl::new(Arc::clone(&db))),
            users: Arc::new(UserRepositoryImpl::new(Arc::clone(&db))),
        },
        &config.client_ids,
    );

    if config.seed_demo_users {
        let created = state.employees.seed_demo_users().await?;
        crate::log_info!("Demo users ready ({} created)", created);
    }

    server::serve(&config, server::build_router(state)).await
}
