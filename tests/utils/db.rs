/// Database test utilities with a shared pool
///
/// Integration tests run against `TEST_DATABASE_URL`, serialized through a
/// global lock and truncated before each test.
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, Pool};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use towdesk_lib::shared::Database;

type PgPool = Pool<ConnectionManager<PgConnection>>;

static DB: OnceLock<Arc<Database>> = OnceLock::new();

/// Get or create the migrated test database
pub fn test_database() -> Arc<Database> {
    DB.get_or_init(|| {
        dotenvy::dotenv().ok();
        let test_db_url = std::env::var("TEST_DATABASE_URL")
            .expect("TEST_DATABASE_URL must be set in .env for tests");

        let manager = ConnectionManager::<PgConnection>::new(test_db_url);
        let pool: PgPool = r2d2::Pool::builder()
            .max_size(10)
            .build(manager)
            .expect("Failed to create test database pool");

        let db = Database::from_pool(pool);
        db.run_migrations().expect("Failed to migrate test database");
        Arc::new(db)
    })
    .clone()
}

/// Clean all tables - use at the start of each test
pub fn clean_test_db() {
    let db = test_database();
    let mut conn = db.get_connection().expect("Failed to get DB connection");

    diesel::sql_query(
        "TRUNCATE TABLE service_requests, client_profiles, one_time_clients, users \
         RESTART IDENTITY CASCADE",
    )
    .execute(&mut conn)
    .expect("Failed to truncate tables");
}

/// Global test mutex for serialization
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Acquire test lock to ensure tests run serially
pub fn acquire_test_lock() -> MutexGuard<'static, ()> {
    // Recover from a poisoned lock left by a failed test
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
