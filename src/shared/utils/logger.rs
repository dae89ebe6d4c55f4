use log::{debug, error, info, warn};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "info,towdesk_lib=debug,towdesk=debug,diesel=warn,tower_http=info";

/// Initialize the logging system
/// This should be called once at application startup. `RUST_LOG` overrides the
/// default filter; `log` records are forwarded into the tracing subscriber.
pub fn init_logger() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let installed = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();

        match installed {
            Ok(()) => info!("Logging system initialized"),
            Err(e) => eprintln!("Logger already installed: {}", e),
        }
    });
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log database operations
    pub fn db_operation(operation: &str, table: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!("DB: {} on {} completed in {}ms", operation, table, duration),
            None => debug!("DB: Starting {} on {}", operation, table),
        }
    }

    /// Log client search operations
    pub fn search_operation(query: &str, tier: Option<&str>, results: Option<usize>) {
        match (tier, results) {
            (Some(t), Some(r)) => info!("Search: '{}' ({}) returned {} results", query, t, r),
            (Some(t), None) => debug!("Search: Starting '{}' ({})", query, t),
            (None, Some(r)) => info!("Search: '{}' returned {} results", query, r),
            (None, None) => debug!("Search: Starting '{}'", query),
        }
    }

    /// Log identifier allocation retries
    pub fn allocation_retry(attempt: u32, max_attempts: u32, reason: &str) {
        warn!(
            "Allocation: attempt {}/{} collided ({}), re-seeding",
            attempt, max_attempts, reason
        );
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
    table: &'static str,
}

impl TimedOperation {
    pub fn new(operation: &str, table: &'static str) -> Self {
        LogContext::db_operation(operation, table, None);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
            table,
        }
    }

    pub fn finish(self) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::db_operation(&self.operation, self.table, Some(duration));
        duration
    }
}
