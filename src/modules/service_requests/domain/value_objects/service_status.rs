use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a job ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::ServiceStatus"]
pub enum ServiceStatus {
    #[default]
    #[serde(rename = "Pending")]
    #[db_rename = "Pending"]
    Pending,
    #[serde(rename = "In Progress")]
    #[db_rename = "In Progress"]
    InProgress,
    #[serde(rename = "Completed")]
    #[db_rename = "Completed"]
    Completed,
    #[serde(rename = "Cancelled")]
    #[db_rename = "Cancelled"]
    Cancelled,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "Pending",
            ServiceStatus::InProgress => "In Progress",
            ServiceStatus::Completed => "Completed",
            ServiceStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ServiceStatus::Completed | ServiceStatus::Cancelled)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_dashboard_labels() {
        assert_eq!(
            serde_json::to_string(&ServiceStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        let parsed: ServiceStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(parsed, ServiceStatus::Completed);
    }

    #[test]
    fn defaults_to_pending() {
        assert_eq!(ServiceStatus::default(), ServiceStatus::Pending);
        assert!(!ServiceStatus::Pending.is_closed());
        assert!(ServiceStatus::Cancelled.is_closed());
    }
}
