use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::ServicePriority"]
pub enum ServicePriority {
    #[db_rename = "Low"]
    Low,
    #[default]
    #[db_rename = "Medium"]
    Medium,
    #[db_rename = "High"]
    High,
    #[db_rename = "Emergency"]
    Emergency,
}
