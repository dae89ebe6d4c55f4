use crate::shared::errors::{AppError, AppResult};

/// The customer a job ticket belongs to. Exactly one kind is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientReference {
    Profile(i32),
    OneTime(i32),
}

impl ClientReference {
    /// Build from the two nullable columns / request fields.
    pub fn from_ids(client_id: Option<i32>, one_time_client_id: Option<i32>) -> AppResult<Self> {
        match (client_id, one_time_client_id) {
            (Some(id), None) => Ok(ClientReference::Profile(id)),
            (None, Some(id)) => Ok(ClientReference::OneTime(id)),
            (Some(_), Some(_)) => Err(AppError::ValidationError(
                "Provide either client_id or one_time_client_id, not both".to_string(),
            )),
            (None, None) => Err(AppError::ValidationError(
                "Missing required field: client_id or one_time_client_id".to_string(),
            )),
        }
    }

    pub fn client_id(&self) -> Option<i32> {
        match self {
            ClientReference::Profile(id) => Some(*id),
            ClientReference::OneTime(_) => None,
        }
    }

    pub fn one_time_client_id(&self) -> Option<i32> {
        match self {
            ClientReference::OneTime(id) => Some(*id),
            ClientReference::Profile(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_reference_is_accepted() {
        assert_eq!(
            ClientReference::from_ids(Some(4), None).unwrap(),
            ClientReference::Profile(4)
        );
        assert_eq!(
            ClientReference::from_ids(None, Some(9)).unwrap().one_time_client_id(),
            Some(9)
        );
        assert!(ClientReference::from_ids(Some(1), Some(2)).is_err());
        assert!(ClientReference::from_ids(None, None).is_err());
    }
}
