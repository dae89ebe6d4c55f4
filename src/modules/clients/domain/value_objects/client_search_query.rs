use crate::shared::errors::{AppError, AppResult};

/// A validated client search: lowercase needle plus a positive result limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSearchQuery {
    needle: String,
    limit: usize,
}

impl ClientSearchQuery {
    pub fn new(query: &str, limit: Option<i64>, default_limit: usize) -> AppResult<Self> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(AppError::InvalidArgument(
                "Search query must not be empty".to_string(),
            ));
        }

        let limit = match limit {
            None => default_limit,
            Some(n) if n > 0 => usize::try_from(n).map_err(|_| {
                AppError::InvalidArgument(format!("Search limit {} is too large", n))
            })?,
            Some(n) => {
                return Err(AppError::InvalidArgument(format!(
                    "Search limit must be a positive integer, got {}",
                    n
                )))
            }
        };

        Ok(Self { needle, limit })
    }

    /// Build from raw query-string values; a non-numeric limit is rejected.
    pub fn from_raw(
        query: Option<&str>,
        limit: Option<&str>,
        default_limit: usize,
    ) -> AppResult<Self> {
        let limit = match limit.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                AppError::InvalidArgument(format!(
                    "Search limit must be a positive integer, got '{}'",
                    raw
                ))
            })?),
        };
        Self::new(query.unwrap_or_default(), limit, default_limit)
    }

    /// Lowercased, trimmed search text.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Candidate identifier for the exact-match tier.
    pub fn as_client_id_number(&self) -> String {
        self.needle.to_uppercase()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_lowercase() {
        let query = ClientSearchQuery::new("  SMITH ", Some(2), 10).unwrap();
        assert_eq!(query.needle(), "smith");
        assert_eq!(query.limit(), 2);
    }

    #[test]
    fn default_limit_applies_when_absent() {
        let query = ClientSearchQuery::new("c0003", None, 10).unwrap();
        assert_eq!(query.limit(), 10);
        assert_eq!(query.as_client_id_number(), "C0003");
    }

    #[test]
    fn empty_query_is_invalid() {
        assert!(matches!(
            ClientSearchQuery::new("", Some(10), 10),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            ClientSearchQuery::new("   ", None, 10),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn non_positive_limits_are_invalid() {
        assert!(ClientSearchQuery::new("ann", Some(0), 10).is_err());
        assert!(ClientSearchQuery::new("ann", Some(-3), 10).is_err());
    }

    #[test]
    fn raw_limit_must_be_numeric() {
        assert!(matches!(
            ClientSearchQuery::from_raw(Some("ann"), Some("abc"), 10),
            Err(AppError::InvalidArgument(_))
        ));
        let query = ClientSearchQuery::from_raw(Some("ann"), Some(" 5 "), 10).unwrap();
        assert_eq!(query.limit(), 5);
    }

    #[test]
    fn missing_raw_query_is_invalid() {
        assert!(ClientSearchQuery::from_raw(None, None, 10).is_err());
    }
}
