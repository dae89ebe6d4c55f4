use std::fmt;

use crate::shared::config::ClientIdSettings;

/// Prefix and zero-padded width used to render client identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdFormat {
    prefix: String,
    width: usize,
}

impl ClientIdFormat {
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into().to_ascii_uppercase(),
            width,
        }
    }

    pub fn from_settings(settings: &ClientIdSettings) -> Self {
        Self::new(settings.prefix.clone(), settings.width)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Render `sequence` with the prefix. Wider numbers are never truncated.
    pub fn format(&self, sequence: u64) -> ClientIdNumber {
        ClientIdNumber {
            value: format!("{}{:0width$}", self.prefix, sequence, width = self.width),
            sequence,
        }
    }
}

impl Default for ClientIdFormat {
    fn default() -> Self {
        Self::from_settings(&ClientIdSettings::default())
    }
}

/// Externally visible client identifier, e.g. `C0007`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdNumber {
    value: String,
    sequence: u64,
}

impl ClientIdNumber {
    /// Rebuild from stored columns.
    pub fn from_parts(value: String, sequence: u64) -> Self {
        Self { value, sequence }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for ClientIdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
