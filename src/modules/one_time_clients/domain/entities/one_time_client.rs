use chrono::{DateTime, Utc};

use crate::shared::domain::Attribution;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

const NAME_MAX: usize = 80;
const PHONE_MAX: usize = 20;
const EMAIL_MAX: usize = 120;
const ADDRESS_MAX: usize = 255;

/// A walk-in customer without a client identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct OneTimeClient {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_by: Attribution,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOneTimeClient {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_by: Attribution,
}

/// Partial update. For `email` and `address`, `Some(None)` clears the
/// stored value while `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneTimeClientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<Option<String>>,
    pub address: Option<Option<String>>,
}

impl NewOneTimeClient {
    pub fn new(
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
        created_by: Attribution,
    ) -> AppResult<Self> {
        let client = Self {
            first_name: Validator::required("first_name", first_name)?,
            last_name: Validator::required("last_name", last_name)?,
            phone: Validator::required("phone", phone)?,
            email: Validator::optional(email),
            address: Validator::optional(address),
            created_by,
        };
        Validator::validate_max_length("first_name", &client.first_name, NAME_MAX)?;
        Validator::validate_max_length("last_name", &client.last_name, NAME_MAX)?;
        Validator::validate_max_length("phone", &client.phone, PHONE_MAX)?;
        client.created_by.check_widths()?;
        if let Some(email) = &client.email {
            Validator::validate_max_length("email", email, EMAIL_MAX)?;
        }
        if let Some(address) = &client.address {
            Validator::validate_max_length("address", address, ADDRESS_MAX)?;
        }
        Ok(client)
    }
}

impl OneTimeClientUpdate {
    /// Trim supplied values. Names and phone may not be blank; a blank
    /// email or address clears the stored value.
    pub fn normalized(self) -> AppResult<Self> {
        let required = |field: &str, value: Option<String>| -> AppResult<Option<String>> {
            value
                .map(|v| Validator::required(field, Some(&v)))
                .transpose()
        };
        let clearable =
            |value: Option<Option<String>>| value.map(|v| Validator::optional(v.as_deref()));

        Ok(Self {
            first_name: required("first_name", self.first_name)?,
            last_name: required("last_name", self.last_name)?,
            phone: required("phone", self.phone)?,
            email: clearable(self.email),
            address: clearable(self.address),
        })
    }
}

impl OneTimeClient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn apply_update(&mut self, update: OneTimeClientUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
    }
}
