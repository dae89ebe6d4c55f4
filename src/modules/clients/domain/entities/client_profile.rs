use chrono::{DateTime, Utc};

use crate::modules::clients::domain::value_objects::ClientIdNumber;
use crate::shared::domain::Attribution;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

const NAME_MAX: usize = 80;
const PHONE_MAX: usize = 20;

/// A recurring customer record.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientProfile {
    pub id: i32,
    pub client_id_number: ClientIdNumber,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub created_by: Attribution,
    pub last_edited_by: Attribution,
    pub created_at: DateTime<Utc>,
    pub last_edited_at: DateTime<Utc>,
}

/// A profile that has been assigned an identifier but not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClientProfile {
    pub client_id_number: ClientIdNumber,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub created_by: Attribution,
    pub created_at: DateTime<Utc>,
}

/// Validated fields supplied when creating a profile, before allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub created_by: Attribution,
}

/// Fields a profile update may touch; `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl ClientProfileDraft {
    /// Trim and check the required customer fields.
    pub fn new(
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
        created_by: Attribution,
    ) -> AppResult<Self> {
        let first_name = Validator::required("customer_first_name", first_name)?;
        let last_name = Validator::required("customer_last_name", last_name)?;
        let phone = Validator::required("customer_phone", phone)?;
        Validator::validate_max_length("customer_first_name", &first_name, NAME_MAX)?;
        Validator::validate_max_length("customer_last_name", &last_name, NAME_MAX)?;
        Validator::validate_max_length("customer_phone", &phone, PHONE_MAX)?;
        created_by.check_widths()?;

        Ok(Self {
            first_name,
            last_name,
            phone,
            created_by,
        })
    }

    pub fn with_identifier(&self, client_id_number: ClientIdNumber) -> NewClientProfile {
        NewClientProfile {
            client_id_number,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            created_by: self.created_by.clone(),
            created_at: Utc::now(),
        }
    }
}

impl ClientProfileUpdate {
    /// Trim supplied fields; a supplied field may not be blank.
    pub fn normalized(self) -> AppResult<Self> {
        fn check(field: &str, value: Option<String>, max: usize) -> AppResult<Option<String>> {
            match value {
                None => Ok(None),
                Some(v) => {
                    let v = Validator::required(field, Some(&v))?;
                    Validator::validate_max_length(field, &v, max)?;
                    Ok(Some(v))
                }
            }
        }

        Ok(Self {
            first_name: check("customer_first_name", self.first_name, NAME_MAX)?,
            last_name: check("customer_last_name", self.last_name, NAME_MAX)?,
            phone: check("customer_phone", self.phone, PHONE_MAX)?,
        })
    }
}

impl ClientProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Apply a partial update and stamp the editor. Identifier and creation
    /// data never change.
    pub fn apply_update(&mut self, update: ClientProfileUpdate, editor: Attribution) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        self.last_edited_by = editor;
        self.last_edited_at = Utc::now();
    }
}
