use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored employee row; serializes to the transfer shape used by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    /// Serialized as `YYYY-MM-DD`
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub is_active: bool,
}

impl Employee {
    /// "First Last", as used in the delete confirmation.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
