//! Input record models for JSON ingestion.
//!
//! Raw records deserialize leniently (every field optional) so that a
//! malformed record can be reported with its position and contents instead
//! of failing the whole file parse. Validation into an insertable row
//! happens per record during ingestion.

use serde::{Deserialize, Serialize};

/// Raw company record as read from the companies JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub top_up: Option<i64>,
    pub email_status: Option<bool>,
}

impl CompanyRecord {
    /// Validates the raw record into an insertable company row.
    ///
    /// The caller-provided `id` is used verbatim; uniqueness is enforced by
    /// the store. Returns the reason on the first missing field.
    pub fn validate(&self) -> std::result::Result<NewCompany, String> {
        let id = self.id.ok_or("missing field `id`")?;
        let name = self.name.clone().ok_or("missing field `name`")?;
        let top_up = self.top_up.ok_or("missing field `top_up`")?;
        let email_status = self.email_status.ok_or("missing field `email_status`")?;

        Ok(NewCompany {
            id,
            name,
            top_up,
            email_status,
        })
    }

    /// Renders the raw record for diagnostics.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "<unrenderable record>".to_string())
    }
}

/// Raw user record as read from the users JSON file.
///
/// The `id` field is carried only so diagnostics can show the record as it
/// appeared in the input; it is never inserted. Input data is known to
/// contain duplicate user ids, and nothing references them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company_id: Option<i64>,
    pub email_status: Option<bool>,
    pub active_status: Option<bool>,
    pub tokens: Option<i64>,
}

impl UserRecord {
    /// Validates the raw record into an insertable user row.
    pub fn validate(&self) -> std::result::Result<NewUser, String> {
        let first_name = self.first_name.clone().ok_or("missing field `first_name`")?;
        let last_name = self.last_name.clone().ok_or("missing field `last_name`")?;
        let email = self.email.clone().ok_or("missing field `email`")?;
        let company_id = self.company_id.ok_or("missing field `company_id`")?;
        let email_status = self.email_status.ok_or("missing field `email_status`")?;
        let active_status = self.active_status.ok_or("missing field `active_status`")?;
        let tokens = self.tokens.ok_or("missing field `tokens`")?;

        Ok(NewUser {
            first_name,
            last_name,
            email,
            company_id,
            email_status,
            active_status,
            tokens,
        })
    }

    /// Renders the raw record for diagnostics.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "<unrenderable record>".to_string())
    }
}

/// A validated company row ready for insertion.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub id: i64,
    pub name: String,
    pub top_up: i64,
    pub email_status: bool,
}

/// A validated user row ready for insertion. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_id: i64,
    pub email_status: bool,
    pub active_status: bool,
    pub tokens: i64,
}
