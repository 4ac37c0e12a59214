//! Persisted row types for companies and users.
//!
//! These are transient in-memory views over store rows; the store owns all
//! persisted state and `tokens` is the only field mutated after creation.

/// A company row.
///
/// `id` is caller-supplied at ingestion and unique across companies.
/// `top_up` is the fixed credit applied once per active user per run; it
/// may be zero or negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub top_up: i64,
    /// Company-level switch; when false, none of this company's users are
    /// emailable regardless of their own flag.
    pub email_status: bool,
}

/// A user row.
///
/// `id` is assigned by the store at insert; ids present in the input are
/// ignored. `last_name` is the sort key for all per-company iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_id: i64,
    /// User-level opt-in to email notification.
    pub email_status: bool,
    /// Inactive users are invisible to the top-up pass and the report.
    pub active_status: bool,
    pub tokens: i64,
}

impl User {
    /// Whether this user lands in the emailable subset of the given company.
    pub fn is_emailable_for(&self, company: &Company) -> bool {
        company.email_status && self.email_status
    }
}
