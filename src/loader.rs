//! Atomic ingestion of company and user records.
//!
//! All companies are inserted first, then all users, inside a single
//! transaction. The first invalid record aborts the whole batch so the
//! store is never left partially seeded; the error names the offending
//! record so it can be corrected.

use crate::error::{EngineError, Result};
use crate::record::{CompanyRecord, UserRecord};
use crate::store::Store;
use log::debug;

/// Seeds the store from the provided record lists.
///
/// Companies use their caller-provided ids verbatim; user ids in the input
/// are ignored and the store assigns its own. On success every record is
/// persisted; on any failure none are.
///
/// A user whose `company_id` references no company is accepted: the store
/// declares no foreign key, and such a user simply never surfaces in any
/// company's active set.
pub fn seed(store: &Store, companies: &[CompanyRecord], users: &[UserRecord]) -> Result<()> {
    store.with_transaction(|tx| {
        for (index, record) in companies.iter().enumerate() {
            insert_company(tx, index, record)?;
        }

        for (index, record) in users.iter().enumerate() {
            insert_user(tx, index, record)?;
        }

        debug!(
            "Seeded {} companies and {} users",
            companies.len(),
            users.len()
        );
        Ok(())
    })
}

fn insert_company(store: &Store, index: usize, record: &CompanyRecord) -> Result<()> {
    let rejected = |reason: String| EngineError::CompanyRejected {
        index,
        reason,
        record: record.to_json(),
    };

    let company = record.validate().map_err(&rejected)?;
    store
        .insert_company(&company)
        .map_err(|e| rejected(e.to_string()))?;
    Ok(())
}

fn insert_user(store: &Store, index: usize, record: &UserRecord) -> Result<()> {
    let rejected = |reason: String| EngineError::UserRejected {
        index,
        reason,
        record: record.to_json(),
    };

    let user = record.validate().map_err(&rejected)?;
    store
        .insert_user(&user)
        .map_err(|e| rejected(e.to_string()))?;
    Ok(())
}
