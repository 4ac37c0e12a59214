//! Core top-up pass.
//!
//! Visits every company in ascending id order, credits each active user
//! with the company's top-up amount, and records the visitation for the
//! report. The entire pass runs inside a single transaction.

use crate::eligibility::{partition, Partition};
use crate::error::Result;
use crate::model::{Company, User};
use crate::store::Store;
use log::debug;

/// Outcome of the top-up pass for one processed company.
///
/// Only companies with at least one active user produce an outcome; the
/// report renders these in the order they were produced.
#[derive(Debug, Clone)]
pub struct CompanyTopUp {
    pub company_id: i64,
    pub company_name: String,

    /// Credited users intended for email notification, in visit order.
    pub emailed: Vec<CreditedUser>,

    /// Remaining credited users, in visit order.
    pub not_emailed: Vec<CreditedUser>,

    /// Sum of credits applied for this company: `top_up` times the number
    /// of active users.
    pub total: i64,
}

/// One credited user with the balances on either side of the credit.
#[derive(Debug, Clone)]
pub struct CreditedUser {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub previous_tokens: i64,
    pub new_tokens: i64,
}

/// Runs the top-up pass over the whole store.
///
/// Within a company, the emailable users are credited first, then the
/// rest, both in active-set order (ascending last name). A company with
/// no active users is skipped entirely.
///
/// All reads and writes across all companies form one transaction. A
/// failure anywhere rolls back every credit of the run; a half-applied
/// pass would double-credit the already-updated users when retried.
pub fn run(store: &Store) -> Result<Vec<CompanyTopUp>> {
    store.with_transaction(|tx| {
        let mut outcomes = Vec::new();

        for company in tx.companies_by_id()? {
            let active = tx.active_users_of(company.id)?;
            if active.is_empty() {
                debug!("Company {} has no active users, skipping", company.id);
                continue;
            }

            let split = partition(&company, active);
            outcomes.push(credit_company(tx, &company, split)?);
        }

        Ok(outcomes)
    })
}

fn credit_company(store: &Store, company: &Company, split: Partition) -> Result<CompanyTopUp> {
    let mut outcome = CompanyTopUp {
        company_id: company.id,
        company_name: company.name.clone(),
        emailed: Vec::new(),
        not_emailed: Vec::new(),
        total: 0,
    };

    for user in split.emailable {
        let credited = credit_user(store, company, user, &mut outcome.total)?;
        outcome.emailed.push(credited);
    }

    for user in split.not_emailable {
        let credited = credit_user(store, company, user, &mut outcome.total)?;
        outcome.not_emailed.push(credited);
    }

    debug!(
        "Company {} ({}): topped up {} in total",
        company.id, company.name, outcome.total
    );
    Ok(outcome)
}

/// Applies one credit and persists the new balance.
fn credit_user(
    store: &Store,
    company: &Company,
    user: User,
    total: &mut i64,
) -> Result<CreditedUser> {
    let previous_tokens = user.tokens;
    let new_tokens = previous_tokens + company.top_up;

    store.update_tokens(user.id, new_tokens)?;
    *total += company.top_up;

    debug!(
        "Credited {} to user {} ({} -> {})",
        company.top_up, user.id, previous_tokens, new_tokens
    );

    Ok(CreditedUser {
        last_name: user.last_name,
        first_name: user.first_name,
        email: user.email,
        previous_tokens,
        new_tokens,
    })
}
