//! Partitioning of a company's active users into emailable and
//! not-emailable subsets.

use crate::model::{Company, User};

/// The two disjoint, order-preserving subsets of a company's active users.
///
/// Together they cover the active-user set exactly; a user appears in one
/// of the two, never both. Iteration order is the active-set order
/// (ascending last name, insertion order on ties).
#[derive(Debug, Default)]
pub struct Partition {
    /// Active users eligible for email notification: the company flag and
    /// the user flag are both set.
    pub emailable: Vec<User>,

    /// Every other active user.
    pub not_emailable: Vec<User>,
}

/// Splits `active_users` per the company- and user-level email flags.
///
/// `active_users` must already be the company's active set in its
/// authoritative order; the split preserves that order within each subset.
/// When `company.email_status` is false the emailable subset is empty.
pub fn partition(company: &Company, active_users: Vec<User>) -> Partition {
    let mut split = Partition::default();

    for user in active_users {
        if user.is_emailable_for(company) {
            split.emailable.push(user);
        } else {
            split.not_emailable.push(user);
        }
    }

    split
}
