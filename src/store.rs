//! SQLite-backed record store for companies and users.
//!
//! The store owns all persisted state. It is handed explicitly to the
//! loader and the engine; there is no process-wide connection. Both tables
//! are created at open time. Transactions use a closure API that commits on
//! `Ok` and rolls back on `Err`, which keeps the all-or-nothing boundary in
//! the caller's hands.

use crate::error::Result;
use crate::model::{Company, User};
use crate::record::{NewCompany, NewUser};
use rusqlite::{params, Connection};

/// Connection wrapper with the schema applied.
///
/// Intentionally not `Clone`: a run holds exactly one handle and passes it
/// by reference into each component.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) a database file at `path` and applies the schema.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens a fresh in-memory database. This is the default for a
    /// single-shot batch run.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS companies (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                top_up INTEGER NOT NULL,
                email_status INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                company_id INTEGER NOT NULL,
                email_status INTEGER NOT NULL,
                active_status INTEGER NOT NULL,
                tokens INTEGER NOT NULL,
                UNIQUE (company_id, email)
            )",
            [],
        )?;

        Ok(())
    }

    /// Executes a closure within a transaction.
    ///
    /// Commits on `Ok`, rolls back on `Err`. A rollback failure is ignored
    /// in favor of the causing error.
    pub fn with_transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Store) -> Result<T>,
    {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }

    /// Inserts a company using the caller-provided id verbatim.
    ///
    /// A duplicate id violates the primary key and surfaces as a
    /// constraint error.
    pub fn insert_company(&self, company: &NewCompany) -> Result<()> {
        self.conn.execute(
            "INSERT INTO companies (id, name, top_up, email_status)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                company.id,
                company.name,
                company.top_up,
                company.email_status,
            ],
        )?;
        Ok(())
    }

    /// Inserts a user and returns the store-assigned id.
    ///
    /// A duplicate `(company_id, email)` pair violates the uniqueness
    /// constraint and surfaces as a constraint error.
    pub fn insert_user(&self, user: &NewUser) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO users
             (first_name, last_name, email, company_id, email_status, active_status, tokens)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.first_name,
                user.last_name,
                user.email,
                user.company_id,
                user.email_status,
                user.active_status,
                user.tokens,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All companies in ascending id order. This ordering is authoritative
    /// for the top-up pass and the report.
    pub fn companies_by_id(&self) -> Result<Vec<Company>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, top_up, email_status
             FROM companies
             ORDER BY id ASC",
        )?;

        let companies = stmt
            .query_map([], |row| {
                Ok(Company {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    top_up: row.get(2)?,
                    email_status: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(companies)
    }

    /// Active users of a company, ascending by last name.
    ///
    /// Ties break on id, which is insertion order. This single query is the
    /// only place the active-user ordering is defined.
    pub fn active_users_of(&self, company_id: i64) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, email, company_id, email_status, active_status, tokens
             FROM users
             WHERE company_id = ?1 AND active_status = 1
             ORDER BY last_name ASC, id ASC",
        )?;

        let users = stmt
            .query_map([company_id], |row| {
                Ok(User {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    email: row.get(3)?,
                    company_id: row.get(4)?,
                    email_status: row.get(5)?,
                    active_status: row.get(6)?,
                    tokens: row.get(7)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Persists a user's new token balance.
    pub fn update_tokens(&self, user_id: i64, tokens: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET tokens = ?1 WHERE id = ?2",
            params![tokens, user_id],
        )?;
        Ok(())
    }

    /// Number of persisted companies.
    pub fn company_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Number of persisted users.
    pub fn user_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn new_company(id: i64, name: &str) -> NewCompany {
        NewCompany {
            id,
            name: name.to_string(),
            top_up: 10,
            email_status: true,
        }
    }

    fn new_user(company_id: i64, last: &str, email: &str) -> NewUser {
        NewUser {
            first_name: "Test".to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            company_id,
            email_status: true,
            active_status: true,
            tokens: 0,
        }
    }

    #[test]
    fn test_companies_ordered_by_id() {
        let store = Store::open_in_memory().unwrap();
        store.insert_company(&new_company(3, "C")).unwrap();
        store.insert_company(&new_company(1, "A")).unwrap();
        store.insert_company(&new_company(2, "B")).unwrap();

        let ids: Vec<i64> = store
            .companies_by_id()
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_company_id_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        store.insert_company(&new_company(1, "A")).unwrap();

        let err = store.insert_company(&new_company(1, "B")).unwrap_err();
        assert!(matches!(err, EngineError::Db(_)));
    }

    #[test]
    fn test_duplicate_company_email_pair_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        store.insert_company(&new_company(1, "A")).unwrap();
        store.insert_user(&new_user(1, "Lee", "a@x.test")).unwrap();

        let err = store
            .insert_user(&new_user(1, "Ng", "a@x.test"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Db(_)));

        // Same email under another company is fine.
        store.insert_company(&new_company(2, "B")).unwrap();
        store.insert_user(&new_user(2, "Ng", "a@x.test")).unwrap();
    }

    #[test]
    fn test_user_ids_are_store_assigned_in_insertion_order() {
        let store = Store::open_in_memory().unwrap();
        store.insert_company(&new_company(1, "A")).unwrap();

        let first = store.insert_user(&new_user(1, "Lee", "a@x.test")).unwrap();
        let second = store.insert_user(&new_user(1, "Ng", "b@x.test")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_active_users_sorted_by_last_name_then_insertion() {
        let store = Store::open_in_memory().unwrap();
        store.insert_company(&new_company(1, "A")).unwrap();
        store.insert_user(&new_user(1, "Ng", "ng@x.test")).unwrap();
        store.insert_user(&new_user(1, "Lee", "lee1@x.test")).unwrap();
        store.insert_user(&new_user(1, "Lee", "lee2@x.test")).unwrap();

        let mut inactive = new_user(1, "Aa", "aa@x.test");
        inactive.active_status = false;
        store.insert_user(&inactive).unwrap();

        let users = store.active_users_of(1).unwrap();
        let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["lee1@x.test", "lee2@x.test", "ng@x.test"]);
    }

    #[test]
    fn test_update_tokens_persists() {
        let store = Store::open_in_memory().unwrap();
        store.insert_company(&new_company(1, "A")).unwrap();
        let id = store.insert_user(&new_user(1, "Lee", "a@x.test")).unwrap();

        store.update_tokens(id, 42).unwrap();
        assert_eq!(store.active_users_of(1).unwrap()[0].tokens, 42);
    }

    #[test]
    fn test_transaction_commits_on_ok() {
        let store = Store::open_in_memory().unwrap();
        store
            .with_transaction(|s| s.insert_company(&new_company(1, "A")))
            .unwrap();
        assert_eq!(store.company_count().unwrap(), 1);
    }

    #[test]
    fn test_transaction_rolls_back_on_err() {
        let store = Store::open_in_memory().unwrap();
        let result = store.with_transaction(|s| {
            s.insert_company(&new_company(1, "A"))?;
            s.insert_company(&new_company(1, "B"))
        });

        assert!(result.is_err());
        assert_eq!(store.company_count().unwrap(), 0);
    }

    #[test]
    fn test_transaction_rolls_back_updates_on_err() {
        let store = Store::open_in_memory().unwrap();
        store.insert_company(&new_company(1, "A")).unwrap();
        let id = store.insert_user(&new_user(1, "Lee", "a@x.test")).unwrap();

        let result: Result<()> = store.with_transaction(|s| {
            s.update_tokens(id, 99)?;
            Err(EngineError::MissingArgument)
        });

        assert!(result.is_err());
        assert_eq!(store.active_users_of(1).unwrap()[0].tokens, 0);
    }
}
