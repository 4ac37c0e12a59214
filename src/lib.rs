//! # Top-Up Engine
//!
//! A batch ledger processor that seeds companies and users into a SQLite
//! store and applies a per-company token top-up to every active user.
//!
//! ## Design Principles
//!
//! - **All-or-nothing persistence**: ingestion is one transaction, the
//!   top-up pass is another; a failure in either rolls back completely
//! - **Deterministic ordering**: companies ascending by id, users
//!   ascending by last name with insertion order breaking ties
//! - **Emailable first**: notification-eligible users are credited and
//!   reported before the rest of a company's active users
//!
//! ## Example
//!
//! ```no_run
//! use topup_engine::record::{CompanyRecord, UserRecord};
//! use topup_engine::{engine, loader, report, Store};
//!
//! let companies: Vec<CompanyRecord> =
//!     serde_json::from_str(r#"[{"id":1,"name":"Acme","top_up":10,"email_status":true}]"#)
//!         .unwrap();
//! let users: Vec<UserRecord> = serde_json::from_str("[]").unwrap();
//!
//! let store = Store::open_in_memory().unwrap();
//! loader::seed(&store, &companies, &users).unwrap();
//! let outcomes = engine::run(&store).unwrap();
//! report::write_report(&outcomes, std::io::stdout()).unwrap();
//! ```

pub mod eligibility;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod record;
pub mod report;
pub mod store;

pub use engine::{CompanyTopUp, CreditedUser};
pub use error::{EngineError, Result};
pub use store::Store;
