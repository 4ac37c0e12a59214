//! Top-Up Engine CLI
//!
//! Seeds companies and users from JSON files into SQLite, applies the
//! per-company token top-up, and prints the report to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- companies.json users.json
//! ```
//!
//! A third argument selects an on-disk database instead of the default
//! in-memory one.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;
use topup_engine::record::{CompanyRecord, UserRecord};
use topup_engine::{engine, loader, report, EngineError, Result, Store};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(EngineError::MissingArgument);
    }

    let companies: Vec<CompanyRecord> = read_json(&args[1])?;
    let users: Vec<UserRecord> = read_json(&args[2])?;

    let store = match args.get(3) {
        Some(path) => Store::open(path)?,
        None => Store::open_in_memory()?,
    };

    loader::seed(&store, &companies, &users)?;
    let outcomes = engine::run(&store)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    report::write_report(&outcomes, handle)?;

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<Vec<T>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
