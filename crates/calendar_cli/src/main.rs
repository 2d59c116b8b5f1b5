//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `calendar_core` linkage.
//! - Boot the store stack once against SQLite and report the outcome.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `calendar_cli [DB_PATH]`; without a path an in-memory database is
//! used.

use calendar_core::db::{open_db, open_db_in_memory};
use calendar_core::{AppearanceHub, RootStore, SqliteKeyValueStorage};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    // Keep a tiny CLI entry point to validate core crate wiring independently
    // from Flutter/FFI runtime setup.
    println!("calendar_core ping={}", calendar_core::ping());
    println!("calendar_core version={}", calendar_core::core_version());

    let conn = match std::env::args().nth(1) {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match conn {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("calendar_core db=error {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut store = RootStore::new(
        SqliteKeyValueStorage::new(&conn),
        Arc::new(AppearanceHub::new(None)),
    );
    if let Err(err) = store.initialize_app(None) {
        eprintln!("calendar_core init=error {err}");
        return ExitCode::FAILURE;
    }

    println!("calendar_core init=ok");
    println!("calendar_core events={}", store.events().events().len());
    println!(
        "calendar_core theme={} dark={}",
        store.theme().theme_mode().as_str(),
        store.theme().is_dark()
    );
    ExitCode::SUCCESS
}
