//! Crash Reporter — PostgreSQL persistence for crash records.

pub mod pg_crash_store;

pub use pg_crash_store::PgCrashStore;
