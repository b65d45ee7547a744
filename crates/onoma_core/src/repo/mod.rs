//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for name records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every value reaching SQL is a bound parameter.
//! - Lookups distinguish "not found" (`Ok(None)`) from store errors (`Err`).

pub mod name_repo;
