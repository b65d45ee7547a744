//! Domain model for culturally-tagged personal names.
//!
//! # Responsibility
//! - Define the name record shared by repository, importer and CLI.
//! - Own the text codes used for gender/component tags at rest.
//!
//! # Invariants
//! - A persisted record is identified by a store-assigned `NameId`.
//! - Records are read-mostly reference data; nothing here updates or deletes.

pub mod person_name;
