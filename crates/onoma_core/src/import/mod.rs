//! Bulk import of name records from delimited text.
//!
//! # Responsibility
//! - Turn `;`-separated lines into `PersonName` drafts.
//! - Report the first bad line with its 1-based number.
//!
//! # Invariants
//! - Parsing is all-or-nothing; a single bad line rejects the whole input.

pub mod delimited;
