//! Service layer entry points.
//!
//! # Responsibility
//! - Expose use-case-level APIs on top of the repository layer.
//! - Keep business orchestration independent from SQL details.

pub mod name_service;
