//! Core domain concepts shared across all subdomains.
//!
//! - [`session_id::SessionId`]: identifier of a demo session
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod session_id;
