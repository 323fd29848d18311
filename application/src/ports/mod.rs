//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! Persistence ports live in the domain crate as repository traits.

pub mod ai_responder;
