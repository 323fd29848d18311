//! Command domain
//!
//! Validation, classification and the rule-based policy table for
//! incoming voice commands.

pub mod routing;
pub mod rules;
pub mod value_objects;
