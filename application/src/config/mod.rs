//! Application-level configuration.
//!
//! - [`DispatchParams`]: input limits, context budget, AI token caps and timeout

pub mod dispatch_params;

pub use dispatch_params::DispatchParams;
