//! Service plumbing shared across Staffdesk services.
//!
//! Health handlers, request-id middleware, tracing setup, and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
