//! Auth types shared across Staffdesk crates.
//!
//! Provides session-token claims, the shared JWT validation routine, and
//! bearer-header parsing.

pub mod bearer;
pub mod token;
