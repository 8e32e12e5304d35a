//! Client-side auth session for Staffdesk frontends.
//!
//! Holds the authenticated-user state a dashboard needs between requests:
//! restore on boot, login with a freshly issued token, logout. Token storage
//! and server verification are injected ports so hosts (native UI, tests)
//! decide where tokens live and how the backend is reached.

pub mod http;
pub mod session;
