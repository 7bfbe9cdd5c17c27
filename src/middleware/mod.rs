//! Cross-cutting request/response concerns.
//!
//! Plain functions called from [`Router::handle`](crate::Router::handle):
//!
//! - [`cors`]: preflight answers and the allow-origin header
//! - [`trace`]: one structured access-log event per request

pub mod cors;
pub mod trace;
