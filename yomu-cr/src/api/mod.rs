//! HTTP API handlers for yomu-cr
//!
//! The resolver is consumed by the other yomu services over HTTP REST:
//! the tracker posts identities to `/resolve`, the UI reads merged
//! records from `/comic/:slug`.

pub mod health;
pub mod resolve;

pub use health::health_routes;
pub use resolve::resolve_routes;
