//! # HTTP Layer
//!
//! Request pipeline: API key gate, route handlers, error mapping, and the
//! server bootstrap.

pub mod auth;
pub mod bundle_routes;
pub mod errors;
pub mod price_routes;
pub mod response;
pub mod server;
