//! API Module
//!
//! HTTP handlers and routing for the key-value service.
//!
//! # Endpoints
//! - `GET /get?key=K`, `GET /get/:key` - Read through the cache
//! - `PUT /set`, `POST /set?key=K&value=V` - Write to the store and cache
//! - `GET /stats` - Call metrics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
