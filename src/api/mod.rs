//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /client-id` - Assign a process-unique client id
//! - `PUT /items` - Store a value under a composite key
//! - `POST /assign` - Store via the textual assignment form
//! - `GET /items/:key` - Retrieve a value by composed key
//! - `GET /subscribe/:key` - SSE stream of updates to a key
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
