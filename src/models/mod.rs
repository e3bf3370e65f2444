//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, plus the
//! pushed subscription event payload.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AssignRequest, SetRequest};
pub use responses::{
    ClientIdResponse, ErrorResponse, GetResponse, HealthResponse, SetResponse, UpdateEvent,
};
