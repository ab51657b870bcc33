//! Network layer - roster API routes and HTTP execution
//!
//! The Network actor receives API commands and sends back responses.

pub mod actor;
pub mod client;
pub mod routes;

pub use actor::NetworkActor;
pub use client::{ApiClient, ApiError, ApiResponse};
pub use routes::{ApiCall, Operation};
