//! Network messages - communication between App and Network layers

use crate::network::routes::{ApiCall, Operation};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Execute a roster API call
    Execute { id: u64, call: ApiCall },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    /// 2xx response
    Success {
        id: u64,
        operation: Operation,
        status: u16,
        body: String,
        time_ms: u64,
    },
    /// Non-2xx response or transport fault
    Error {
        id: u64,
        operation: Operation,
        status: Option<u16>,
        /// Response body, absent for transport faults
        payload: Option<String>,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            NetworkResponse::Success { operation, .. } => *operation,
            NetworkResponse::Error { operation, .. } => *operation,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkResponse::Success { status, .. } => Some(*status),
            NetworkResponse::Error { status, .. } => *status,
        }
    }

    pub fn time_ms(&self) -> u64 {
        match self {
            NetworkResponse::Success { time_ms, .. } => *time_ms,
            NetworkResponse::Error { time_ms, .. } => *time_ms,
        }
    }
}
