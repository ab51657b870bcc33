//! Network actor - runs roster API calls in the Tokio async runtime

use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{ApiClient, ApiError};
use crate::network::routes::ApiCall;

/// Network actor that executes API calls concurrently
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { id, call }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                let result = execute_call(&client, id, call).await;
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }

        self.active_requests.abort_all();
    }
}

/// Execute one call and turn the outcome into a `NetworkResponse`
pub async fn execute_call(client: &ApiClient, id: u64, call: ApiCall) -> NetworkResponse {
    let operation = call.operation();
    let route = call.route();
    tracing::info!(id, method = %route.method, path = %route.path(), "Executing request");

    let start = Instant::now();
    let result = client.execute(&call).await;
    let time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(resp) => {
            tracing::info!(id, status = resp.status, time_ms, "Request completed");
            NetworkResponse::Success {
                id,
                operation,
                status: resp.status,
                body: resp.body,
                time_ms,
            }
        }
        Err(e) => {
            let message = match &e {
                ApiError::Transport(inner) if inner.is_timeout() => "Request timed out".to_string(),
                ApiError::Transport(inner) if inner.is_connect() => {
                    format!("Connection failed: {}", inner)
                }
                other => other.to_string(),
            };
            tracing::warn!(id, status = ?e.status(), time_ms, error = %message, "Request failed");
            NetworkResponse::Error {
                id,
                operation,
                status: e.status(),
                payload: e.payload().map(str::to_string),
                message,
                time_ms,
            }
        }
    }
}
