//! HTTP client for the external decision server.
//!
//! The server exposes three endpoints:
//!
//! - `POST /GetInstruction` -- a world snapshot in, one agent command out
//! - `GET  /health` -- liveness probe
//! - `POST /UpdateGameState` -- fire-and-forget world-state push
//!
//! Transport failures are recoverable by design: the caller aborts the
//! affected decision request and retries, and the simulation clock is
//! never left paused past the outstanding-request count.

use std::time::Duration;

use outpost_types::AgentCommand;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::EngineError;

/// Per-request timeout for the decision endpoints.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A handle to the decision server. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DecisionClient {
    http: reqwest::Client,
    base_url: String,
}

impl DecisionClient {
    /// Create a client for the server at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Ask the server for one agent's next command.
    pub async fn get_instruction(&self, payload: &Value) -> Result<AgentCommand, EngineError> {
        let url = format!("{}/GetInstruction", self.base_url);
        let response = self.http.post(&url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Protocol {
                message: format!("GetInstruction returned {status}"),
            });
        }
        let body = response.text().await?;
        let command: AgentCommand =
            serde_json::from_str(&body).map_err(|err| EngineError::Protocol {
                message: format!("unparsable command: {err}"),
            })?;
        debug!(character = %command.character_name, kind = ?command.command_type, "command received");
        Ok(command)
    }

    /// Probe the server's liveness endpoint.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                warn!(%err, "health probe failed");
                false
            }
        }
    }

    /// Push the current world state, ignoring the outcome.
    pub async fn push_game_state(&self, payload: &Value) {
        let url = format!("{}/UpdateGameState", self.base_url);
        if let Err(err) = self.http.post(&url).json(payload).send().await {
            debug!(%err, "game state push dropped");
        }
    }
}
