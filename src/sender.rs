//! HTTP delivery to the visualizer API.
//!
//! One blocking POST per round: the rendered dump goes to
//! `<base-url>/api/ospf-poll` as `text/plain`, and the visualizer answers
//! with a small JSON body whose `size` field is used only for logging.
//! Failures are recoverable: the runner logs them and moves on.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

/// How long to wait for the visualizer before giving up on a round
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How much of an error body to keep when logging an HTTP failure
const ERROR_BODY_LIMIT: usize = 200;

/// Errors from one delivery attempt. Both kinds are non-fatal to the loop.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("HTTP Error {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Successful poll response; the visualizer reports how many bytes it took
#[derive(Debug, Deserialize)]
pub struct PollResponse {
    pub size: Option<u64>,
}

impl PollResponse {
    /// Size for logging, "?" when the response omitted it
    pub fn size_label(&self) -> String {
        match self.size {
            Some(size) => size.to_string(),
            None => "?".to_string(),
        }
    }
}

/// Join the base URL with the poll endpoint path
fn endpoint_url(base_url: &str) -> String {
    format!("{}/api/ospf-poll", base_url.trim_end_matches('/'))
}

/// Blocking sender bound to one visualizer instance
pub struct OspfSender {
    client: Client,
    endpoint: String,
}

impl OspfSender {
    /// Build a sender for the given visualizer base URL
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint_url(base_url),
        })
    }

    /// The resolved poll endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one rendered dump. Returns the response status and parsed poll
    /// response, or the failure classified as HTTP-status vs transport.
    pub fn send(&self, ospf_text: &str) -> Result<(StatusCode, PollResponse), SendError> {
        debug!("POSTing {} bytes to {}", ospf_text.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/plain")
            .body(ospf_text.to_string())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            // Keep the log line bounded; truncate on a char boundary
            let body: String = response
                .text()
                .unwrap_or_default()
                .chars()
                .take(ERROR_BODY_LIMIT)
                .collect();
            return Err(SendError::Status { status, body });
        }

        Ok((status, response.json::<PollResponse>()?))
    }
}
