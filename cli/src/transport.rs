//! Blocking HTTP transport backed by ureq.

use clientes_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use tracing::debug;

/// Executes requests with a shared ureq agent. Non-2xx statuses come back as
/// responses so the core decides what they mean.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = req.path.as_str();
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => self.agent.get(path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(path).send_empty(),
        };
        let mut response = result.map_err(|e| {
            debug!(method = %req.method, path, error = %e, "transport failure");
            TransportError::new(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(format!("could not read response body: {e}")))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
