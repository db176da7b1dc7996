//! Stateless HTTP request builder and response parser for the customers API.
//!
//! # Design
//! `CustomerClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Any 2xx status counts as success; the API is not required
//! to answer creates with 201 or deletes with 204.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Customer, CustomerId, CustomerInput};

const COLLECTION: &str = "clientes";

/// Bytes escaped so an id always stays one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Synchronous, stateless client for the customers API.
#[derive(Debug, Clone)]
pub struct CustomerClient {
    base_url: String,
}

impl CustomerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{COLLECTION}", self.base_url)
    }

    fn record_url(&self, id: &CustomerId) -> String {
        let segment = utf8_percent_encode(id.as_str(), PATH_SEGMENT);
        format!("{}/{COLLECTION}/{segment}", self.base_url)
    }

    pub fn build_list_customers(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_customer(&self, id: &CustomerId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.record_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_customer(&self, input: &CustomerInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_update_customer(
        &self,
        id: &CustomerId,
        input: &CustomerInput,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.record_url(id),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_delete_customer(&self, id: &CustomerId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.record_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_customers(&self, response: HttpResponse) -> Result<Vec<Customer>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// Any non-2xx answer to a lookup means "not found" to the caller.
    pub fn parse_get_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        if !response.is_success() {
            debug!(status = response.status, "lookup rejected");
            return Err(ApiError::NotFound);
        }
        from_json(&response.body)
    }

    /// Create and update only need a 2xx; bodies are ignored because the
    /// list is refetched afterwards.
    pub fn parse_create_customer(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_update_customer(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_customer(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json(input: &CustomerInput) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
