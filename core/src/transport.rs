//! The seam where the host performs network I/O.
//!
//! The core never opens a socket. A session hands each `HttpRequest` to its
//! `Transport` and gets back either a response (any status) or a
//! `TransportError` when no response arrived. Closures implement the trait,
//! which is how tests script the remote side.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> Transport for F
where
    F: FnMut(&HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}
