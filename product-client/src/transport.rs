//! Execution of `HttpRequest`s.
//!
//! A `Transport` returns the status and headers of a response with the body
//! still unread, so callers can stream it somewhere instead of buffering it.
//! `UreqTransport` is the network implementation; tests substitute their own.

use std::fmt;
use std::io::Read;
use std::time::Duration;

use ureq::typestate::{WithBody, WithoutBody};
use ureq::RequestBuilder;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<StreamingResponse, ClientError>;
}

/// A response whose body has not been read yet.
pub struct StreamingResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read>,
}

impl StreamingResponse {
    /// Read the whole body into memory. Invalid UTF-8 is replaced rather than
    /// rejected so a failed status still reaches the error handler.
    pub fn into_buffered(mut self) -> Result<HttpResponse, ClientError> {
        let mut bytes = Vec::new();
        self.body.read_to_end(&mut bytes)?;
        Ok(HttpResponse {
            status: self.status,
            headers: self.headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

impl fmt::Debug for StreamingResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Blocking transport over a shared `ureq::Agent`.
///
/// Status codes are never turned into errors here; interpreting them is the
/// job of the client's `ResponseErrorHandler`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl UreqTransport {
    /// `None` leaves the corresponding timeout unset.
    pub fn new(connect_timeout: Option<Duration>, read_timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(connect_timeout)
            .timeout_recv_response(read_timeout)
            .timeout_recv_body(read_timeout)
            .build()
            .new_agent();
        Self { agent }
    }

    fn send(&self, request: &HttpRequest) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        let url = request.path.as_str();
        let body = request.body.as_deref();
        let headers = request.headers.as_slice();
        match request.method {
            HttpMethod::Get => send_unexpected_body(with_headers(self.agent.get(url), headers), body),
            HttpMethod::Head => send_unexpected_body(with_headers(self.agent.head(url), headers), body),
            HttpMethod::Delete => {
                send_unexpected_body(with_headers(self.agent.delete(url), headers), body)
            }
            HttpMethod::Options => {
                send_unexpected_body(with_headers(self.agent.options(url), headers), body)
            }
            HttpMethod::Post => send_body(with_headers(self.agent.post(url), headers), body),
            HttpMethod::Put => send_body(with_headers(self.agent.put(url), headers), body),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<StreamingResponse, ClientError> {
        let response = self.send(request).map_err(|e| match e {
            ureq::Error::Timeout(_) => ClientError::Timeout(e.to_string()),
            other => ClientError::Transport(other.to_string()),
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        Ok(StreamingResponse {
            status,
            headers,
            body: Box::new(response.into_body().into_reader()),
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_body(
    builder: RequestBuilder<WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

/// GET, HEAD, DELETE and OPTIONS normally carry no body; send one anyway
/// when the request has it.
fn send_unexpected_body(
    builder: RequestBuilder<WithoutBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.force_send_body().send(body.as_bytes()),
        None => builder.call(),
    }
}
