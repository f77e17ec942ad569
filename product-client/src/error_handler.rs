//! Pluggable handling of failed responses.
//!
//! `ProductClient` asks its handler whether a status is an error and, if so,
//! lets it translate the buffered response into a `ClientError`. The handler
//! is never consulted for the body of a successful response.

use crate::error::{ClientError, RestServiceError};
use crate::http::{reason_phrase, HttpResponse};

pub trait ResponseErrorHandler: Send + Sync {
    fn has_error(&self, status: u16) -> bool {
        !(200..300).contains(&status)
    }

    fn handle_error(&self, response: &HttpResponse) -> ClientError;
}

/// 404 becomes `NotFound`; any other failure keeps its raw status and body.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ResponseErrorHandler for DefaultErrorHandler {
    fn handle_error(&self, response: &HttpResponse) -> ClientError {
        if response.status == 404 {
            return ClientError::NotFound;
        }
        ClientError::HttpError {
            status: response.status,
            body: response.body.clone(),
        }
    }
}

/// Attributes every failure to a named remote service.
#[derive(Debug, Clone)]
pub struct ServiceErrorHandler {
    service_name: String,
}

impl ServiceErrorHandler {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl ResponseErrorHandler for ServiceErrorHandler {
    fn handle_error(&self, response: &HttpResponse) -> ClientError {
        let body = response.body.trim();
        let error = if body.is_empty() {
            reason_phrase(response.status).to_string()
        } else {
            body.to_string()
        };
        ClientError::Service(RestServiceError {
            status: response.status,
            error,
            service_name: self.service_name.clone(),
        })
    }
}

impl<F> ResponseErrorHandler for F
where
    F: Fn(&HttpResponse) -> ClientError + Send + Sync,
{
    fn handle_error(&self, response: &HttpResponse) -> ClientError {
        self(response)
    }
}
