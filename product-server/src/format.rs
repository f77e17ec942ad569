//! Response format negotiation.
//!
//! The representation is chosen from the request's `Accept` header: XML when
//! the client explicitly asks for it, JSON for everything else.

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::ApiError;

const APPLICATION_JSON: &str = "application/json";
const APPLICATION_XML: &str = "application/xml";
const TEXT_XML: &str = "text/xml";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    pub fn from_accept(headers: &HeaderMap) -> Self {
        let wants_xml = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .map(|range| range.split(';').next().unwrap_or("").trim())
            .any(|media| media.eq_ignore_ascii_case(APPLICATION_XML) || media.eq_ignore_ascii_case(TEXT_XML));
        if wants_xml {
            Format::Xml
        } else {
            Format::Json
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => APPLICATION_JSON,
            Format::Xml => APPLICATION_XML,
        }
    }

    pub fn encode<T: Serialize>(self, value: &T) -> Result<String, ApiError> {
        match self {
            Format::Json => serde_json::to_string(value).map_err(|e| ApiError::Encoding(e.to_string())),
            Format::Xml => quick_xml::se::to_string(value).map_err(|e| ApiError::Encoding(e.to_string())),
        }
    }

    /// Encode `value` and wrap it in a response with the matching
    /// `Content-Type`.
    pub fn respond<T: Serialize>(self, value: &T) -> Result<Response, ApiError> {
        let body = self.encode(value)?;
        Ok((
            [(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type()))],
            body,
        )
            .into_response())
    }
}
