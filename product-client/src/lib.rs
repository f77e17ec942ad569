//! Blocking client for the product API.
//!
//! # Overview
//! `ProductClient` demonstrates the common shapes of REST interaction against
//! the product service: raw and typed GETs, HEAD and OPTIONS, POST returning a
//! body, a full response or a location, PUT and DELETE with bodies, form
//! submission, XML content negotiation, and streaming a response body to disk.
//!
//! # Design
//! - Requests are built as plain `HttpRequest` data and executed by a
//!   pluggable `Transport` (`UreqTransport` in production).
//! - Failed statuses go through a pluggable `ResponseErrorHandler`, which
//!   turns them into a `ClientError`. Transport failures never reach it.
//! - `MediaType` selects the serialization strategy per request.
//! - DTOs are defined independently from the server crate; integration tests
//!   catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod error_handler;
pub mod format;
pub mod http;
pub mod transport;
pub mod types;

pub use client::ProductClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, RestServiceError};
pub use error_handler::{DefaultErrorHandler, ResponseErrorHandler, ServiceErrorHandler};
pub use format::MediaType;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{StreamingResponse, Transport, UreqTransport};
pub use types::{CreatedProduct, Product, ProductForm};
