//! Blocking client for the product API.
//!
//! # Design
//! Every operation is split in two: a `build_*` method that produces an
//! `HttpRequest` as plain data, and an executing method that runs it through
//! the configured `Transport`, routes failed statuses to the
//! `ResponseErrorHandler`, and decodes the body with the `MediaType` the
//! request negotiated. Downloads skip buffering and copy the transport's body
//! reader straight into a file.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::error_handler::{DefaultErrorHandler, ResponseErrorHandler};
use crate::format::MediaType;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{CreatedProduct, Product, ProductForm};

#[derive(Clone)]
pub struct ProductClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    error_handler: Arc<dyn ResponseErrorHandler>,
}

impl ProductClient {
    /// Client over the network with no timeouts and the default error handler.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport: Arc::new(UreqTransport::default()),
            error_handler: Arc::new(DefaultErrorHandler),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url).with_transport(UreqTransport::new(
            config.connect_timeout,
            config.read_timeout,
        ))
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn with_error_handler(mut self, handler: impl ResponseErrorHandler + 'static) -> Self {
        self.error_handler = Arc::new(handler);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn request_with_body<T: serde::Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        media: MediaType,
        body: &T,
    ) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), media.mime().to_string())],
            body: Some(media.encode(body)?),
        })
    }

    // ---------------------------------------------------------------------
    // Request builders
    // ---------------------------------------------------------------------

    pub fn build_list_products(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.products_url())
    }

    pub fn build_product_headers(&self) -> HttpRequest {
        self.request(HttpMethod::Head, self.products_url())
    }

    pub fn build_allowed_methods(&self) -> HttpRequest {
        self.request(HttpMethod::Options, self.products_url())
    }

    pub fn build_get_product(&self, id: Uuid, accept: MediaType) -> HttpRequest {
        let mut request = self.request(HttpMethod::Get, format!("{}/{id}", self.products_url()));
        request
            .headers
            .push(("accept".to_string(), accept.mime().to_string()));
        request
    }

    pub fn build_create_product(&self, product: &Product) -> Result<HttpRequest, ClientError> {
        self.request_with_body(HttpMethod::Post, self.products_url(), MediaType::Json, product)
    }

    pub fn build_update_product(&self, product: &Product) -> Result<HttpRequest, ClientError> {
        self.request_with_body(HttpMethod::Put, self.products_url(), MediaType::Json, product)
    }

    pub fn build_delete_product(&self, product: &Product) -> Result<HttpRequest, ClientError> {
        self.request_with_body(HttpMethod::Delete, self.products_url(), MediaType::Json, product)
    }

    /// GET carrying `product` as a JSON body and accepting any representation.
    pub fn build_download_products(&self, product: &Product) -> Result<HttpRequest, ClientError> {
        let mut request =
            self.request_with_body(HttpMethod::Get, self.products_url(), MediaType::Json, product)?;
        request.headers.push((
            "accept".to_string(),
            MediaType::accept(&[MediaType::OctetStream, MediaType::Any]),
        ));
        Ok(request)
    }

    pub fn build_submit_product_form(&self, form: &ProductForm) -> Result<HttpRequest, ClientError> {
        self.request_with_body(
            HttpMethod::Post,
            format!("{}/form", self.products_url()),
            MediaType::FormUrlEncoded,
            form,
        )
    }

    pub fn build_product_with_error(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/error", self.products_url()))
    }

    // ---------------------------------------------------------------------
    // Execution
    // ---------------------------------------------------------------------

    /// Execute `request` and buffer the response. Failed statuses are handed
    /// to the error handler and come back as its error.
    pub fn exchange(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?.into_buffered()?;
        if self.error_handler.has_error(response.status) {
            warn!(status = response.status, path = %request.path, "request failed");
            return Err(self.error_handler.handle_error(&response));
        }
        Ok(response)
    }

    /// Execute `request` and copy the response body into `path` as it
    /// arrives. The body lands in a temporary file next to `path`, which only
    /// replaces `path` once the whole body has been written.
    pub fn execute_to_file(
        &self,
        request: &HttpRequest,
        path: impl AsRef<Path>,
    ) -> Result<u64, ClientError> {
        let path = path.as_ref();
        let mut response = self.transport.execute(request)?;
        if self.error_handler.has_error(response.status) {
            warn!(status = response.status, path = %request.path, "download failed");
            let buffered = response.into_buffered()?;
            return Err(self.error_handler.handle_error(&buffered));
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        let written = io::copy(&mut response.body, &mut file)?;
        file.flush()?;
        file.persist(path).map_err(|e| e.error)?;
        info!(bytes = written, file = %path.display(), "response body saved");
        Ok(written)
    }

    // ---------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------

    /// The product list as raw JSON text.
    pub fn get_products_as_json(&self) -> Result<String, ClientError> {
        let response = self.exchange(&self.build_list_products())?;
        info!(status = response.status, "status code");
        info!(body = %response.body, "result as json");
        Ok(response.body)
    }

    pub fn get_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self.exchange(&self.build_list_products())?;
        let products: Vec<Product> = MediaType::Json.decode(&response.body)?;
        info!(status = response.status, count = products.len(), "products fetched");
        Ok(products)
    }

    pub fn get_headers(&self) -> Result<Vec<(String, String)>, ClientError> {
        let response = self.exchange(&self.build_product_headers())?;
        info!(headers = ?response.headers, "headers");
        Ok(response.headers)
    }

    /// Methods listed in the `Allow` header; unknown tokens are skipped.
    pub fn allowed_methods(&self) -> Result<Vec<HttpMethod>, ClientError> {
        let response = self.exchange(&self.build_allowed_methods())?;
        let methods: Vec<HttpMethod> = response
            .header("allow")
            .map(|allow| allow.split(',').filter_map(|m| m.parse().ok()).collect())
            .unwrap_or_default();
        info!(?methods, "allowed options");
        Ok(methods)
    }

    pub fn get_product(&self, id: Uuid) -> Result<Product, ClientError> {
        let response = self.exchange(&self.build_get_product(id, MediaType::Json))?;
        MediaType::Json.decode(&response.body)
    }

    pub fn get_product_as_xml(&self, id: Uuid) -> Result<Product, ClientError> {
        let response = self.exchange(&self.build_get_product(id, MediaType::Xml))?;
        debug!(body = %response.body, "product as xml");
        MediaType::Xml.decode(&response.body)
    }

    pub fn create_product(&self, product: &Product) -> Result<CreatedProduct, ClientError> {
        let response = self.exchange(&self.build_create_product(product)?)?;
        let created: CreatedProduct = MediaType::Json.decode(&response.body)?;
        info!(product_id = %created.product_id, "product created");
        Ok(created)
    }

    /// Create `product` and return the whole response: status, headers and
    /// body.
    pub fn create_product_with_exchange(&self, product: &Product) -> Result<HttpResponse, ClientError> {
        let response = self.exchange(&self.build_create_product(product)?)?;
        info!(status = response.status, body = %response.body, "product created with exchange");
        Ok(response)
    }

    /// Create `product` and return only its location, made absolute against
    /// the base URL.
    pub fn create_product_with_location(&self, product: &Product) -> Result<Option<String>, ClientError> {
        let response = self.exchange(&self.build_create_product(product)?)?;
        let location = response.header("location").map(|location| {
            if location.starts_with('/') {
                format!("{}{location}", self.base_url)
            } else {
                location.to_string()
            }
        });
        info!(?location, "the location");
        Ok(location)
    }

    pub fn update_product(&self, product: &Product) -> Result<(), ClientError> {
        self.exchange(&self.build_update_product(product)?)?;
        info!(product_id = %product.id, "product updated");
        Ok(())
    }

    pub fn delete_product(&self, product: &Product) -> Result<(), ClientError> {
        self.exchange(&self.build_delete_product(product)?)?;
        info!(product_id = %product.id, "product deleted");
        Ok(())
    }

    /// Stream the product listing into `path`, returning the bytes written.
    pub fn download_products(
        &self,
        product: &Product,
        path: impl AsRef<Path>,
    ) -> Result<u64, ClientError> {
        self.execute_to_file(&self.build_download_products(product)?, path)
    }

    pub fn submit_product_form(&self, form: &ProductForm) -> Result<CreatedProduct, ClientError> {
        let response = self.exchange(&self.build_submit_product_form(form)?)?;
        info!(body = %response.body, "form submitted");
        MediaType::Json.decode(&response.body)
    }

    /// Fetch from the endpoint that always fails, so the configured error
    /// handler decides what the caller sees.
    pub fn get_product_with_error(&self) -> Result<Product, ClientError> {
        let response = self.exchange(&self.build_product_with_error())?;
        MediaType::Json.decode(&response.body)
    }
}
