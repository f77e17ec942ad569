//! Client operations against the live product server.
//!
//! # Design
//! Starts the server on a random port, then exercises every client operation
//! over real HTTP. Validates that request building, the ureq transport, error
//! handling and decoding work end-to-end with the actual server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use product_client::{
    ClientError, DefaultErrorHandler, HttpMethod, HttpResponse, MediaType, Product, ProductClient,
    ProductForm, ResponseErrorHandler, ServiceErrorHandler,
};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            product_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn television() -> Product {
    Product::new("Television", "Samsung", 1145.67, "S001")
}

#[test]
fn crud_lifecycle() {
    let client = ProductClient::new(&start_server());

    // Step 1: list, should be empty.
    assert!(client.get_products().unwrap().is_empty());
    assert_eq!(client.get_products_as_json().unwrap(), "[]");

    // Step 2: create, the server assigns its own id.
    let product = television();
    let created = client.create_product(&product).unwrap();
    assert_ne!(created.product_id, product.id);
    let id = created.product_id;

    // Step 3: list contains the new id exactly once.
    let products = client.get_products().unwrap();
    assert_eq!(products.iter().filter(|p| p.id == id).count(), 1);

    // Step 4: JSON and XML representations agree.
    let as_json = client.get_product(id).unwrap();
    let as_xml = client.get_product_as_xml(id).unwrap();
    assert_eq!(as_json.name, "Television");
    assert_eq!(as_xml, as_json);

    // Step 5: update by id.
    let mut renamed = as_json.clone();
    renamed.brand = "YAHYA_MARK".to_string();
    client.update_product(&renamed).unwrap();
    assert_eq!(client.get_product(id).unwrap().brand, "YAHYA_MARK");

    // Step 6: delete by id.
    client.delete_product(&renamed).unwrap();
    let err = client.get_product(id).unwrap_err();
    assert!(matches!(err, ClientError::NotFound));

    // Step 7: deleting again is NotFound.
    let err = client.delete_product(&renamed).unwrap_err();
    assert!(matches!(err, ClientError::NotFound));

    // Step 8: list is empty again.
    assert!(client.get_products().unwrap().is_empty());
}

#[test]
fn xml_and_json_agree_on_padded_text() {
    let client = ProductClient::new(&start_server());
    let padded = Product::new(" Smart TV ", "  ", 1145.67, "S001");
    let id = client.create_product(&padded).unwrap().product_id;

    let as_json = client.get_product(id).unwrap();
    let as_xml = client.get_product_as_xml(id).unwrap();
    assert_eq!(as_json.name, " Smart TV ");
    assert_eq!(as_json.brand, "  ");
    assert_eq!(as_xml, as_json);
}

#[test]
fn post_variants_expose_body_response_and_location() {
    let client = ProductClient::new(&start_server());

    let response = client.create_product_with_exchange(&television()).unwrap();
    assert_eq!(response.status, 201);
    assert!(response.body.contains("productID"));

    let location = client
        .create_product_with_location(&television())
        .unwrap()
        .unwrap();
    assert!(location.starts_with(client.base_url()));

    let fetched: Product = client
        .exchange(&product_client::HttpRequest {
            method: HttpMethod::Get,
            path: location,
            headers: Vec::new(),
            body: None,
        })
        .map(|r| MediaType::Json.decode(&r.body).unwrap())
        .unwrap();
    assert_eq!(fetched.sku, "S001");
}

#[test]
fn head_and_options_report_metadata() {
    let client = ProductClient::new(&start_server());

    let headers = client.get_headers().unwrap();
    assert!(headers
        .iter()
        .any(|(name, value)| name.eq_ignore_ascii_case("content-type") && value == "application/json"));

    let methods = client.allowed_methods().unwrap();
    for method in [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Options,
    ] {
        assert!(methods.contains(&method), "missing {method}");
    }
}

#[test]
fn form_submission_creates_product() {
    let client = ProductClient::new(&start_server());
    let form = ProductForm {
        name: "Washing Machine".to_string(),
        brand: "LG".to_string(),
        price: 114.67,
        sku: "L001".to_string(),
    };

    let created = client.submit_product_form(&form).unwrap();
    let product = client.get_product(created.product_id).unwrap();
    assert_eq!(product.name, "Washing Machine");
    assert_eq!(product.price, 114.67);
}

#[test]
fn download_streams_listing_into_file() {
    let client = ProductClient::new(&start_server());
    client.create_product(&television()).unwrap();
    let expected = client.get_products_as_json().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.json");
    let written = client.download_products(&television(), &path).unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, saved.len() as u64);
    assert_eq!(saved, expected);
}

#[derive(Clone, Default)]
struct CountingHandler {
    calls: Arc<AtomicUsize>,
}

impl ResponseErrorHandler for CountingHandler {
    fn handle_error(&self, response: &HttpResponse) -> ClientError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DefaultErrorHandler.handle_error(response)
    }
}

#[test]
fn error_endpoint_invokes_handler_once_per_call() {
    let handler = CountingHandler::default();
    let calls = Arc::clone(&handler.calls);
    let client = ProductClient::new(&start_server()).with_error_handler(handler);

    for expected in 1..=2 {
        let err = client.get_product_with_error().unwrap_err();
        assert!(matches!(err, ClientError::HttpError { status: 400, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), expected);
    }

    client.get_products().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn service_error_handler_names_remote_service() {
    let client = ProductClient::new(&start_server())
        .with_error_handler(ServiceErrorHandler::new("product-service"));

    match client.get_product_with_error().unwrap_err() {
        ClientError::Service(e) => {
            assert_eq!(e.status, 400);
            assert_eq!(e.error, "Bad Request");
            assert_eq!(e.service_name, "product-service");
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[test]
fn connection_refused_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ProductClient::new(&format!("http://127.0.0.1:{port}"));

    let err = client.get_products().unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "{err:?}");
}
