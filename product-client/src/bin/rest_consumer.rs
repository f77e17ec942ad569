//! Runs every client interaction once against a running product server.

use product_client::{
    ClientConfig, ClientError, Product, ProductClient, ProductForm, ServiceErrorHandler,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ClientConfig::from_env()?;
    let client = ProductClient::from_config(&config);
    let television = Product::new("Television", "Samsung", 1145.67, "S001");

    client.get_products_as_json()?;
    let products = client.get_products()?;
    client.get_headers()?;
    client.allowed_methods()?;

    let created = client.create_product(&television)?;
    client.create_product_with_exchange(&television)?;
    client.create_product_with_location(&television)?;

    let stored = client.get_product_as_xml(created.product_id)?;
    info!(name = %stored.name, brand = %stored.brand, "product as xml");

    let mut renamed = stored.clone();
    renamed.brand = "YAHYA_MARK".to_string();
    client.update_product(&renamed)?;

    client.download_products(&television, "output.json")?;
    client.submit_product_form(&ProductForm::from(&television))?;

    if let Some(first) = products.first() {
        client.delete_product(first)?;
    }

    let with_service_errors = client
        .clone()
        .with_error_handler(ServiceErrorHandler::new(config.service_name.clone()));
    match with_service_errors.get_product_with_error() {
        Ok(product) => info!(?product, "result"),
        Err(ClientError::Service(e)) => {
            info!(error = %e.error, service = %e.service_name, "error occurred");
        }
        Err(e) => warn!(error = %e, "unexpected failure"),
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    let result = if json {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
