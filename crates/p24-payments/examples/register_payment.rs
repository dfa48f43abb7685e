//! Register a sandbox payment and print the pay-by-link URL.
//!
//! ```bash
//! P24_MERCHANT_ID=12345 P24_CRC=... P24_SANDBOX=1 \
//! RUST_LOG=p24_payments=debug \
//! cargo run --example register_payment -- '[{"name":"Book","quantity":1,"price":4900}]'
//! ```

use p24_payments::{P24Config, Product, TransactionClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = P24Config::from_env()?;
    let mut client = TransactionClient::with_config(config)?;

    client.test_connection().await?;

    let session_id = format!("demo-{}", std::process::id());
    client.set_session_id(session_id)?;
    client.set_amount(4_900);
    client.set_currency("PLN")?;
    client.set_description("Demo order")?;
    client.set_email("buyer@example.com")?;
    client.set_country("PL")?;
    client.set_language("pl")?;
    client.set_url_return("https://shop.example.com/return")?;
    client.set_url_status("https://shop.example.com/p24/status")?;

    if let Some(raw) = std::env::args().nth(1) {
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        client.add_products(products);
    }

    let token = client.register().await?;
    println!("{}", client.pay_by_link_url(&token));

    Ok(())
}
