//! Integration Tests: Local Validation
//!
//! Setter rejections and missing required fields are reported before any
//! request is made. Every test mounts a catch-all mock expecting zero calls.

use super::common::{client_for, received, registrable_client};
use p24_payments::PaymentError;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn gateway_expecting_no_calls() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("error=0&token=NEVER"))
        .expect(0)
        .mount(&server)
        .await;
    server
}

/// Test: Register without a session id fails naming `p24_session_id`
#[tokio::test]
async fn test_register_missing_session_id() {
    let server = gateway_expecting_no_calls().await;

    let mut client = client_for(&server);
    client.set_amount(100);
    client.set_currency("PLN").unwrap();
    client.set_description("Order").unwrap();
    client.set_email("buyer@example.com").unwrap();
    client.set_country("PL").unwrap();
    client.set_url_return("https://shop.example.com/return").unwrap();

    let err = client.register().await.unwrap_err();

    assert!(matches!(err, PaymentError::MissingField("p24_session_id")));
    assert!(received(&server).await.is_empty());
}

/// Test: Every register requirement is checked
#[tokio::test]
async fn test_register_reports_first_missing_field() {
    let server = gateway_expecting_no_calls().await;

    let mut client = client_for(&server);
    let err = client.register().await.unwrap_err();
    assert_eq!(err.field(), Some("p24_session_id"));

    client.set_session_id("s").unwrap();
    client.set_amount(1);
    client.set_currency("PLN").unwrap();
    client.set_description("d").unwrap();
    client.set_email("e@example.com").unwrap();
    let err = client.register().await.unwrap_err();
    assert_eq!(err.field(), Some("p24_country"));

    client.set_country("PL").unwrap();
    let err = client.register().await.unwrap_err();
    assert_eq!(err.field(), Some("p24_url_return"));
}

/// Test: Verify without an order id fails before sending
#[tokio::test]
async fn test_verify_missing_order_id() {
    let server = gateway_expecting_no_calls().await;

    // Everything register needs, but no order id
    let mut client = registrable_client(&server);
    let err = client.verify().await.unwrap_err();

    assert!(matches!(err, PaymentError::MissingField("p24_order_id")));
}

/// Test: Verify without a session id fails naming `p24_session_id`
#[tokio::test]
async fn test_verify_missing_session_id() {
    let server = gateway_expecting_no_calls().await;

    let mut client = client_for(&server);
    client.set_amount(1);
    client.set_currency("PLN").unwrap();
    client.set_order_id(1);

    let err = client.verify().await.unwrap_err();
    assert_eq!(err.field(), Some("p24_session_id"));
}

/// Test: Setters accept boundary lengths and reject one character more
#[tokio::test]
async fn test_setter_boundaries() {
    let server = gateway_expecting_no_calls().await;
    let mut client = client_for(&server);

    let long = |n: usize| "a".repeat(n);

    assert!(client.set_session_id(long(100)).is_ok());
    assert_eq!(client.set_session_id(long(101)).unwrap_err().field(), Some("p24_session_id"));

    assert!(client.set_description(long(1024)).is_ok());
    assert_eq!(client.set_description(long(1025)).unwrap_err().field(), Some("p24_description"));

    assert!(client.set_email(long(50)).is_ok());
    assert_eq!(client.set_email(long(51)).unwrap_err().field(), Some("p24_email"));

    assert!(client.set_client(long(50)).is_ok());
    assert_eq!(client.set_client(long(51)).unwrap_err().field(), Some("p24_client"));

    assert!(client.set_address(long(80)).is_ok());
    assert_eq!(client.set_address(long(81)).unwrap_err().field(), Some("p24_address"));

    assert!(client.set_zip(long(10)).is_ok());
    assert_eq!(client.set_zip(long(11)).unwrap_err().field(), Some("p24_zip"));

    assert!(client.set_city(long(50)).is_ok());
    assert_eq!(client.set_city(long(51)).unwrap_err().field(), Some("p24_city"));

    assert!(client.set_country(long(2)).is_ok());
    assert_eq!(client.set_country(long(3)).unwrap_err().field(), Some("p24_country"));

    assert!(client.set_phone(long(12)).is_ok());
    assert_eq!(client.set_phone(long(13)).unwrap_err().field(), Some("p24_phone"));

    assert!(client.set_url_return(long(250)).is_ok());
    assert_eq!(client.set_url_return(long(251)).unwrap_err().field(), Some("p24_url_return"));

    assert!(client.set_url_status(long(250)).is_ok());
    assert_eq!(client.set_url_status(long(251)).unwrap_err().field(), Some("p24_url_status"));

    assert!(client.set_transfer_label(long(20)).is_ok());
    assert_eq!(
        client.set_transfer_label(long(21)).unwrap_err().field(),
        Some("p24_transfer_label")
    );

    assert!(client.set_currency(long(3)).is_ok());
    assert_eq!(client.set_currency(long(4)).unwrap_err().field(), Some("p24_currency"));
    assert_eq!(client.set_currency(long(2)).unwrap_err().field(), Some("p24_currency"));

    assert!(client.set_language(long(2)).is_ok());
    assert_eq!(client.set_language(long(3)).unwrap_err().field(), Some("p24_language"));
    assert_eq!(client.set_language(long(1)).unwrap_err().field(), Some("p24_language"));
}

/// Test: Empty strings are rejected by ranged setters
#[tokio::test]
async fn test_setters_reject_empty() {
    let server = gateway_expecting_no_calls().await;
    let mut client = client_for(&server);

    let err = client.set_session_id("").unwrap_err();
    assert!(matches!(err, PaymentError::Validation { field: "p24_session_id", .. }));
    assert!(client.set_email("").is_err());
    assert!(client.set_transfer_label("").is_err());
}
