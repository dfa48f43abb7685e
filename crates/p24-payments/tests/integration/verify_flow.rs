//! Integration Tests: Transaction Verification Flow
//!
//! - Status notification -> apply to client -> `trnVerify`
//! - `error=0` succeeds, anything else is a gateway error
//! - Products are never sent with verification

use super::common::{client_for, form_body, received, CRC, MERCHANT_ID, POS_ID};
use p24_payments::sign::{notification_sign, transaction_sign};
use p24_payments::{Notification, PaymentError, TransactionClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn verifiable_client(server: &MockServer) -> TransactionClient {
    let mut client = client_for(server);
    client.set_session_id("order-2024-0002").unwrap();
    client.set_amount(5_000);
    client.set_currency("PLN").unwrap();
    client.set_order_id(303_030_303);
    client
}

/// Test: `error=0` verifies the transaction
#[tokio::test]
async fn test_verify_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trnVerify"))
        .respond_with(ResponseTemplate::new(200).set_body_string("error=0"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = verifiable_client(&server);
    client.verify().await.expect("Verification failed");

    let body = form_body(&received(&server).await[0]);
    assert_eq!(body["p24_order_id"], "303030303");
    assert_eq!(
        body["p24_sign"],
        transaction_sign("order-2024-0002", POS_ID, 5_000, "PLN", CRC)
    );
}

/// Test: Gateway rejection surfaces its error message
#[tokio::test]
async fn test_verify_gateway_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trnVerify"))
        .respond_with(ResponseTemplate::new(200).set_body_string("error=1&errorMessage=Not+found"))
        .mount(&server)
        .await;

    let err = verifiable_client(&server).verify().await.unwrap_err();

    assert!(matches!(err, PaymentError::Gateway(_)));
    assert_eq!(err.gateway_message(), Some("Not found"));
}

/// Test: Empty reply is reported as no response
#[tokio::test]
async fn test_verify_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trnVerify"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let err = verifiable_client(&server).verify().await.unwrap_err();
    assert!(matches!(err, PaymentError::NoResponse));
}

/// Test: A 5xx page is a transport failure, not a gateway answer
#[tokio::test]
async fn test_verify_server_error_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trnVerify"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = verifiable_client(&server).verify().await.unwrap_err();
    assert!(matches!(err, PaymentError::Transport(_)));
}

/// Test: Rejection without code or message names the failed operation
#[tokio::test]
async fn test_verify_rejection_without_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trnVerify"))
        .respond_with(ResponseTemplate::new(200).set_body_string("result=unknown"))
        .mount(&server)
        .await;

    let err = verifiable_client(&server).verify().await.unwrap_err();
    assert_eq!(err.gateway_message(), Some("transaction verification failed"));
}

/// Test: Verification does not materialize products
#[tokio::test]
async fn test_verify_skips_products() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trnVerify"))
        .respond_with(ResponseTemplate::new(200).set_body_string("error=0"))
        .mount(&server)
        .await;

    let mut client = verifiable_client(&server);
    client.add_product("Book", None, 1, 5_000, None);
    client.verify().await.unwrap();

    let body = form_body(&received(&server).await[0]);
    assert!(!body.contains_key("p24_name_1"));
}

/// Test: Verify can run on a fresh client straight from a status notification
#[tokio::test]
async fn test_notification_then_verify() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trnVerify"))
        .respond_with(ResponseTemplate::new(200).set_body_string("error=0"))
        .expect(1)
        .mount(&server)
        .await;

    let sign = notification_sign("order-2024-0003", 777_000, 1_999, "EUR", CRC);
    let callback = format!(
        "p24_merchant_id={}&p24_pos_id={}&p24_session_id=order-2024-0003&p24_amount=1999\
         &p24_currency=EUR&p24_order_id=777000&p24_method=154&p24_statement=p24-X&p24_sign={}",
        MERCHANT_ID, POS_ID, sign
    );
    let notification = Notification::parse(&callback).unwrap();

    let mut client = client_for(&server);
    client.apply_notification(&notification).unwrap();
    client.verify().await.expect("Verification failed");

    let body = form_body(&received(&server).await[0]);
    assert_eq!(body["p24_session_id"], "order-2024-0003");
    assert_eq!(body["p24_currency"], "EUR");
    assert_eq!(body["p24_order_id"], "777000");
}

/// Test: A forged notification is refused and leaves the client unchanged
#[tokio::test]
async fn test_forged_notification_rejected() {
    let server = MockServer::start().await;

    let callback = format!(
        "p24_merchant_id={}&p24_pos_id={}&p24_session_id=s&p24_amount=1\
         &p24_currency=PLN&p24_order_id=1&p24_sign=00000000000000000000000000000000",
        MERCHANT_ID, POS_ID
    );
    let notification = Notification::parse(&callback).unwrap();

    let mut client = client_for(&server);
    let err = client.apply_notification(&notification).unwrap_err();

    assert!(matches!(err, PaymentError::InvalidNotification(_)));
    assert_eq!(client.form().get("p24_session_id"), None);
}
