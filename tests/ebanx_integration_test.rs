//! End-to-end tests for the EBANX payload adapter
//!
//! Walks each operation through the public API the way a transport would:
//! build, resolve URL/verb/headers, serialize, then read the authorization
//! reference out of a canned response.

use ebanx_payloads::{
    CardBrand, CreditCard, EbanxConfig, EbanxGateway, GatewayOptions, Operation, OperationRequest,
    PaymentGateway, PaymentInstrument,
};
use http::Method;
use serde_json::{json, Value};

fn gateway() -> EbanxGateway {
    EbanxGateway::new(EbanxConfig::new("integration_key_test")).expect("valid config")
}

fn card(brand: CardBrand) -> CreditCard {
    CreditCard {
        number: "4111111111111111".into(),
        first_name: "Jose".to_string(),
        last_name: "Silva".to_string(),
        month: 12,
        year: 2030,
        verification_value: Some("123".into()),
        brand,
    }
}

fn body_of(gateway: &EbanxGateway, payload: &<EbanxGateway as PaymentGateway>::Payload) -> Value {
    serde_json::from_str(&gateway.post_data(payload).unwrap()).unwrap()
}

#[test]
fn test_store_then_purchase_with_token() {
    let gateway = gateway();
    let options = GatewayOptions::new().with("billing_address", json!({ "country": "BR" }));

    let store = gateway.store(&card(CardBrand::Master), &options);
    let body = body_of(&gateway, &store);
    assert_eq!(body["card"]["brand"], "master_card");
    assert_eq!(body["country"], "br");

    let reference = gateway
        .authorization_from(Operation::Store, &store, &json!({ "token": "tok_789" }))
        .expect("store reference");
    assert_eq!(reference, "tok_789|master_card");

    let purchase = gateway.purchase(
        1000,
        "BRL",
        PaymentInstrument::from_stored(&reference),
        GatewayOptions::new().with("order_id", "o-1"),
    );
    let body = body_of(&gateway, &purchase);
    assert_eq!(
        body,
        json!({
            "amount": 1000,
            "options": { "order_id": "o-1", "currency": "BRL" },
            "creditcard": { "token": "tok_789", "brand": "master_card" }
        })
    );
    assert_eq!(
        gateway.url_for(true, Operation::Purchase),
        "https://sandbox.ebanxpay.com/channels/spreedly/charge"
    );
}

#[test]
fn test_authorize_capture_refund_void_chain() {
    let gateway = gateway();

    let auth = gateway.authorize(500, "USD", card(CardBrand::Visa).into(), GatewayOptions::new());
    assert_eq!(body_of(&gateway, &auth)["creditcard"]["auto_capture"], false);

    let purchase = gateway.purchase(500, "USD", card(CardBrand::Visa).into(), GatewayOptions::new());
    assert!(body_of(&gateway, &purchase)["creditcard"]
        .get("auto_capture")
        .is_none());

    let hash = gateway
        .authorization_from(
            Operation::Authorize,
            &auth,
            &json!({ "payment": { "hash": "5d7f0a", "status": "PE" } }),
        )
        .expect("payment hash");

    let full = gateway.capture(500, &hash, &GatewayOptions::new());
    assert_eq!(body_of(&gateway, &full), json!({ "authorization": "5d7f0a" }));

    let partial = gateway.capture(
        499,
        &hash,
        &GatewayOptions::new().with("include_capture_amount", true),
    );
    assert_eq!(
        body_of(&gateway, &partial),
        json!({ "authorization": "5d7f0a", "amount": 499 })
    );

    let refund = gateway.refund(
        499,
        &hash,
        &GatewayOptions::new().with("description", "customer request"),
    );
    assert_eq!(body_of(&gateway, &refund)["description"], "customer request");

    let void = gateway.void(&hash, &GatewayOptions::new());
    assert_eq!(body_of(&gateway, &void), json!({ "authorization": "5d7f0a" }));
}

#[test]
fn test_prepare_every_operation() {
    let gateway = gateway();
    let requests = vec![
        OperationRequest::Purchase {
            amount: 100,
            currency: "USD".to_string(),
            payment: card(CardBrand::Discover).into(),
            options: GatewayOptions::new(),
        },
        OperationRequest::Authorize {
            amount: 100,
            currency: "USD".to_string(),
            payment: PaymentInstrument::from_stored("tok_1|diners"),
            options: GatewayOptions::new(),
        },
        OperationRequest::Capture {
            amount: 100,
            authorization: "h".to_string(),
            options: GatewayOptions::new(),
        },
        OperationRequest::Refund {
            amount: 100,
            authorization: "h".to_string(),
            options: GatewayOptions::new(),
        },
        OperationRequest::Void {
            authorization: "h".to_string(),
            options: GatewayOptions::new(),
        },
        OperationRequest::Store {
            card: card(CardBrand::DinersClub),
            options: GatewayOptions::new().with("country", "MX"),
        },
    ];

    for request in requests {
        let operation = request.operation();
        let prepared = gateway.prepare(false, request).unwrap();
        assert_eq!(prepared.method, Method::POST);
        assert!(prepared
            .url
            .starts_with("https://api.ebanxpay.com/channels/spreedly/"));
        assert!(prepared.url.ends_with(operation.path()));
        assert_eq!(prepared.headers["content-type"], "application/json");
        assert_eq!(prepared.headers["authorization"], "integration_key_test");
        assert!(serde_json::from_str::<Value>(&prepared.body).is_ok());
    }
}

#[test]
fn test_local_processing_routes_through_header() {
    let gateway = gateway();
    let request: OperationRequest = serde_json::from_value(json!({
        "operation": "purchase",
        "amount": 2500,
        "currency": "BRL",
        "payment": "tok_local|visa",
        "options": { "processing_type": "local", "document": "853.513.468-93" }
    }))
    .unwrap();

    let prepared = gateway.prepare(true, request).unwrap();
    assert_eq!(prepared.headers["x-ebanx-api-processing-type"], "local");

    let body: Value = serde_json::from_str(&prepared.body).unwrap();
    assert_eq!(body["options"]["document"], "853.513.468-93");
    assert_eq!(body["options"]["processing_type"], "local");
}

#[test]
fn test_gateway_is_shareable_across_threads() {
    let gateway = std::sync::Arc::new(gateway());
    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            let gateway = gateway.clone();
            std::thread::spawn(move || {
                let payload = gateway.void(&format!("hash_{}", i), &GatewayOptions::new());
                gateway.post_data(&payload).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let body = handle.join().unwrap();
        assert_eq!(body, format!("{{\"authorization\":\"hash_{}\"}}", i));
    }
}
