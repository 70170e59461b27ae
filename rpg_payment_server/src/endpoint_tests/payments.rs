use actix_web::{
    http::{header, Method, StatusCode},
    test,
    App,
};
use rpg_payment_engine::{
    db_types::{MinorUnits, OrderId},
    gateway_types::{GatewayOrder, GatewayPayment},
    traits::{GatewayError, PaymentRecordStoreError},
    DebugStore,
};
use serde_json::{json, Map};
use tempfile::TempDir;

use super::{
    helpers::{
        configure_app,
        get_request,
        paid_record,
        post_request,
        record_from,
        send_request,
        signature_for,
        TEST_KEY_ID,
    },
    mocks::{MockGateway, MockRecordStore},
};
use crate::server::{cors, json_config};

const CREATE_ORDER: &str = "/api/payments/create-order";
const VERIFY_PAYMENT: &str = "/api/payments/verify-payment";

fn gateway_order(id: &str, amount: MinorUnits, currency: String, receipt: String) -> GatewayOrder {
    let mut extra = Map::new();
    extra.insert("entity".into(), json!("order"));
    GatewayOrder { id: OrderId::from(id), amount, currency, receipt: Some(receipt), status: "created".into(), extra }
}

/// A gateway that creates `order_1` for whatever it is asked
fn happy_gateway() -> MockGateway {
    let mut gateway = MockGateway::new();
    gateway.expect_key_id().returning(|| TEST_KEY_ID.to_string());
    gateway.expect_create_order().returning(|o| Ok(gateway_order("order_1", o.amount, o.currency, o.receipt)));
    gateway
}

fn inserting_store() -> MockRecordStore {
    let mut store = MockRecordStore::new();
    store.expect_insert_record().times(1).returning(|r| Ok((record_from(1, r), true)));
    store
}

#[actix_web::test]
async fn health_check() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let res = get_request("/api/health", |cfg| {
        configure_app(cfg, MockRecordStore::new(), MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "Running");
    assert_eq!(body["message"], "Razorpay Payment Gateway API");
}

#[actix_web::test]
async fn create_order() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let body = r#"{"amount": 499.50, "customerName": "Asha Rao", "customerEmail": "asha@example.com"}"#;
    let res = post_request(CREATE_ORDER, body, |cfg| {
        configure_app(cfg, inserting_store(), happy_gateway(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Order created successfully");
    assert_eq!(body["order"]["id"], "order_1");
    assert_eq!(body["order"]["amount"], 49950);
    assert_eq!(body["order"]["currency"], "INR");
    assert_eq!(body["order"]["status"], "created");
    assert!(body["order"]["receipt"].as_str().unwrap().starts_with("rcpt_"));
    assert_eq!(body["key_id"], TEST_KEY_ID);
    assert!(body["order"].get("entity").is_none());
}

#[actix_web::test]
async fn create_order_with_string_amount_and_receipt() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store
        .expect_insert_record()
        .withf(|r| r.amount.value() == 1250 && r.currency == "USD" && r.customer.name.is_none())
        .times(1)
        .returning(|r| Ok((record_from(7, r), true)));
    let body = r#"{"amount": "12.5", "currency": "USD", "receipt": "my_receipt"}"#;
    let res = post_request(CREATE_ORDER, body, |cfg| {
        configure_app(cfg, store, happy_gateway(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["order"]["amount"], 1250);
    assert_eq!(body["order"]["currency"], "USD");
    assert_eq!(body["order"]["receipt"], "my_receipt");
}

#[actix_web::test]
async fn create_order_without_amount() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    for body in [r#"{"currency": "INR"}"#, r#"{"amount": "abc"}"#, r#"{"amount": 0}"#, r#"{"amount": -10}"#] {
        let mut store = MockRecordStore::new();
        store.expect_insert_record().never();
        let mut gateway = MockGateway::new();
        gateway.expect_create_order().never();
        let res =
            post_request(CREATE_ORDER, body, |cfg| configure_app(cfg, store, gateway, DebugStore::new(), dir.path()))
                .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{body}");
        let json = res.json();
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("Amount"), "{json}");
    }
}

#[actix_web::test]
async fn create_order_with_malformed_json() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let res = post_request(CREATE_ORDER, "{amount: ", |cfg| {
        configure_app(cfg, MockRecordStore::new(), MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["success"], false);
}

#[actix_web::test]
async fn create_order_gateway_failure() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_order()
        .returning(|_| Err(GatewayError::Upstream("BAD_REQUEST_ERROR: Authentication failed".into())));
    let mut store = MockRecordStore::new();
    store.expect_insert_record().never();
    let res = post_request(CREATE_ORDER, r#"{"amount": 100}"#, |cfg| {
        configure_app(cfg, store, gateway, DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "BAD_REQUEST_ERROR: Authentication failed");
}

#[actix_web::test]
async fn create_order_storage_failure() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store.expect_insert_record().returning(|_| Err(PaymentRecordStoreError::DatabaseError("disk full".into())));
    let res = post_request(CREATE_ORDER, r#"{"amount": 100}"#, |cfg| {
        configure_app(cfg, store, happy_gateway(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.json()["error"].as_str().unwrap().contains("disk full"));
}

#[actix_web::test]
async fn verify_payment() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store
        .expect_mark_record_paid()
        .withf(|o, p, _| o.as_str() == "order_1" && p == "pay_1")
        .times(1)
        .returning(|o, p, _| Ok(paid_record(1, o.as_str(), p, 49950)));
    let body = json!({"orderId": "order_1", "paymentId": "pay_1", "signature": signature_for("order_1", "pay_1")});
    let res = post_request(VERIFY_PAYMENT, &body.to_string(), |cfg| {
        configure_app(cfg, store, MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.json(),
        json!({"success": true, "message": "Payment verified successfully", "orderId": "order_1", "paymentId": "pay_1"})
    );
}

#[actix_web::test]
async fn verify_payment_with_gateway_field_names() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store.expect_mark_record_paid().times(1).returning(|o, p, _| Ok(paid_record(1, o.as_str(), p, 100)));
    let body = json!({
        "razorpay_order_id": "order_1",
        "razorpay_payment_id": "pay_1",
        "razorpay_signature": signature_for("order_1", "pay_1")
    });
    let res = post_request(VERIFY_PAYMENT, &body.to_string(), |cfg| {
        configure_app(cfg, store, MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["orderId"], "order_1");
}

#[actix_web::test]
async fn verify_payment_bad_signature() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store.expect_mark_record_paid().never();
    let wrong = signature_for("order_1", "pay_2");
    let body = json!({"orderId": "order_1", "paymentId": "pay_1", "signature": wrong});
    let res = post_request(VERIFY_PAYMENT, &body.to_string(), |cfg| {
        configure_app(cfg, store, MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json(), json!({"success": false, "message": "Invalid signature - Payment verification failed"}));
}

#[actix_web::test]
async fn verify_payment_missing_fields() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store.expect_mark_record_paid().never();
    let res = post_request(VERIFY_PAYMENT, r#"{"orderId": "order_1", "signature": "abc"}"#, |cfg| {
        configure_app(cfg, store, MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["success"], false);
}

#[actix_web::test]
async fn verify_payment_unknown_order() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store
        .expect_mark_record_paid()
        .returning(|o, _, _| Err(PaymentRecordStoreError::RecordNotFound(o.clone())));
    let body = json!({"orderId": "order_x", "paymentId": "pay_1", "signature": signature_for("order_x", "pay_1")});
    let res = post_request(VERIFY_PAYMENT, &body.to_string(), |cfg| {
        configure_app(cfg, store, MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["success"], false);
}

#[actix_web::test]
async fn verify_payment_twice() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store.expect_mark_record_paid().returning(|o, _, _| Err(PaymentRecordStoreError::AlreadyPaid(o.clone())));
    let body = json!({"orderId": "order_1", "paymentId": "pay_1", "signature": signature_for("order_1", "pay_1")});
    let res = post_request(VERIFY_PAYMENT, &body.to_string(), |cfg| {
        configure_app(cfg, store, MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["message"], "Payment was already verified");
}

#[actix_web::test]
async fn payment_details() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut gateway = MockGateway::new();
    gateway.expect_fetch_payment().returning(|id| match id {
        "pay_1" => Ok(GatewayPayment {
            id: id.to_string(),
            order_id: Some(OrderId::from("order_1")),
            amount: MinorUnits::from(49950),
            currency: "INR".into(),
            status: "captured".into(),
            extra: json!({"method": "upi", "vpa": "asha@upi"}).as_object().cloned().unwrap(),
        }),
        "pay_gone" => Err(GatewayError::NotFound { id: id.to_string(), message: "NOT_FOUND: gone".into() }),
        _ => Err(GatewayError::Upstream("SERVER_ERROR: try again".into())),
    });
    let res = get_request("/api/payments/payment/pay_1", |cfg| {
        configure_app(cfg, MockRecordStore::new(), gateway, DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["message"], "Payment details retrieved");
    assert_eq!(body["payment"]["id"], "pay_1");
    assert_eq!(body["payment"]["order_id"], "order_1");
    assert_eq!(body["payment"]["vpa"], "asha@upi");
}

#[actix_web::test]
async fn payment_details_failures() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    for (path, status) in [
        ("/api/payments/payment/pay_gone", StatusCode::NOT_FOUND),
        ("/api/payments/payment/pay_boom", StatusCode::INTERNAL_SERVER_ERROR),
        ("/api/payments/payment/%20", StatusCode::BAD_REQUEST),
    ] {
        let mut gateway = MockGateway::new();
        gateway.expect_fetch_payment().returning(|id| match id {
            "pay_gone" => Err(GatewayError::NotFound { id: id.to_string(), message: "NOT_FOUND: gone".into() }),
            _ => Err(GatewayError::Upstream("SERVER_ERROR: try again".into())),
        });
        let res = get_request(path, |cfg| {
            configure_app(cfg, MockRecordStore::new(), gateway, DebugStore::new(), dir.path())
        })
        .await;
        assert_eq!(res.status, status, "{path}");
        let body = res.json();
        assert_eq!(body["success"], false);
        if status == StatusCode::NOT_FOUND {
            assert!(body["message"].as_str().unwrap().contains("NOT_FOUND: gone"), "{body}");
        }
    }
}

#[actix_web::test]
async fn payment_records() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store.expect_fetch_all_records().returning(|| {
        Ok(vec![paid_record(3, "order_3", "pay_3", 49950), paid_record(2, "order_2", "pay_2", 100)])
    });
    let res = get_request("/api/payments/records", |cfg| {
        configure_app(cfg, store, MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["success"], true);
    let payments = body["payments"].as_array().unwrap();
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0]["id"], 3);
    assert_eq!(payments[0]["amount"], 49950);
    assert_eq!(payments[0]["amount_major"], 499.5);
    assert_eq!(payments[0]["status"], "PAID");
    assert_eq!(payments[1]["amount_major"], 1.0);
    assert!(payments[0].get("signature").is_none());
}

#[actix_web::test]
async fn export_before_any_report() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("payments_report.xlsx");
    let res = get_request("/api/payments/export", |cfg| {
        configure_app(cfg, MockRecordStore::new(), MockGateway::new(), DebugStore::new(), &report)
    })
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["success"], false);
}

#[actix_web::test]
async fn export_existing_report() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("somewhere_else.xlsx");
    std::fs::write(&report, b"PK fake workbook").unwrap();
    let res = get_request("/api/payments/export", |cfg| {
        configure_app(cfg, MockRecordStore::new(), MockGateway::new(), DebugStore::new(), &report)
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, b"PK fake workbook");
    assert_eq!(
        res.content_type.as_deref(),
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    );
    let disposition = res.disposition.expect("No content disposition");
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("payments_report.xlsx"));
}

#[actix_web::test]
async fn debug_routes_track_the_last_order_and_payment() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = inserting_store();
    store.expect_mark_record_paid().returning(|o, p, _| Ok(paid_record(1, o.as_str(), p, 100)));
    let debug_store = DebugStore::new();
    let ds = debug_store.clone();
    let app = App::new()
        .app_data(json_config())
        .configure(|cfg| configure_app(cfg, store, happy_gateway(), ds, dir.path()));
    let service = test::init_service(app).await;

    let req = test::TestRequest::get().uri("/last-order").to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post().uri(CREATE_ORDER).set_json(json!({"amount": 1})).to_request();
    assert_eq!(test::call_service(&service, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::get().uri("/last-order").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["lastOrder"]["id"], "order_1");
    assert_eq!(body["lastOrder"]["entity"], "order");

    let req = test::TestRequest::get().uri("/last-payment").to_request();
    assert_eq!(test::call_service(&service, req).await.status(), StatusCode::NOT_FOUND);
    let payload = json!({"orderId": "order_1", "paymentId": "pay_1", "signature": signature_for("order_1", "pay_1")});
    let req = test::TestRequest::post().uri(VERIFY_PAYMENT).set_json(payload).to_request();
    assert_eq!(test::call_service(&service, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::get().uri("/last-payment").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body["lastPayment"]["payment_id"], "pay_1");
    assert_eq!(body["lastPayment"]["status"], "PAID");
    assert_eq!(debug_store.last_payment().unwrap().order_id.as_str(), "order_1");
}

#[actix_web::test]
async fn verify_payment_from_checkout_form() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store
        .expect_mark_record_paid()
        .withf(|o, p, _| o.as_str() == "order_1" && p == "pay_1")
        .times(1)
        .returning(|o, p, _| Ok(paid_record(1, o.as_str(), p, 100)));
    let form = [
        ("razorpay_order_id", "order_1".to_string()),
        ("razorpay_payment_id", "pay_1".to_string()),
        ("razorpay_signature", signature_for("order_1", "pay_1")),
    ];
    let req = test::TestRequest::post().uri(VERIFY_PAYMENT).set_form(form);
    let res = send_request(req, |cfg| {
        configure_app(cfg, store, MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["message"], "Payment verified successfully");
    assert_eq!(body["paymentId"], "pay_1");
}

#[actix_web::test]
async fn verify_payment_form_with_bad_signature() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store.expect_mark_record_paid().never();
    let form = [("razorpay_order_id", "order_1"), ("razorpay_payment_id", "pay_1"), ("razorpay_signature", "abcd")];
    let req = test::TestRequest::post().uri(VERIFY_PAYMENT).set_form(form);
    let res = send_request(req, |cfg| {
        configure_app(cfg, store, MockGateway::new(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["message"], "Invalid signature - Payment verification failed");
}

#[actix_web::test]
async fn create_order_from_form() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let mut store = MockRecordStore::new();
    store
        .expect_insert_record()
        .withf(|r| r.amount.value() == 49950 && r.customer.name.as_deref() == Some("Asha Rao"))
        .times(1)
        .returning(|r| Ok((record_from(1, r), true)));
    let form = [("amount", "499.50"), ("customerName", "Asha Rao")];
    let req = test::TestRequest::post().uri(CREATE_ORDER).set_form(form);
    let res = send_request(req, |cfg| {
        configure_app(cfg, store, happy_gateway(), DebugStore::new(), dir.path())
    })
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["order"]["amount"], 49950);
}

#[actix_web::test]
async fn cross_origin_requests_are_allowed() {
    let _ = env_logger::try_init();
    let dir = TempDir::new().unwrap();
    let app = App::new().wrap(cors()).app_data(json_config()).configure(|cfg| {
        configure_app(cfg, MockRecordStore::new(), MockGateway::new(), DebugStore::new(), dir.path())
    });
    let service = test::init_service(app).await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri(CREATE_ORDER)
        .insert_header((header::ORIGIN, "https://shop.example.com"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
        .to_request();
    let res = test::call_service(&service, req).await;
    assert!(res.status().is_success(), "Preflight failed with {}", res.status());
    let allowed = res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok());
    assert_eq!(allowed, Some("https://shop.example.com"));

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header((header::ORIGIN, "https://shop.example.com"))
        .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
