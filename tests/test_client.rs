//! SDK against a local stub backend.

mod common;

use std::time::Duration;

use common::{date, sample_products, sdk_for, serve, StubResponse};
use retail_dashboard_sdk::models::UserUpdate;
use retail_dashboard_sdk::{
    AuthState, DashboardError, DashboardSdk, DateRange, ImportDraft, OrderDraft,
};
use serde_json::json;

fn user_json() -> serde_json::Value {
    json!({"id": 1, "username": "admin", "isAuthenticated": true})
}

fn metrics_json() -> serde_json::Value {
    json!({
        "success": true,
        "metrics": {
            "sales": {
                "total_orders": 3,
                "total_revenue": 300.0,
                "total_items_sold": 5,
                "total_profit": 120.0,
                "order_at_list": [
                    {"order_at": "2024-03-01", "total_revenue": 100.0, "total_profit": 40.0},
                    {"order_at": "Sun, 03 Mar 2024 00:00:00 GMT", "total_revenue": 200.0, "total_profit": 80.0}
                ]
            },
            "imports": {"total_imports": 1, "total_cost": 50.0, "total_items_imported": 10},
            "products": {"total_products": 2, "low_stock_products": 0, "out_of_stock_products": 1}
        }
    })
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn builder_rejects_bad_input() {
    let err = DashboardSdk::builder().base_url("localhost:5000").build();
    assert!(matches!(err, Err(DashboardError::InvalidArgument(_))));

    let err = DashboardSdk::builder()
        .base_url("http://localhost:5000")
        .timeout(Duration::ZERO)
        .build();
    assert!(matches!(err, Err(DashboardError::InvalidArgument(_))));
}

#[test]
fn builder_strips_trailing_slash() {
    let sdk = DashboardSdk::builder()
        .base_url("http://localhost:5000/")
        .build()
        .unwrap();
    assert_eq!(sdk.connection().base_url(), "http://localhost:5000");
    assert_eq!(
        sdk.connection().url("/auth/login"),
        "http://localhost:5000/auth/login"
    );
    assert_eq!(sdk.auth_state(), AuthState::Loading);
    assert!(sdk.to_string().contains("session=loading"));
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[test]
fn login_stores_session_cookie() {
    let server = serve(vec![
        StubResponse::json(200, json!({"success": true, "user": user_json(), "redirect": "/"}))
            .with_header("Set-Cookie", "session=abc123; Path=/"),
        StubResponse::json(200, metrics_json()),
    ]);
    let sdk = sdk_for(&server);

    let user = sdk.auth().login("admin", "secret").unwrap();
    assert_eq!(user.username, "admin");
    assert!(sdk.is_authenticated());

    let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 7)).unwrap();
    sdk.dashboard().metrics(&range).unwrap();

    let requests = server.finish();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].target, "/auth/login");
    assert_eq!(
        requests[0].json(),
        json!({"username": "admin", "password": "secret"})
    );

    assert_eq!(
        requests[1].target,
        "/api/v1/dashboard/metrics?start_date=2024-03-01&end_date=2024-03-07"
    );
    assert!(requests[1]
        .header("cookie")
        .unwrap_or_default()
        .contains("session=abc123"));
}

#[test]
fn failed_login_is_rejected() {
    let server = serve(vec![StubResponse::json(
        200,
        json!({"success": false, "message": "Invalid username or password"}),
    )]);
    let sdk = sdk_for(&server);

    match sdk.auth().login("admin", "wrong") {
        Err(DashboardError::Rejected(msg)) => assert_eq!(msg, "Invalid username or password"),
        other => panic!("expected Rejected, got {:?}", other),
    }
    assert_eq!(sdk.auth_state(), AuthState::NotAuthenticated);
    server.finish();
}

#[test]
fn login_requires_credentials() {
    let sdk = DashboardSdk::builder()
        .base_url("http://127.0.0.1:9")
        .build()
        .unwrap();
    assert!(matches!(
        sdk.auth().login("  ", "secret"),
        Err(DashboardError::Validation(_))
    ));
}

#[test]
fn register_success_and_rejection() {
    let server = serve(vec![
        StubResponse::json(201, json!({"success": true, "message": "User registered"})),
        StubResponse::json(200, json!({"success": false, "message": "Username already exists"})),
    ]);
    let sdk = sdk_for(&server);

    let ack = sdk.auth().register("lan", "pw").unwrap();
    assert_eq!(ack.message.as_deref(), Some("User registered"));

    match sdk.auth().register("lan", "pw") {
        Err(DashboardError::Rejected(msg)) => assert_eq!(msg, "Username already exists"),
        other => panic!("expected Rejected, got {:?}", other),
    }

    let requests = server.finish();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].target, "/auth/register");
    assert_eq!(requests[0].json(), json!({"username": "lan", "password": "pw"}));
}

#[test]
fn check_resolves_authenticated() {
    let server = serve(vec![StubResponse::json(
        200,
        json!({"success": true, "user": user_json()}),
    )]);
    let sdk = sdk_for(&server);

    let state = sdk.auth().check().unwrap();
    assert_eq!(state.user().map(|u| u.id), Some(1));
    assert_eq!(sdk.auth().state(), state);

    let requests = server.finish();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].target, "/auth/user");
}

#[test]
fn check_treats_401_as_signed_out() {
    let server = serve(vec![StubResponse::json(
        401,
        json!({"success": false, "message": "Not authenticated"}),
    )]);
    let sdk = sdk_for(&server);

    assert_eq!(sdk.auth().check().unwrap(), AuthState::NotAuthenticated);
    server.finish();
}

#[test]
fn logout_accepts_empty_body() {
    let server = serve(vec![StubResponse::empty(200)]);
    let sdk = sdk_for(&server);

    sdk.auth().logout().unwrap();
    assert_eq!(sdk.auth_state(), AuthState::NotAuthenticated);

    let requests = server.finish();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].target, "/auth/logout");
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unauthorized_clears_session() {
    let server = serve(vec![
        StubResponse::json(200, json!({"success": true, "user": user_json()})),
        StubResponse::json(401, json!({"message": "Unauthorized"})),
    ]);
    let sdk = sdk_for(&server);

    sdk.auth().login("admin", "secret").unwrap();
    assert!(matches!(
        sdk.products().list(),
        Err(DashboardError::Unauthorized)
    ));
    assert_eq!(sdk.auth_state(), AuthState::NotAuthenticated);
    server.finish();
}

#[test]
fn server_error_carries_message() {
    let server = serve(vec![
        StubResponse::json(500, json!({"success": false, "message": "boom"})),
        StubResponse::text(404, "missing"),
    ]);
    let sdk = sdk_for(&server);

    match sdk.dashboard().stats() {
        Err(DashboardError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    match sdk.customers().list() {
        Err(DashboardError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "missing");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    server.finish();
}

#[test]
fn metrics_success_false_is_rejected() {
    let server = serve(vec![StubResponse::json(
        200,
        json!({"success": false, "message": "Invalid date format"}),
    )]);
    let sdk = sdk_for(&server);
    let range = DateRange::day(date(2024, 3, 1));

    assert!(matches!(
        sdk.dashboard().metrics(&range),
        Err(DashboardError::Rejected(_))
    ));
    server.finish();
}

#[test]
fn inverted_range_is_not_sent() {
    let sdk = DashboardSdk::builder()
        .base_url("http://127.0.0.1:9")
        .build()
        .unwrap();
    let range = DateRange {
        start: date(2024, 3, 7),
        end: date(2024, 3, 1),
    };
    assert!(matches!(
        sdk.dashboard().chart(&range),
        Err(DashboardError::InvalidArgument(_))
    ));
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[test]
fn chart_buckets_fetched_samples() {
    let server = serve(vec![
        StubResponse::json(200, metrics_json()),
        StubResponse::json(200, metrics_json()),
    ]);
    let sdk = sdk_for(&server);
    let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 7)).unwrap();

    let chart = sdk.dashboard().chart(&range).unwrap();
    assert_eq!(chart.len(), 7);
    assert_eq!((chart[0].revenue, chart[0].profit), (100.0, 40.0));
    assert_eq!((chart[1].revenue, chart[1].profit), (0.0, 0.0));
    assert_eq!((chart[2].revenue, chart[2].profit), (200.0, 80.0));
    assert_eq!(chart[2].label, "03/03");

    let summary = sdk.dashboard().summary(&range).unwrap();
    assert_eq!(summary.total_revenue, 300.0);
    assert_eq!(summary.total_profit, 120.0);
    server.finish();
}

#[test]
fn stats_use_camel_case() {
    let server = serve(vec![StubResponse::json(
        200,
        json!({"totalProducts": 12, "totalImports": 3, "totalOrders": 40}),
    )]);
    let sdk = sdk_for(&server);

    let stats = sdk.dashboard().stats().unwrap();
    assert_eq!(stats.total_products, 12);
    assert_eq!(stats.total_orders, 40);

    let requests = server.finish();
    assert_eq!(requests[0].target, "/api/v1/dashboard/stats");
}

// ---------------------------------------------------------------------------
// Products, orders and users
// ---------------------------------------------------------------------------

#[test]
fn product_helpers() {
    let products = serde_json::to_value(sample_products()).unwrap();
    let server = serve(vec![
        StubResponse::json(200, products.clone()),
        StubResponse::json(200, products),
    ]);
    let sdk = sdk_for(&server);

    let out = sdk.products().out_of_stock().unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, 2);
    assert_eq!(sdk.products().inventory_value().unwrap(), 22_500_000.0);
    server.finish();
}

#[test]
fn customer_lookup_ignores_case() {
    let customers = json!([
        {"id": 1, "name": "Nguyen Van A"},
        {"id": 2, "name": "Tran Thi Lan "}
    ]);
    let server = serve(vec![
        StubResponse::json(200, customers.clone()),
        StubResponse::json(200, customers.clone()),
        StubResponse::json(200, customers),
    ]);
    let sdk = sdk_for(&server);

    let all = sdk.customers().list().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Nguyen Van A");

    let found = sdk.customers().find_by_name("  tran thi LAN").unwrap();
    assert_eq!(found.map(|c| c.id), Some(2));
    assert!(sdk.customers().find_by_name("Le Van B").unwrap().is_none());

    let requests = server.finish();
    assert!(requests.iter().all(|r| r.target == "/api/v1/customers"));
}

#[test]
fn order_submit_posts_draft_and_resets() {
    let server = serve(vec![StubResponse::json(
        201,
        json!({"success": true, "message": "Order created"}),
    )]);
    let sdk = sdk_for(&server);

    let mut draft = OrderDraft::new(date(2024, 3, 2), &sample_products());
    draft.select_customer(5);
    draft.set_quantity(1, 2).unwrap();
    draft.set_discount(1, 1_000.0).unwrap();

    let message = sdk.orders().submit(&mut draft).unwrap();
    assert_eq!(message, "Order created");
    assert!(draft.customer().is_none());
    assert_eq!(draft.total(), 0.0);

    let requests = server.finish();
    assert_eq!(requests[0].target, "/api/v1/order");
    assert_eq!(
        requests[0].json(),
        json!({
            "customer": {"id": 5},
            "ordered_date": "2024-03-02",
            "order_lines": [
                {"product_id": 1, "quantity": 2, "sale_price": 180000.0, "discount": 1000.0}
            ]
        })
    );
}

#[test]
fn import_submit_posts_lines() {
    let server = serve(vec![StubResponse::json(200, json!({"success": true}))]);
    let sdk = sdk_for(&server);

    let mut draft = ImportDraft::new(date(2024, 3, 1), &sample_products());
    draft.set_quantity(1, 10).unwrap();
    draft.other_expenses = 25_000.0;

    assert_eq!(sdk.imports().submit(&mut draft).unwrap(), "import saved");
    assert_eq!(draft.total(), 0.0);

    let requests = server.finish();
    assert_eq!(requests[0].target, "/api/v1/import");
    let body = requests[0].json();
    assert_eq!(body["import_date"], "2024-03-01");
    assert_eq!(body["other_expenses"], 25_000.0);
    assert_eq!(body["import_lines"][0]["productId"], 1);
    assert_eq!(body["import_lines"][0]["total_line_price"], 1_500_000.0);
}

#[test]
fn rejected_order_keeps_draft() {
    let server = serve(vec![StubResponse::json(
        200,
        json!({"success": false, "message": "Insufficient stock"}),
    )]);
    let sdk = sdk_for(&server);

    let mut draft = OrderDraft::new(date(2024, 3, 2), &sample_products());
    draft.new_customer("Lan");
    draft.set_quantity(2, 1).unwrap();

    assert!(matches!(
        sdk.orders().submit(&mut draft),
        Err(DashboardError::Rejected(_))
    ));
    assert_eq!(draft.total(), 35_000.0);
    server.finish();
}

#[test]
fn user_crud_paths() {
    let server = serve(vec![
        StubResponse::json(200, json!([user_json()])),
        StubResponse::json(200, json!({"id": 1, "username": "root"})),
        StubResponse::json(200, json!({"message": "deleted"})),
    ]);
    let sdk = sdk_for(&server);

    assert_eq!(sdk.users().list().unwrap().len(), 1);
    let update = UserUpdate {
        username: Some("root".into()),
        password: None,
    };
    assert_eq!(sdk.users().update(1, &update).unwrap().username, "root");
    sdk.users().delete(1).unwrap();

    let requests = server.finish();
    assert_eq!(requests[0].target, "/users");
    assert_eq!(requests[1].method, "PUT");
    assert_eq!(requests[1].target, "/users/1");
    assert_eq!(requests[1].json(), json!({"username": "root"}));
    assert_eq!(requests[2].method, "DELETE");
}
