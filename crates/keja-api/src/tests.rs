//! Router tests over mocked repositories

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use keja_core::domain::{Money, Tenant, TenantContact, TenantRecord};
use keja_core::repositories::{
    MockMaintenanceRepository, MockPaymentRepository, MockProfileRepository, MockPropertyRepository,
    MockTenantRepository, MockUnitRepository, RecordedPayment,
};
use keja_shared::config::AppConfig;

use crate::auth::Claims;
use crate::{build_router, AppState, Repositories};

const SECRET: &str = "router-test-secret";

struct Mocks {
    units: MockUnitRepository,
    tenants: MockTenantRepository,
    payments: MockPaymentRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            units: MockUnitRepository::new(),
            tenants: MockTenantRepository::new(),
            payments: MockPaymentRepository::new(),
        }
    }

    fn into_router(self) -> Router {
        let config = AppConfig::defaults()
            .unwrap()
            .set_override("database.url", "postgres://localhost/keja_test")
            .unwrap()
            .set_override("auth.jwt_secret", SECRET)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>()
            .unwrap();

        let repos = Repositories {
            properties: Arc::new(MockPropertyRepository::new()),
            units: Arc::new(self.units),
            tenants: Arc::new(self.tenants),
            payments: Arc::new(self.payments),
            maintenance: Arc::new(MockMaintenanceRepository::new()),
            profiles: Arc::new(MockProfileRepository::new()),
        };
        build_router(AppState::new(config, repos, None))
    }
}

fn bearer(user_id: Uuid) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
        aud: None,
    };
    let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
    format!("Bearer {}", token)
}

fn tenant_record(rent: i64) -> TenantRecord {
    let tenant = Tenant::new(Uuid::new_v4(), TenantContact::new("Jane Wanjiku", "0712345678").unwrap());
    TenantRecord {
        tenant,
        unit_number: "A1".to_string(),
        rent_amount: Money::new(rent),
        property_id: Uuid::new_v4(),
        property_name: "Sunrise Court".to_string(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, auth: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let response = Mocks::new()
        .into_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_without_database() {
    let response = Mocks::new()
        .into_router()
        .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let response = Mocks::new()
        .into_router()
        .oneshot(Request::builder().uri("/api/v1/payments").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_record_payment_returns_new_balance() {
    let owner = Uuid::new_v4();
    let record = tenant_record(15000);
    let tenant_id = record.tenant.id;

    let mut mocks = Mocks::new();
    mocks
        .tenants
        .expect_find_active()
        .withf(move |o, t| *o == owner && *t == tenant_id)
        .returning(move |_, _| Ok(Some(record.clone())));
    mocks.payments.expect_append().times(1).returning(|payment| {
        Ok(RecordedPayment {
            payment: payment.clone(),
            balance: Money::new(payment.amount.amount() - 15000),
        })
    });

    let response = mocks
        .into_router()
        .oneshot(post_json(
            "/api/v1/payments",
            &bearer(owner),
            json!({ "tenant_id": tenant_id, "amount": 5000, "method": "M-Pesa" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["balance"], -10000);
    assert_eq!(body["data"]["payment"]["method"], "mobile_money");
    assert_eq!(body["meta"]["currency"], "KES");
}

#[tokio::test]
async fn test_payment_history_is_counted() {
    let mut mocks = Mocks::new();
    mocks.payments.expect_list_history().returning(|_| Ok(vec![]));

    let response = mocks
        .into_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/payments")
                .header(header::AUTHORIZATION, bearer(Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"], json!({ "count": 0, "currency": "KES" }));
}

#[tokio::test]
async fn test_payment_above_ceiling_is_rejected() {
    let mut mocks = Mocks::new();
    mocks.tenants.expect_find_active().never();
    mocks.payments.expect_append().never();

    let response = mocks
        .into_router()
        .oneshot(post_json(
            "/api/v1/payments",
            &bearer(Uuid::new_v4()),
            json!({ "tenant_id": Uuid::new_v4(), "amount": i64::MAX / 2 + 1, "method": "cash" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_payment_for_unknown_tenant_is_not_found() {
    let mut mocks = Mocks::new();
    mocks.tenants.expect_find_active().returning(|_, _| Ok(None));
    mocks.payments.expect_append().never();

    let response = mocks
        .into_router()
        .oneshot(post_json(
            "/api/v1/payments",
            &bearer(Uuid::new_v4()),
            json!({ "tenant_id": Uuid::new_v4(), "amount": 5000, "method": "cash" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_payment_bodies() {
    let auth = bearer(Uuid::new_v4());

    let mut mocks = Mocks::new();
    mocks.payments.expect_append().never();
    let router = mocks.into_router();

    let zero = router
        .clone()
        .oneshot(post_json(
            "/api/v1/payments",
            &auth,
            json!({ "tenant_id": Uuid::new_v4(), "amount": 0, "method": "cash" }),
        ))
        .await
        .unwrap();
    assert_eq!(zero.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let malformed = router
        .oneshot(post_json("/api/v1/payments", &auth, json!({ "amount": "lots" })))
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_arrears_csv_download() {
    let record = tenant_record(12000);

    let mut mocks = Mocks::new();
    mocks.units.expect_list_by_owner().returning(|_, _| Ok(vec![]));
    mocks
        .tenants
        .expect_list_active_by_owner()
        .returning(move |_| Ok(vec![record.clone()]));
    mocks.payments.expect_list_by_owner().returning(|_| Ok(vec![]));

    let response = mocks
        .into_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/reports/arrears.csv")
                .header(header::AUTHORIZATION, bearer(Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("keja_zetu_arrears_report.csv"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), "Name,Unit,Arrears\nJane Wanjiku,A1,12000\n");
}
