//! End-to-end form flows through the router with in-memory services

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use spendweb_api::{create_router, AppState};
use spendweb_client::{ApiResponse, Category, CategoryApi, ClientError, ClientResult, PaymentRecord, TransactionApi};
use spendweb_config::{Config, GuardKind};
use spendweb_core::Store;
use tower::ServiceExt;

type Hook = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct FakeExpenses {
    created: Mutex<Vec<String>>,
    category_loads: Mutex<usize>,
    payments: Mutex<Vec<(i64, Decimal, String)>>,
    refuse_create: bool,
    categories_down: bool,
    /// Runs inside the create call, before it resolves
    during_create: Mutex<Option<Hook>>,
}

#[async_trait]
impl CategoryApi for FakeExpenses {
    async fn create_category(&self, name: &str) -> ClientResult<ApiResponse<Category>> {
        self.created.lock().unwrap().push(name.to_string());
        if let Some(hook) = self.during_create.lock().unwrap().take() {
            hook();
        }
        if self.refuse_create {
            return Ok(ApiResponse::failure(""));
        }
        Ok(ApiResponse::ok(
            "Category created",
            Category {
                id: 9,
                category: name.to_string(),
                is_active: true,
                ..Category::default()
            },
        ))
    }

    async fn get_categories(&self) -> ClientResult<ApiResponse<Vec<Category>>> {
        *self.category_loads.lock().unwrap() += 1;
        if self.categories_down {
            return Err(ClientError::Network { message: "connection refused".to_string() });
        }
        let category = |id: i64, name: &str| Category {
            id,
            category: name.to_string(),
            is_active: true,
            ..Category::default()
        };
        Ok(ApiResponse::ok("", vec![category(4, "Travel"), category(2, "Food")]))
    }
}

#[async_trait]
impl TransactionApi for FakeExpenses {
    async fn add_payment_history(
        &self,
        category_id: i64,
        amount: Decimal,
        notes: Option<&str>,
    ) -> ClientResult<ApiResponse<PaymentRecord>> {
        let notes = notes.unwrap_or_default().to_string();
        self.payments.lock().unwrap().push((category_id, amount, notes.clone()));
        Ok(ApiResponse::ok(
            "Payment added",
            PaymentRecord {
                id: 1,
                category_id,
                amount: Some(amount),
                notes: Some(notes),
                ..PaymentRecord::default()
            },
        ))
    }
}

fn app(config: Config, fake: Arc<FakeExpenses>) -> (AppState, Router) {
    let state = AppState::new(config, fake.clone(), fake, Arc::new(Store::new()));
    (state.clone(), create_router(state))
}

async fn send(router: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("hx-request", "true")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Load a form page and pull the mounted view id out of it
async fn mount(router: &Router, page: &str) -> String {
    let (status, html) = send(router, Method::GET, page, "").await;
    assert_eq!(status, StatusCode::OK);
    let marker = format!("{}/", page);
    let start = html.find(&marker).expect("page references its view") + marker.len();
    html[start..start + 36].to_string()
}

#[tokio::test]
async fn test_health() {
    let (_, router) = app(Config::default(), Arc::new(FakeExpenses::default()));
    let (status, body) = send(&router, Method::GET, "/api/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_create_category_flow() {
    let fake = Arc::new(FakeExpenses::default());
    let (_, router) = app(Config::default(), fake.clone());
    let view = mount(&router, "/category/new").await;

    let (status, controls) = send(&router, Method::POST, &format!("/category/new/{}/name", view), "name=Groceries").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!controls.contains(" disabled"));

    let (status, form) = send(&router, Method::POST, &format!("/category/new/{}/submit", view), "name=Groceries").await;
    assert_eq!(status, StatusCode::OK);
    assert!(form.contains("Category created"));
    assert!(form.contains("value=''"));
    assert_eq!(*fake.created.lock().unwrap(), vec!["Groceries".to_string()]);
}

#[tokio::test]
async fn test_blank_category_is_not_sent() {
    let fake = Arc::new(FakeExpenses::default());
    let (_, router) = app(Config::default(), fake.clone());
    let view = mount(&router, "/category/new").await;

    let (status, form) = send(&router, Method::POST, &format!("/category/new/{}/submit", view), "name=+++").await;
    assert_eq!(status, StatusCode::OK);
    assert!(form.contains("Please enter a category name"));
    assert!(fake.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_refusal_without_message_shows_fallback() {
    let fake = Arc::new(FakeExpenses { refuse_create: true, ..FakeExpenses::default() });
    let (_, router) = app(Config::default(), fake);
    let view = mount(&router, "/category/new").await;

    let (_, form) = send(&router, Method::POST, &format!("/category/new/{}/submit", view), "name=Rent").await;
    assert!(form.contains("Failed to create category"));
    assert!(form.contains("value='Rent'"));
}

#[tokio::test]
async fn test_unknown_view_has_expired() {
    let (_, router) = app(Config::default(), Arc::new(FakeExpenses::default()));
    let uri = format!("/category/new/{}/submit", uuid::Uuid::new_v4());
    let (status, body) = send(&router, Method::POST, &uri, "name=Food").await;
    assert_eq!(status, StatusCode::GONE);
    assert!(body.contains("This form has expired. Reload the page."));

    let (status, _) = send(&router, Method::POST, "/category/new/not-a-view/submit", "name=Food").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_result_for_closed_view_is_dropped() {
    let fake = Arc::new(FakeExpenses::default());
    let (state, router) = app(Config::default(), fake.clone());
    let view = mount(&router, "/category/new").await;

    let views = state.views.clone();
    let view_id = uuid::Uuid::parse_str(&view).unwrap();
    *fake.during_create.lock().unwrap() = Some(Box::new(move || {
        views.close(&view_id);
    }));

    let (status, _) = send(&router, Method::POST, &format!("/category/new/{}/submit", view), "name=Food").await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(fake.created.lock().unwrap().len(), 1);
    assert!(state.views.is_empty());
}

#[tokio::test]
async fn test_close_view() {
    let (state, router) = app(Config::default(), Arc::new(FakeExpenses::default()));
    let view = mount(&router, "/payment/new").await;
    assert_eq!(state.views.len(), 1);

    let (status, _) = send(&router, Method::POST, &format!("/views/{}/close", view), "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(state.views.is_empty());
}

#[tokio::test]
async fn test_add_payment_flow() {
    let fake = Arc::new(FakeExpenses::default());
    let (_, router) = app(Config::default(), fake.clone());
    let view = mount(&router, "/payment/new").await;

    let (status, selector) = send(&router, Method::GET, &format!("/payment/new/{}/categories", view), "").await;
    assert_eq!(status, StatusCode::OK);
    let travel = selector.find("Travel").unwrap();
    let food = selector.find("Food").unwrap();
    assert!(travel < food);

    // A second load request reuses the first result
    send(&router, Method::GET, &format!("/payment/new/{}/categories", view), "").await;
    assert_eq!(*fake.category_loads.lock().unwrap(), 1);

    let (_, dropped) = send(&router, Method::POST, &format!("/payment/new/{}/amount", view), "amount=12a").await;
    assert!(dropped.contains("hx-swap-oob='true'"));

    let body = "category_id=2&amount=25.50&notes=+team+lunch+";
    let (status, form) = send(&router, Method::POST, &format!("/payment/new/{}/submit", view), body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(form.contains("Payment added"));
    assert_eq!(
        *fake.payments.lock().unwrap(),
        vec![(2, Decimal::from_str("25.50").unwrap(), "team lunch".to_string())]
    );
    assert!(form.contains("<option value='' selected>Select a category</option>"));
}

#[tokio::test]
async fn test_invalid_payment_is_not_sent() {
    let fake = Arc::new(FakeExpenses::default());
    let (_, router) = app(Config::default(), fake.clone());
    let view = mount(&router, "/payment/new").await;
    send(&router, Method::GET, &format!("/payment/new/{}/categories", view), "").await;

    let submit = format!("/payment/new/{}/submit", view);
    let (_, form) = send(&router, Method::POST, &submit, "category_id=&amount=10").await;
    assert!(form.contains("Please select a category"));

    let (_, form) = send(&router, Method::POST, &submit, "category_id=4&amount=0").await;
    assert!(form.contains("Please enter a valid amount greater than 0"));

    let (_, form) = send(&router, Method::POST, &submit, "category_id=99&amount=5").await;
    assert!(form.contains("Please select a category"));

    assert!(fake.payments.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_category_load_failure_is_shown() {
    let fake = Arc::new(FakeExpenses { categories_down: true, ..FakeExpenses::default() });
    let (_, router) = app(Config::default(), fake);
    let view = mount(&router, "/payment/new").await;

    let (status, body) = send(&router, Method::GET, &format!("/payment/new/{}/categories", view), "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to load categories"));
    assert!(body.contains("hx-swap='outerHTML' disabled"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (_, router) = app(Config::default(), Arc::new(FakeExpenses::default()));
    let (status, body) = send(&router, Method::GET, "/reports", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));

    let (status, _) = send(&router, Method::GET, "/login", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_guard_when_enforced() {
    let mut config = Config::default();
    config.auth.enforce = true;
    config.auth.guard = GuardKind::SessionToken;
    let (_, router) = app(config, Arc::new(FakeExpenses::default()));

    let request = Request::builder().uri("/payment/new").body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login?from=%2Fpayment%2Fnew"
    );

    let request = Request::builder()
        .uri("/payment/new")
        .header(header::COOKIE, "auth_token=abc")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/category/new/{}/submit", uuid::Uuid::new_v4());
    let (status, _) = send(&router, Method::POST, &uri, "name=Food").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Home and health stay open
    let (status, _) = send(&router, Method::GET, "/", "").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_guard_not_applied_by_default() {
    let mut config = Config::default();
    config.auth.guard = GuardKind::SessionToken;
    let (_, router) = app(config, Arc::new(FakeExpenses::default()));
    let (status, _) = send(&router, Method::GET, "/category/new", "").await;
    assert_eq!(status, StatusCode::OK);
}
