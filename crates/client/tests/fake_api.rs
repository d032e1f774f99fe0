use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use content_admin_auth::{MemoryTokenStore, TokenStore};
use content_admin_client::{ApiClient, ApiClientConfig, ClientError, ProductApi};
use content_admin_core::{CompanyId, ProductId};
use content_admin_products::{
    CreateProductRequest, ImageSelection, MAX_IMAGE_BYTES, PostingPeriodType, UpdateProductRequest,
};

#[derive(Debug, Clone)]
struct Upload {
    company_id: Option<String>,
    field: String,
    file_name: Option<String>,
    content_type: Option<String>,
    size: usize,
}

#[derive(Debug, Default)]
struct FakeState {
    products: Vec<Value>,
    required_token: Option<String>,
    reject_product_image_key: bool,
    wrap_records: bool,
    list_override: Option<Value>,
    auth_headers: Vec<Option<String>>,
    create_bodies: Vec<Value>,
    uploads: Vec<Upload>,
}

type Shared = Arc<Mutex<FakeState>>;

fn check_auth(state: &Shared, headers: &HeaderMap) -> Result<(), Response> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut guard = state.lock().unwrap();
    guard.auth_headers.push(header.clone());

    match &guard.required_token {
        Some(token) if header.as_deref() != Some(format!("Bearer {token}").as_str()) => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized", "message": "missing or bad token" })),
        )
            .into_response()),
        _ => Ok(()),
    }
}

fn record_response(state: &FakeState, status: StatusCode, record: Value) -> Response {
    if state.wrap_records {
        (status, Json(json!({ "success": true, "message": "ok", "data": record }))).into_response()
    } else {
        (status, Json(record)).into_response()
    }
}

async fn list_products(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let guard = state.lock().unwrap();
    let body = guard.list_override.clone().unwrap_or_else(|| {
        json!({ "success": true, "message": "ok", "data": { "items": guard.products } })
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn create_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    guard.create_bodies.push(body.clone());

    if guard.reject_product_image_key && body.get("productImageKey").is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "validation_error", "message": "productImageKey should not exist" })),
        )
            .into_response();
    }

    body["id"] = json!(uuid::Uuid::now_v7().to_string());
    body["createdAt"] = json!("2024-05-01T09:00:00.000Z");
    guard.products.push(body.clone());

    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "created", "data": body })),
    )
        .into_response()
}

async fn get_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let guard = state.lock().unwrap();
    match guard.products.iter().find(|p| p["id"] == id) {
        Some(record) => record_response(&guard, StatusCode::OK, record.clone()),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not_found" }))).into_response(),
    }
}

async fn update_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    let Some(record) = guard.products.iter_mut().find(|p| p["id"] == id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "not_found" }))).into_response();
    };
    if let (Some(target), Some(patch)) = (record.as_object_mut(), body.as_object()) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
    let updated = record.clone();
    record_response(&guard, StatusCode::OK, updated)
}

async fn delete_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    let before = guard.products.len();
    guard.products.retain(|p| p["id"] != id);
    if guard.products.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "not_found" }))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn upload_image(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }

    let mut last_name = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap();

        last_name = file_name.clone().unwrap_or_default();
        state.lock().unwrap().uploads.push(Upload {
            company_id: query.get("companyId").cloned(),
            field: field_name,
            file_name,
            content_type,
            size: bytes.len(),
        });
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "uploaded",
            "data": {
                "key": format!("uploads/{last_name}"),
                "imageUrl": format!("http://cdn.test/uploads/{last_name}")
            }
        })),
    )
        .into_response()
}

struct TestServer {
    base_url: String,
    state: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(state: FakeState) -> Self {
        let state: Shared = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route("/products/upload-image", post(upload_image))
            .route(
                "/products/:id",
                get(get_product).put(update_product).delete(delete_product),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, state, handle }
    }

    fn client(&self, token: Option<&str>) -> ApiClient {
        let tokens: Arc<dyn TokenStore> = match token {
            Some(t) => Arc::new(MemoryTokenStore::with_token(t)),
            None => Arc::new(MemoryTokenStore::new()),
        };
        ApiClient::new(
            ApiClientConfig {
                base_url: format!("{}/", self.base_url),
                upload_company_id: CompanyId::from_raw("HaneulM"),
            },
            tokens,
        )
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn seeded(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "<p>body</p>",
        "phoneNumber": "010-1234-5678",
        "startDate": "2024-01-01",
        "endDate": "2024-12-31",
        "postingPeriodType": "DAILY",
        "isActive": true,
        "productImageKey": "img-1",
        "companyId": "c-1"
    })
}

fn create_request() -> CreateProductRequest {
    CreateProductRequest {
        title: "New listing".into(),
        content: "<p>Hello</p>".into(),
        phone_number: "010-0000-0000".into(),
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        posting_period_type: PostingPeriodType::Weekly,
        is_active: true,
        logo_image_key: Some("uploads/a.png".into()),
        product_image_key: Some("uploads/a.png".into()),
        key: None,
        company_id: CompanyId::from_raw("89d2e726-383e-448d-ba26-70fb7f77c6c3"),
    }
}

#[tokio::test]
async fn list_reads_nested_items_and_sends_bearer_token() {
    let srv = TestServer::spawn(FakeState {
        products: vec![seeded("1", "First"), seeded("2", "Second")],
        required_token: Some("secret".into()),
        ..FakeState::default()
    })
    .await;

    let products = srv.client(Some("secret")).list_products().await.unwrap();

    let titles: Vec<&str> = products.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
    let headers = srv.state.lock().unwrap().auth_headers.clone();
    assert_eq!(headers, vec![Some("Bearer secret".to_string())]);
}

#[tokio::test]
async fn anonymous_client_sends_no_authorization_header() {
    let srv = TestServer::spawn(FakeState {
        required_token: Some("secret".into()),
        ..FakeState::default()
    })
    .await;

    let err = srv.client(None).list_products().await.unwrap_err();

    assert!(err.is_unauthorized(), "expected 401, got {err:?}");
    assert_eq!(srv.state.lock().unwrap().auth_headers, vec![None]);
}

#[tokio::test]
async fn token_swapped_at_runtime_is_used_by_next_request() {
    let srv = TestServer::spawn(FakeState::default()).await;
    let client = srv.client(Some("first"));

    client.list_products().await.unwrap();
    client.tokens().set_token("second");
    client.list_products().await.unwrap();

    let headers = srv.state.lock().unwrap().auth_headers.clone();
    assert_eq!(
        headers,
        vec![Some("Bearer first".to_string()), Some("Bearer second".to_string())]
    );
}

#[tokio::test]
async fn unexpected_list_shape_yields_empty_list() {
    let srv = TestServer::spawn(FakeState {
        list_override: Some(json!({ "success": true, "data": [] })),
        ..FakeState::default()
    })
    .await;

    let products = srv.client(Some("t")).list_products().await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn get_product_accepts_bare_and_wrapped_records() {
    let srv = TestServer::spawn(FakeState {
        products: vec![seeded("p-1", "Bare")],
        ..FakeState::default()
    })
    .await;
    let client = srv.client(Some("t"));
    let id = ProductId::from_raw("p-1");

    assert_eq!(client.get_product(&id).await.unwrap().title, "Bare");

    srv.state.lock().unwrap().wrap_records = true;
    let product = client.get_product(&id).await.unwrap();
    assert_eq!(product.title, "Bare");
    assert_eq!(product.image_key(), Some("img-1"));
}

#[tokio::test]
async fn get_missing_product_is_not_found() {
    let srv = TestServer::spawn(FakeState::default()).await;
    let err = srv
        .client(Some("t"))
        .get_product(&ProductId::from_raw("nope"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn create_uses_product_image_key_first() {
    let srv = TestServer::spawn(FakeState::default()).await;

    let created = srv
        .client(Some("t"))
        .create_product_with_fallback(&create_request())
        .await
        .unwrap();

    assert_eq!(created.title, "New listing");
    assert!(!created.id.is_empty());
    let bodies = srv.state.lock().unwrap().create_bodies.clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["productImageKey"], "uploads/a.png");
    assert_eq!(bodies[0]["logoImageKey"], "uploads/a.png");
    assert_eq!(bodies[0]["startDate"], "2024-06-01");
    assert_eq!(bodies[0]["postingPeriodType"], "WEEKLY");
}

#[tokio::test]
async fn create_falls_back_to_key_field_when_rejected() {
    let srv = TestServer::spawn(FakeState {
        reject_product_image_key: true,
        ..FakeState::default()
    })
    .await;

    let created = srv
        .client(Some("t"))
        .create_product_with_fallback(&create_request())
        .await
        .unwrap();

    assert_eq!(created.title, "New listing");
    let bodies = srv.state.lock().unwrap().create_bodies.clone();
    assert_eq!(bodies.len(), 2);
    assert!(bodies[0].get("productImageKey").is_some());
    assert_eq!(bodies[1]["key"], "uploads/a.png");
    assert!(bodies[1].get("productImageKey").is_none());
}

#[tokio::test]
async fn create_reports_second_error_when_both_shapes_fail() {
    let srv = TestServer::spawn(FakeState {
        required_token: Some("right".into()),
        ..FakeState::default()
    })
    .await;

    let err = srv
        .client(Some("wrong"))
        .create_product_with_fallback(&create_request())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(srv.state.lock().unwrap().auth_headers.len(), 2);
}

#[tokio::test]
async fn update_then_delete() {
    let srv = TestServer::spawn(FakeState {
        products: vec![seeded("p-1", "Before")],
        ..FakeState::default()
    })
    .await;
    let client = srv.client(Some("t"));
    let id = ProductId::from_raw("p-1");

    let update = UpdateProductRequest {
        title: Some("After".into()),
        is_active: Some(false),
        ..UpdateProductRequest::default()
    };
    let updated = client.update_product(&id, &update).await.unwrap().unwrap();
    assert_eq!(updated.title, "After");
    assert!(!updated.is_active);
    assert_eq!(updated.phone_number, "010-1234-5678");

    client.delete_product(&id).await.unwrap();
    assert!(client.get_product(&id).await.unwrap_err().is_not_found());
    assert!(client.delete_product(&id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn upload_sends_multipart_image_with_company_query() {
    let srv = TestServer::spawn(FakeState::default()).await;

    let selection = ImageSelection::new("cat.png", "image/png", vec![7; 1024]);
    let uploaded = srv.client(Some("t")).upload_image(&selection).await.unwrap();

    assert_eq!(uploaded.key, "uploads/cat.png");
    assert_eq!(uploaded.url, "http://cdn.test/uploads/cat.png");

    let uploads = srv.state.lock().unwrap().uploads.clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].company_id.as_deref(), Some("HaneulM"));
    assert_eq!(uploads[0].field, "image");
    assert_eq!(uploads[0].file_name.as_deref(), Some("cat.png"));
    assert_eq!(uploads[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(uploads[0].size, 1024);
}

#[tokio::test]
async fn oversized_upload_is_rejected_locally() {
    let srv = TestServer::spawn(FakeState::default()).await;

    let selection = ImageSelection::new("big.png", "image/png", vec![0; MAX_IMAGE_BYTES + 1]);
    let err = srv.client(Some("t")).upload_image(&selection).await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidImage(_)));
    assert!(srv.state.lock().unwrap().auth_headers.is_empty());
}

#[tokio::test]
async fn connection_probe_reports_unreachable_api() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(
        ApiClientConfig {
            base_url: format!("http://{addr}"),
            upload_company_id: CompanyId::from_raw("HaneulM"),
        },
        Arc::new(MemoryTokenStore::new()),
    );

    assert!(!client.test_connection().await);
    assert!(matches!(client.list_products().await, Err(ClientError::Network(_))));
}

#[tokio::test]
async fn connection_probe_succeeds_against_live_api() {
    let srv = TestServer::spawn(FakeState::default()).await;
    assert!(srv.client(Some("t")).test_connection().await);
}
