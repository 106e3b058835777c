//! Integration test helpers
//!
//! Spins up a small in-process panel server so the client can be exercised
//! against real HTTP, including the login form round trip and 401 handling.

#![allow(dead_code)]

use axum::{
    extract::{Form, Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use trackboard_client::{ApiClientConfig, AuthService, MemorySessionStore, PanelApiClient};
use trackboard_core::Navigator;

pub const TEST_USER: &str = "ayse";
pub const TEST_PASSWORD: &str = "s3cret";
pub const TEST_TOKEN: &str = "tok-123";

/// In-process panel server bound to an ephemeral port
pub struct TestPanel {
    pub base_url: String,
}

impl TestPanel {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let app = panel_router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server died");
        });

        Self {
            base_url: format!("http://{}/api", addr),
        }
    }

    pub fn client_config(&self) -> ApiClientConfig {
        ApiClientConfig::new(self.base_url.clone()).with_timeout(5)
    }
}

/// Navigator that counts invocations
#[derive(Default)]
pub struct RecordingNavigator {
    hits: AtomicUsize,
}

impl RecordingNavigator {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn to_login(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

/// Everything a test needs wired against one panel instance
pub struct TestHarness {
    pub panel: TestPanel,
    pub store: Arc<MemorySessionStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub auth: AuthService,
    pub api: PanelApiClient,
}

impl TestHarness {
    pub async fn new() -> Self {
        let panel = TestPanel::spawn().await;
        let store = Arc::new(MemorySessionStore::new());
        let navigator = Arc::new(RecordingNavigator::default());

        let auth = AuthService::new(
            &panel.client_config(),
            store.clone(),
            navigator.clone(),
        )
        .expect("Failed to build auth service");

        let api = PanelApiClient::new(panel.client_config(), store.clone(), navigator.clone())
            .expect("Failed to build api client");

        Self {
            panel,
            store,
            navigator,
            auth,
            api,
        }
    }

    pub async fn login(&self) {
        self.auth
            .login(TEST_USER, TEST_PASSWORD)
            .await
            .expect("Test login failed");
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TEST_TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
        .into_response()
}

async fn login(Form(form): Form<LoginForm>) -> Response {
    if form.username == TEST_USER && form.password == TEST_PASSWORD {
        Json(json!({
            "access_token": TEST_TOKEN,
            "token_type": "bearer",
            "role": "employee"
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect username or password"})),
        )
            .into_response()
    }
}

/// Echoes back the authorization header the server saw, always 200
async fn echo_auth(headers: HeaderMap) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "authorization": auth })).into_response()
}

async fn dashboard(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({
        "quota": 20,
        "assigned_accounts": [
            {"id": 1, "username": "acct_one", "password": "pw1"},
            {"id": 2, "username": "acct_two", "password": "pw2"}
        ]
    }))
    .into_response()
}

async fn list_employees(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "id": 1,
            "full_name": "Ayse Yilmaz",
            "user_name": "ayse",
            "visible_password": "s3cret",
            "account_quota": 20,
            "assigned_count": 2
        },
        {
            "id": 2,
            "full_name": "Mehmet Demir",
            "user_name": "mehmet",
            "visible_password": null,
            "account_quota": 0,
            "assigned_count": 0
        }
    ]))
    .into_response()
}

async fn employee_detail(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    if id != 1 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Employee not found"})),
        )
            .into_response();
    }
    Json(json!({
        "id": 1,
        "full_name": "Ayse Yilmaz",
        "user_name": "ayse",
        "assigned_accounts": [
            {"id": 1, "username": "acct_one", "password": "pw1"}
        ]
    }))
    .into_response()
}

async fn add_quota(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let amount = body["amount"].as_i64().unwrap_or(0);
    Json(json!({"status": "success", "new_quota": 20 + amount})).into_response()
}

async fn submit_report(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    // Account 2 already has a report for today
    if body["account_id"].as_i64() == Some(2) {
        Json(json!({"status": "updated"})).into_response()
    } else {
        Json(json!({"status": "success"})).into_response()
    }
}

async fn all_reports(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    // Rows only appear once a range is requested, proving the query got through
    if params.contains_key("start_date") {
        Json(json!([
            {
                "id": 5,
                "date": "2026-08-24",
                "employee_name": "Ayse Yilmaz",
                "account_username": "acct_one",
                "count": 900,
                "locked": false
            }
        ]))
        .into_response()
    } else {
        Json(json!([])).into_response()
    }
}

async fn get_note() -> Response {
    Json(json!({
        "content": "Backup runs at 02:00",
        "author": "admin",
        "updated_at": "2026-08-24T10:30:00"
    }))
    .into_response()
}

async fn set_note(headers: HeaderMap, Json(_body): Json<serde_json::Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({"status": "success"})).into_response()
}

async fn delete_account(headers: HeaderMap, Path(_id): Path<i64>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({"status": "success"})).into_response()
}

async fn update_account(
    headers: HeaderMap,
    Path(_id): Path<i64>,
    Json(_body): Json<serde_json::Value>,
) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({"status": "success"})).into_response()
}

async fn my_accounts(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!([
        {"id": 1, "username": "acct_one"},
        {"id": 2, "username": "acct_two"}
    ]))
    .into_response()
}

/// Quota in the mock leaves room for three more accounts
async fn bulk_accounts(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let submitted = body["accounts"].as_array().map(Vec::len).unwrap_or(0);
    if submitted > 3 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Quota exceeded: 3 slots remaining"})),
        )
            .into_response();
    }
    Json(json!({"status": "success"})).into_response()
}

async fn today_reports(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!([
        {"account_id": 1, "count": 900, "locked": false},
        {"account_id": 2, "count": 450, "locked": true}
    ]))
    .into_response()
}

async fn my_downloads(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({
        "total_downloads": 120,
        "recent_activity": [
            {"start_date": "2026-08-18", "end_date": "2026-08-24", "count": 40}
        ]
    }))
    .into_response()
}

async fn employee_chart(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({
        "labels": ["2026-08-23", "2026-08-24"],
        "data": [10, 12]
    }))
    .into_response()
}

async fn admin_chart(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({
        "labels": ["2026-08-24"],
        "data": [52]
    }))
    .into_response()
}

async fn create_employee(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let username = body["username"].as_str().unwrap_or("?");
    Json(json!({
        "status": "success",
        "msg": format!("Employee {} created", username)
    }))
    .into_response()
}

async fn delete_employee(headers: HeaderMap, Path(_id): Path<i64>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({"status": "success"})).into_response()
}

async fn reset_password(headers: HeaderMap, Json(_body): Json<serde_json::Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({"status": "success", "msg": "Password reset"})).into_response()
}

/// Set semantics: the amount becomes the quota
async fn update_quota(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let amount = body["amount"].as_i64().unwrap_or(0);
    Json(json!({"status": "success", "new_quota": amount})).into_response()
}

async fn create_account(headers: HeaderMap, Json(_body): Json<serde_json::Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({"status": "success"})).into_response()
}

/// Employee 1 gets accounts from a pool of four; everyone else finds it empty
async fn assign_accounts(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    if body["employee_id"].as_i64() == Some(1) {
        let limit = body["limit"].as_i64().unwrap_or(10);
        Json(json!({"status": "success", "count": limit.min(4)})).into_response()
    } else {
        Json(json!({"status": "info", "msg": "No unassigned accounts"})).into_response()
    }
}

async fn daily_summary(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({
        "date": "2026-08-24",
        "total_followers": 1350,
        "reports": [
            {"employee_name": "Ayse Yilmaz", "account": "acct_one", "count": 900, "locked": false},
            {"employee_name": "Ayse Yilmaz", "account": "acct_two", "count": 450, "locked": true}
        ],
        "downloads_by_date": [
            {"date": "2026-08-24", "count": 12}
        ]
    }))
    .into_response()
}

async fn download_stats(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    // Range total shrinks once a range is requested, proving the query got through
    let range_total = if params.contains_key("start_date") { 40 } else { 120 };
    Json(json!({
        "total_downloads": 120,
        "total_accounts": 40,
        "range_total": range_total,
        "best_employee": "Ayse Yilmaz",
        "employees": [
            {
                "id": 1,
                "full_name": "Ayse Yilmaz",
                "user_name": "ayse",
                "total_downloads": 120,
                "range_downloads": range_total
            }
        ]
    }))
    .into_response()
}

async fn add_download_record(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let count = body["count"].as_i64().unwrap_or(0);
    Json(json!({"status": "success", "new_total": 120 + count})).into_response()
}

async fn audit_logs(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let entries = vec![
        json!({
            "id": 3,
            "username": "admin",
            "action": "login",
            "details": "Successful login",
            "ip_address": "10.0.0.5",
            "timestamp": "2026-08-24 10:30:00"
        }),
        json!({
            "id": 2,
            "username": "ayse",
            "action": "report_submit",
            "details": "account 1: 900",
            "ip_address": null,
            "timestamp": "2026-08-24 09:15:00"
        }),
        json!({
            "id": 1,
            "username": "ayse",
            "action": "login",
            "details": "Successful login",
            "ip_address": "10.0.0.9",
            "timestamp": "2026-08-24 09:00:00"
        }),
    ];
    let limit = params
        .get("limit")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(entries.len());
    Json(serde_json::Value::Array(
        entries.into_iter().take(limit).collect(),
    ))
    .into_response()
}

fn panel_router() -> Router {
    let api = Router::new()
        .route("/login", post(login))
        .route("/echo-auth", get(echo_auth))
        .route("/employee/dashboard", get(dashboard))
        .route("/employee/accounts", get(my_accounts))
        .route("/employee/accounts/bulk", post(bulk_accounts))
        .route("/employee/accounts/{id}", put(update_account))
        .route("/employee/reports", post(submit_report))
        .route("/employee/reports/today", get(today_reports))
        .route("/employee/downloads", get(my_downloads))
        .route("/employee/chart-data", get(employee_chart))
        .route("/admin/employees", get(list_employees).post(create_employee))
        .route(
            "/admin/employees/{id}",
            get(employee_detail).delete(delete_employee),
        )
        .route("/admin/reset-password", post(reset_password))
        .route("/admin/accounts", post(create_account))
        .route("/admin/accounts/{id}", delete(delete_account))
        .route("/admin/add-quota", post(add_quota))
        .route("/admin/update-quota", post(update_quota))
        .route("/admin/assign-accounts", post(assign_accounts))
        .route("/admin/daily-summary", get(daily_summary))
        .route("/admin/reports", get(all_reports))
        .route("/admin/logs", get(audit_logs))
        .route("/admin/download-stats", get(download_stats))
        .route("/admin/download-records", post(add_download_record))
        .route("/admin/chart-data", get(admin_chart))
        .route("/general/note", get(get_note))
        .route("/admin/note", post(set_note));

    Router::new().nest("/api", api)
}
