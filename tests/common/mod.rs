//! In-process fake of the marketplace REST backend.
//!
//! Serves the endpoints the client calls from a mutable in-memory state so
//! tests can drive the real `reqwest` stack end to end.

#![allow(dead_code)]

use axum::{
    extract::{Multipart, Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use gigfinder_client::config::Config;
use gigfinder_client::session::{AppKind, MemorySessionStore};
use gigfinder_client::AppState;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub const CLIENT_TOKEN: &str = "client-token";
pub const WORKER_TOKEN: &str = "worker-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const PASSWORD: &str = "secret";
pub const LOGIN_OTP: &str = "123456";
pub const COMPLETION_OTP: &str = "4321";
pub const WORKER_ID: i64 = 2;

pub struct Backend {
    pub users: Vec<Value>,
    pub categories: Vec<Value>,
    pub jobs: Vec<Value>,
    pub pending_workers: Vec<Value>,
    pub verified_workers: Vec<Value>,
    pub reports: Vec<Value>,
    pub proofs: Vec<i64>,
    pub otp_verified: Vec<i64>,
    /// Bearer token of every authenticated request, in arrival order.
    pub seen_tokens: Vec<Option<String>>,
    pub fail_dashboard: bool,
    pub fail_categories: bool,
    pub fail_upload: bool,
    pub slow_users: bool,
    next_id: i64,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            users: vec![
                json!({ "id": 1, "name": "Asha Client", "email": "client@example.com", "role": "CLIENT", "banned": false }),
                json!({ "id": 2, "name": "Ravi Worker", "phone": "7000000001", "role": "WORKER", "banned": false }),
                json!({ "id": 3, "name": "Ops Admin", "email": "admin@example.com", "role": "ADMIN", "banned": false }),
            ],
            categories: vec![
                json!({ "id": 1, "name": "Plumbing" }),
                json!({ "id": 2, "name": "Cleaning" }),
            ],
            jobs: vec![
                json!({ "id": 3, "title": "Deep clean", "status": "IN_PROGRESS", "budget": 1200, "address": "Mumbai", "workerId": WORKER_ID, "categoryName": "Cleaning", "createdAt": "2024-03-03T10:00:00Z" }),
                json!({ "id": 2, "title": "Fix fan", "status": "ASSIGNED", "budget": 300, "address": "Delhi", "workerId": WORKER_ID, "categoryName": "Electrical", "createdAt": "2024-03-02T10:00:00" }),
                json!({ "id": 1, "title": "Paint wall", "status": "OPEN", "budget": 800, "address": "Pune", "categoryName": "Painting", "createdAt": "2024-03-01T10:00:00Z" }),
            ],
            pending_workers: vec![json!({
                "id": 11,
                "name": "Kiran",
                "phone": "7000000011",
                "verificationStatus": "PENDING",
                "documents": [{ "id": 1, "type": "AADHAAR", "fileUrl": "/uploads/a.png", "verificationStatus": "PENDING" }]
            })],
            verified_workers: vec![
                json!({ "id": 21, "userId": WORKER_ID, "name": "Ravi Worker", "phone": "7000000001" }),
                json!({ "id": 22, "userId": 5, "name": "Meena", "phone": "7000000005" }),
            ],
            reports: vec![json!({
                "id": 1,
                "reportedUser": "Ravi Worker",
                "reason": "No show",
                "status": "OPEN",
                "createdAt": "2024-03-04T09:30:00Z"
            })],
            proofs: Vec::new(),
            otp_verified: Vec::new(),
            seen_tokens: Vec::new(),
            fail_dashboard: false,
            fail_categories: false,
            fail_upload: false,
            slow_users: false,
            next_id: 100,
        }
    }
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct TestServer {
    pub base_url: String,
    pub backend: Shared,
}

impl TestServer {
    pub async fn start() -> Self {
        let backend: Shared = Arc::new(Mutex::new(Backend::default()));
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let app = router(backend.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        Self {
            base_url: format!("http://{}", addr),
            backend,
        }
    }

    pub fn config(&self) -> Config {
        Config::new(&self.base_url).expect("config")
    }

    /// App state over a memory session store, so tests never touch disk.
    pub fn state(&self, kind: AppKind) -> AppState {
        AppState::with_store(self.config(), kind, Arc::new(MemorySessionStore::new()))
            .expect("state")
    }

    pub fn state_with_store(&self, kind: AppKind, store: Arc<MemorySessionStore>) -> AppState {
        AppState::with_store(self.config(), kind, store).expect("state")
    }

    pub fn last_token(&self) -> Option<String> {
        self.backend.lock().seen_tokens.last().cloned().flatten()
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/send-otp", post(send_otp))
        .route("/api/auth/verify-otp", post(verify_otp))
        .route("/api/jobs", post(create_job))
        .route("/api/jobs/categories", get(job_categories))
        .route("/api/jobs/me", get(my_jobs))
        .route("/api/jobs/worker/nearby", get(nearby_jobs))
        .route("/api/jobs/:id/:action", put(job_action))
        .route("/api/jobs/:id/complete/verify-otp", post(verify_completion))
        .route("/api/upload/job-proof", post(upload_proof))
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/dashboard", get(admin_dashboard))
        .route("/api/admin/jobs/heatmap", get(admin_heatmap))
        .route("/api/admin/jobs", get(admin_jobs))
        .route("/api/admin/jobs/:id/reassign", post(admin_reassign))
        .route("/api/admin/users", get(admin_users))
        .route("/api/admin/users/:id/:action", post(admin_user_action))
        .route("/api/admin/workers/pending", get(admin_pending_workers))
        .route("/api/admin/workers/verified", get(admin_verified_workers))
        .route("/api/admin/workers/leaderboard", get(admin_leaderboard))
        .route("/api/admin/workers/:id/:action", post(admin_worker_action))
        .route("/api/admin/fraud/reports", get(admin_reports))
        .route(
            "/api/admin/categories",
            get(admin_categories).post(admin_create_category),
        )
        .route(
            "/api/admin/categories/:id",
            put(admin_rename_category).delete(admin_delete_category),
        )
        .with_state(state)
}

type Reply = Result<Json<Value>, Response>;

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn require(state: &Shared, headers: &HeaderMap, allowed: &[&str]) -> Result<String, Response> {
    let token = bearer(headers);
    state.lock().seen_tokens.push(token.clone());
    match token {
        Some(t) if allowed.contains(&t.as_str()) => Ok(t),
        Some(_) => Err(error(StatusCode::FORBIDDEN, "Access denied")),
        None => Err(error(StatusCode::UNAUTHORIZED, "Missing token")),
    }
}

const ANY_USER: &[&str] = &[CLIENT_TOKEN, WORKER_TOKEN, ADMIN_TOKEN];
const ADMIN_ONLY: &[&str] = &[ADMIN_TOKEN];

async fn login(Json(body): Json<Value>) -> Reply {
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"] != PASSWORD {
        return Err(error(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }
    let (token, user) = if email.starts_with("worker") {
        (WORKER_TOKEN, json!({ "id": WORKER_ID, "name": "Ravi Worker", "email": email, "role": "WORKER" }))
    } else {
        (CLIENT_TOKEN, json!({ "id": 1, "name": "Asha Client", "email": email, "role": "CLIENT" }))
    };
    Ok(Json(json!({ "token": token, "user": user })))
}

async fn send_otp(Json(body): Json<Value>) -> Reply {
    if body["phoneNumber"].as_str().unwrap_or_default().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Phone number is required"));
    }
    Ok(Json(json!({ "message": "OTP sent", "otp": LOGIN_OTP })))
}

async fn verify_otp(Json(body): Json<Value>) -> Reply {
    if body["otp"] != LOGIN_OTP {
        return Err(error(StatusCode::BAD_REQUEST, "Invalid OTP"));
    }
    Ok(Json(json!({
        "token": WORKER_TOKEN,
        "user": { "id": WORKER_ID, "name": "Ravi Worker", "phone": body["phoneNumber"], "role": "WORKER" }
    })))
}

async fn admin_login(Json(body): Json<Value>) -> Reply {
    if body["password"] != PASSWORD {
        return Err(error(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }
    Ok(Json(json!({ "token": ADMIN_TOKEN })))
}

async fn job_categories(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, ANY_USER)?;
    if state.lock().fail_categories {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "Catalog unavailable"));
    }
    Ok(Json(json!({
        "Plumbing": ["Fix tap", "Unclog drain"],
        "Cleaning": ["Deep clean"]
    })))
}

async fn my_jobs(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let token = require(&state, &headers, ANY_USER)?;
    let backend = state.lock();
    let jobs: Vec<Value> = if token == WORKER_TOKEN {
        backend
            .jobs
            .iter()
            .filter(|j| j["workerId"] == WORKER_ID)
            .cloned()
            .collect()
    } else {
        backend.jobs.clone()
    };
    Ok(Json(Value::Array(jobs)))
}

async fn nearby_jobs(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, &[WORKER_TOKEN, ADMIN_TOKEN])?;
    let backend = state.lock();
    let jobs: Vec<Value> = backend
        .jobs
        .iter()
        .filter(|j| j["status"] == "OPEN")
        .cloned()
        .collect();
    Ok(Json(Value::Array(jobs)))
}

async fn create_job(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    require(&state, &headers, &[CLIENT_TOKEN, ADMIN_TOKEN])?;
    let title = body["title"].as_str().unwrap_or_default().trim().to_string();
    if title.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Title is required"));
    }
    let mut backend = state.lock();
    backend.next_id += 1;
    let job = json!({
        "id": backend.next_id,
        "title": title,
        "description": body["description"],
        "status": "OPEN",
        "budget": body["budget"],
        "address": body["address"],
        "clientName": "Asha Client",
        "createdAt": "2024-03-05T12:00:00Z"
    });
    backend.jobs.insert(0, job.clone());
    Ok(Json(job))
}

async fn job_action(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, action)): Path<(i64, String)>,
) -> Reply {
    require(&state, &headers, &[WORKER_TOKEN, ADMIN_TOKEN])?;
    let mut backend = state.lock();
    let verified = backend.otp_verified.contains(&id);
    let job = backend
        .jobs
        .iter_mut()
        .find(|j| j["id"] == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Job not found"))?;

    let (from, to) = match action.as_str() {
        "accept" => ("OPEN", "ASSIGNED"),
        "on-the-way" => ("ASSIGNED", "ASSIGNED"),
        "start" => ("ASSIGNED", "IN_PROGRESS"),
        "complete" => ("IN_PROGRESS", "COMPLETED"),
        _ => return Err(error(StatusCode::NOT_FOUND, "Unknown action")),
    };
    if job["status"] != from {
        return Err(error(StatusCode::BAD_REQUEST, "Invalid status transition"));
    }
    if action == "complete" && !verified {
        return Err(error(StatusCode::BAD_REQUEST, "Completion OTP not verified"));
    }
    job["status"] = json!(to);
    if action == "accept" {
        job["workerId"] = json!(WORKER_ID);
    }
    Ok(Json(json!("Status updated")))
}

async fn upload_proof(State(state): State<Shared>, headers: HeaderMap, mut multipart: Multipart) -> Reply {
    require(&state, &headers, &[WORKER_TOKEN])?;
    if state.lock().fail_upload {
        return Err(error(StatusCode::PAYLOAD_TOO_LARGE, "File too large"));
    }
    let mut job_id = None;
    let mut has_file = false;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("jobId") => job_id = field.text().await.ok().and_then(|t| t.parse::<i64>().ok()),
            Some("file") => has_file = field.bytes().await.map(|b| !b.is_empty()).unwrap_or(false),
            _ => {}
        }
    }
    match (job_id, has_file) {
        (Some(id), true) => {
            state.lock().proofs.push(id);
            Ok(Json(json!({ "url": format!("/uploads/proof-{}.jpg", id) })))
        }
        _ => Err(error(StatusCode::BAD_REQUEST, "file and jobId are required")),
    }
}

async fn verify_completion(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    require(&state, &headers, &[WORKER_TOKEN])?;
    let mut backend = state.lock();
    if !backend.proofs.contains(&id) {
        return Err(error(StatusCode::BAD_REQUEST, "Upload proof first"));
    }
    if body["otp"] != COMPLETION_OTP {
        return Err(error(StatusCode::BAD_REQUEST, "Invalid OTP"));
    }
    backend.otp_verified.push(id);
    Ok(Json(json!({ "message": "OTP verified" })))
}

async fn admin_dashboard(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    let backend = state.lock();
    if backend.fail_dashboard {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "Stats unavailable"));
    }
    Ok(Json(json!({
        "totalJobs": backend.jobs.len(),
        "jobsToday": 1,
        "jobsThisMonth": backend.jobs.len(),
        "completedJobs": 0,
        "totalUsers": backend.users.len(),
        "totalWorkers": 2,
        "verifiedWorkers": backend.verified_workers.len(),
        "mostPopularCategory": "Plumbing",
        "timeseries": [{ "date": "2024-03-01", "jobs": 1 }]
    })))
}

async fn admin_heatmap(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    Ok(Json(json!([{ "lat": 18.5204, "lng": 73.8567, "count": 3 }])))
}

async fn admin_jobs(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    Ok(Json(Value::Array(state.lock().jobs.clone())))
}

async fn admin_reassign(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    let profile_id = body["workerProfileId"]
        .as_i64()
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "workerProfileId is required"))?;
    let mut backend = state.lock();
    let user_id = backend
        .verified_workers
        .iter()
        .find(|w| w["id"] == profile_id)
        .map(|w| w["userId"].clone())
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Worker not found"))?;
    let job = backend
        .jobs
        .iter_mut()
        .find(|j| j["id"] == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Job not found"))?;
    job["workerId"] = user_id;
    job["status"] = json!("ASSIGNED");
    Ok(Json(json!("Job reassigned")))
}

async fn admin_users(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    let slow = state.lock().slow_users;
    if slow {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
    Ok(Json(Value::Array(state.lock().users.clone())))
}

async fn admin_user_action(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, action)): Path<(i64, String)>,
) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    let banned = match action.as_str() {
        "ban" => true,
        "unban" => false,
        _ => return Err(error(StatusCode::NOT_FOUND, "Unknown action")),
    };
    let mut backend = state.lock();
    let user = backend
        .users
        .iter_mut()
        .find(|u| u["id"] == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "User not found"))?;
    user["banned"] = json!(banned);
    Ok(Json(json!(if banned { "User banned" } else { "User unbanned" })))
}

async fn admin_pending_workers(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    Ok(Json(Value::Array(state.lock().pending_workers.clone())))
}

async fn admin_verified_workers(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    Ok(Json(Value::Array(state.lock().verified_workers.clone())))
}

async fn admin_leaderboard(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    Ok(Json(json!([
        { "id": 21, "ratingAvg": 4.8, "verificationStatus": "VERIFIED" },
        { "id": 22, "ratingAvg": null, "verificationStatus": "VERIFIED" }
    ])))
}

async fn admin_worker_action(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, action)): Path<(i64, String)>,
    body: Option<Json<Value>>,
) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    let mut backend = state.lock();
    let pos = backend
        .pending_workers
        .iter()
        .position(|w| w["id"] == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Worker not found"))?;
    let worker = backend.pending_workers.remove(pos);
    match action.as_str() {
        "approve" => {
            backend.verified_workers.push(json!({
                "id": worker["id"],
                "userId": worker["id"],
                "name": worker["name"],
                "phone": worker["phone"]
            }));
            Ok(Json(json!("Worker approved")))
        }
        "reject" => {
            let reason = body.and_then(|Json(b)| b["reason"].as_str().map(str::to_string));
            Ok(Json(json!({ "message": "Worker rejected", "reason": reason })))
        }
        _ => Err(error(StatusCode::NOT_FOUND, "Unknown action")),
    }
}

async fn admin_reports(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    Ok(Json(Value::Array(state.lock().reports.clone())))
}

async fn admin_categories(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    Ok(Json(Value::Array(state.lock().categories.clone())))
}

async fn admin_create_category(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    let name = body["name"].as_str().unwrap_or_default().trim().to_string();
    if name.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Name is required"));
    }
    let mut backend = state.lock();
    backend.next_id += 1;
    let category = json!({ "id": backend.next_id, "name": name });
    backend.categories.push(category.clone());
    Ok(Json(category))
}

async fn admin_rename_category(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    let mut backend = state.lock();
    let category = backend
        .categories
        .iter_mut()
        .find(|c| c["id"] == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Category not found"))?;
    category["name"] = body["name"].clone();
    Ok(Json(category.clone()))
}

async fn admin_delete_category(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply {
    require(&state, &headers, ADMIN_ONLY)?;
    let mut backend = state.lock();
    let before = backend.categories.len();
    backend.categories.retain(|c| c["id"] != id);
    if backend.categories.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Category not found"));
    }
    Ok(Json(json!("Category deleted")))
}
