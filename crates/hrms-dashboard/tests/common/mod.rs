#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{patch, post, put};
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use hrms_dashboard::api::HrmsClient;
use hrms_dashboard::auth::{AuthContext, MemorySessionStore, Session};
use hrms_dashboard::config::BackendConfig;
use serde_json::{json, Value};

pub const VALID_PASSWORD: &str = "hunter22";

/// One request the mock backend received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// File part received by a multipart endpoint.
#[derive(Debug, Clone)]
pub struct Upload {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub len: usize,
}

/// In-process stand-in for the HRMS backend.
#[derive(Debug, Default)]
pub struct MockBackend {
    pub candidates: Mutex<Vec<Value>>,
    pub employees: Mutex<Vec<Value>>,
    pub leaves: Mutex<Vec<Value>>,
    pub requests: Mutex<Vec<Recorded>>,
    pub uploads: Mutex<Vec<Upload>>,
    pub reject_mutations: AtomicBool,
    pub revoke_sessions: AtomicBool,
    pub fail_next: Mutex<Option<(StatusCode, Value)>>,
}

impl MockBackend {
    pub fn seeded() -> Arc<Self> {
        let backend = Self::default();
        *backend.candidates.lock().expect("lock") = vec![
            candidate_json("c1", "Jacob William", "jacob@example.com", "Design", "Senior", "New"),
            candidate_json("c2", "Guy Hawkins", "guy@example.com", "Engineering", "Junior", "Selected"),
            candidate_json("c3", "Arlene McCoy", "arlene@example.com", "Design", "Intern", "Rejected"),
        ];
        *backend.employees.lock().expect("lock") = vec![
            employee_json("e1", "Jane Cooper", "Junior", "Present"),
            employee_json("e2", "Cody Fisher", "Senior", "Absent"),
            employee_json("e3", "Esther Howard", "Team Lead", ""),
        ];
        *backend.leaves.lock().expect("lock") = vec![
            leave_json("l1", "Jane Cooper", "10-06-2025 to 12-06-2025", "Visiting family", "Approved"),
            leave_json("l2", "Cody Fisher", "11-06-2025", "Dentist appointment", "Pending"),
            leave_json("l3", "Esther Howard", "not a date", "Conference", "Approved"),
        ];
        Arc::new(backend)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("lock").clone()
    }

    pub fn mutations(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|request| request.method != "GET")
            .collect()
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().expect("lock").clone()
    }

    pub fn fail_next_with(&self, status: StatusCode, body: Value) {
        *self.fail_next.lock().expect("lock") = Some((status, body));
    }

    fn record(&self, method: &'static str, path: String, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.requests.lock().expect("lock").push(Recorded {
            method,
            path,
            authorization,
            body,
        });
    }

    /// Reject missing bearer tokens, revoked sessions and queued failures.
    fn guard(&self, headers: &HeaderMap) -> Option<Response> {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("Bearer "));
        if !bearer || self.revoke_sessions.load(Ordering::SeqCst) {
            return Some(
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "Unauthorized" })),
                )
                    .into_response(),
            );
        }
        self.fail_next
            .lock()
            .expect("lock")
            .take()
            .map(|(status, body)| (status, Json(body)).into_response())
    }

    fn ack(&self) -> Response {
        let msg = if self.reject_mutations.load(Ordering::SeqCst) {
            "fail"
        } else {
            "success"
        };
        Json(json!({ "msg": msg })).into_response()
    }
}

pub async fn spawn(backend: Arc<MockBackend>) -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/candidates", axum::routing::get(list_candidates))
        .route("/api/candidates/addCandidate", post(add_candidate))
        .route(
            "/api/candidates/:id",
            patch(patch_candidate).delete(delete_candidate),
        )
        .route("/api/employees", axum::routing::get(list_employees))
        .route(
            "/api/employees/:id",
            put(put_employee).patch(patch_employee).delete(delete_employee),
        )
        .route("/api/leaves", axum::routing::get(list_leaves))
        .route("/api/leaves/addLeave", post(add_leave))
        .route("/api/leaves/:id", patch(patch_leave))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend serves");
    });

    format!("http://{addr}/api")
}

type Shared = State<Arc<MockBackend>>;

async fn login(State(backend): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    backend.record("POST", "/auth/login".to_string(), &headers, body.clone());
    if body["password"] != VALID_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "Invalid email or password" })),
        )
            .into_response();
    }
    Json(json!({
        "msg": "success",
        "token": token_expiring_in(Duration::hours(1)),
        "user": { "_id": "u1", "fullName": "Priya HR", "email": body["email"] }
    }))
    .into_response()
}

async fn list_candidates(State(backend): Shared, headers: HeaderMap) -> Response {
    backend.record("GET", "/candidates".to_string(), &headers, Value::Null);
    if let Some(denied) = backend.guard(&headers) {
        return denied;
    }
    Json(Value::Array(backend.candidates.lock().expect("lock").clone())).into_response()
}

async fn list_employees(State(backend): Shared, headers: HeaderMap) -> Response {
    backend.record("GET", "/employees".to_string(), &headers, Value::Null);
    if let Some(denied) = backend.guard(&headers) {
        return denied;
    }
    Json(Value::Array(backend.employees.lock().expect("lock").clone())).into_response()
}

async fn list_leaves(State(backend): Shared, headers: HeaderMap) -> Response {
    backend.record("GET", "/leaves".to_string(), &headers, Value::Null);
    if let Some(denied) = backend.guard(&headers) {
        return denied;
    }
    Json(Value::Array(backend.leaves.lock().expect("lock").clone())).into_response()
}

async fn add_candidate(State(backend): Shared, headers: HeaderMap, multipart: Multipart) -> Response {
    let fields = read_multipart(&backend, multipart).await;
    backend.record(
        "POST",
        "/candidates/addCandidate".to_string(),
        &headers,
        Value::Object(fields.clone()),
    );
    if let Some(denied) = backend.guard(&headers) {
        return denied;
    }
    if backend.reject_mutations.load(Ordering::SeqCst) {
        return backend.ack();
    }
    let mut body = fields;
    body.insert("msg".to_string(), json!("success"));
    body.insert("id".to_string(), json!("c-new"));
    body.insert("resumeUrl".to_string(), json!("/uploads/resume-c-new.pdf"));
    Json(Value::Object(body)).into_response()
}

async fn patch_candidate(
    State(backend): Shared,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("PATCH", format!("/candidates/{id}"), &headers, body);
    backend.guard(&headers).unwrap_or_else(|| backend.ack())
}

async fn delete_candidate(State(backend): Shared, Path(id): Path<String>, headers: HeaderMap) -> Response {
    backend.record("DELETE", format!("/candidates/{id}"), &headers, Value::Null);
    backend.guard(&headers).unwrap_or_else(|| backend.ack())
}

async fn put_employee(
    State(backend): Shared,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("PUT", format!("/employees/{id}"), &headers, body);
    backend.guard(&headers).unwrap_or_else(|| backend.ack())
}

async fn patch_employee(
    State(backend): Shared,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("PATCH", format!("/employees/{id}"), &headers, body);
    backend.guard(&headers).unwrap_or_else(|| backend.ack())
}

async fn delete_employee(State(backend): Shared, Path(id): Path<String>, headers: HeaderMap) -> Response {
    backend.record("DELETE", format!("/employees/{id}"), &headers, Value::Null);
    backend.guard(&headers).unwrap_or_else(|| backend.ack())
}

async fn add_leave(State(backend): Shared, headers: HeaderMap, multipart: Multipart) -> Response {
    let fields = read_multipart(&backend, multipart).await;
    backend.record(
        "POST",
        "/leaves/addLeave".to_string(),
        &headers,
        Value::Object(fields.clone()),
    );
    if let Some(denied) = backend.guard(&headers) {
        return denied;
    }
    if backend.reject_mutations.load(Ordering::SeqCst) {
        return backend.ack();
    }
    let documents = backend
        .uploads()
        .last()
        .filter(|upload| upload.field == "documents")
        .map(|upload| format!("/uploads/{}", upload.file_name));
    Json(json!({
        "msg": "success",
        "newLeave": {
            "_id": "l-new",
            "employeeName": fields.get("employeeName"),
            "leaveDate": fields.get("leaveDate"),
            "reason": fields.get("reason"),
            "status": fields.get("status"),
            "documents": documents,
        }
    }))
    .into_response()
}

async fn patch_leave(
    State(backend): Shared,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("PATCH", format!("/leaves/{id}"), &headers, body);
    backend.guard(&headers).unwrap_or_else(|| backend.ack())
}

async fn read_multipart(
    backend: &MockBackend,
    mut multipart: Multipart,
) -> serde_json::Map<String, Value> {
    let mut fields = serde_json::Map::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let len = field.bytes().await.map(|bytes| bytes.len()).unwrap_or_default();
                backend.uploads.lock().expect("lock").push(Upload {
                    field: name,
                    file_name,
                    content_type,
                    len,
                });
            }
            None => {
                let text = field.text().await.unwrap_or_default();
                fields.insert(name, Value::String(text));
            }
        }
    }
    fields
}

pub fn candidate_json(
    id: &str,
    name: &str,
    email: &str,
    department: &str,
    position: &str,
    status: &str,
) -> Value {
    json!({
        "_id": id,
        "fullName": name,
        "emailAddress": email,
        "phoneNumber": "15550142",
        "department": department,
        "position": position,
        "status": status,
        "experience": "2",
        "resumeUrl": format!("/uploads/{id}.pdf"),
    })
}

pub fn employee_json(id: &str, name: &str, position: &str, attendance: &str) -> Value {
    json!({
        "_id": id,
        "fullName": name,
        "emailAddress": format!("{id}@example.com"),
        "phoneNumber": "555-123-4567",
        "department": "Operations",
        "position": position,
        "dateOfJoining": "01-02-2024",
        "attendanceStatus": attendance,
        "isEmployee": true,
    })
}

pub fn leave_json(id: &str, name: &str, date: &str, reason: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "employeeName": name,
        "leaveDate": date,
        "reason": reason,
        "status": status,
    })
}

/// Unsigned JWT whose `exp` claim lies `offset` from now.
pub fn token_expiring_in(offset: Duration) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let exp = (Utc::now() + offset).timestamp();
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"id":"u1","exp":{exp}}}"#));
    format!("{header}.{payload}.signature")
}

pub fn client_with_session(
    base_url: &str,
    session: Option<Session>,
) -> HrmsClient<MemorySessionStore> {
    let store = match session {
        Some(session) => MemorySessionStore::with_session(session),
        None => MemorySessionStore::default(),
    };
    let auth = AuthContext::restore(Arc::new(store)).expect("memory store loads");
    HrmsClient::new(BackendConfig::new(base_url), Arc::new(auth)).expect("client builds")
}

pub fn signed_in_client(base_url: &str) -> HrmsClient<MemorySessionStore> {
    client_with_session(
        base_url,
        Some(Session::new(token_expiring_in(Duration::hours(1)), None)),
    )
}
