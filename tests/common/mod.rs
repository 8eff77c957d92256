//! Shared helpers for router-level tests.

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use tower::ServiceExt;

use employee_api::app::build_app;
use employee_api::domain::{Employee, EmployeeId};
use employee_api::persistence::{EmployeeStore, InMemoryEmployeeStore, StoreError};

/// Raw JSON for the reference employee used across scenarios.
pub const ANN_JSON: &str = r#"{"id":1,"first_name":"Ann","last":"Lee","age":30,"email":"a@x.com","phone":"555","cid":"C1","position":"eng"}"#;

/// The employee encoded by [`ANN_JSON`].
pub fn ann() -> Employee {
    Employee {
        id: 1,
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        age: 30,
        email: "a@x.com".to_string(),
        phone: "555".to_string(),
        cid: "C1".to_string(),
        position: "eng".to_string(),
    }
}

/// An employee with the given id and otherwise fixed fields.
pub fn employee(id: EmployeeId, first_name: &str) -> Employee {
    Employee {
        id,
        first_name: first_name.to_string(),
        ..ann()
    }
}

/// In-memory store that counts every call made through the trait.
#[derive(Debug, Default)]
pub struct CountingStore {
    /// Store that actually holds the rows.
    pub inner: InMemoryEmployeeStore,
    calls: AtomicUsize,
}

impl CountingStore {
    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmployeeStore for CountingStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        self.hit();
        self.inner.list_employees().await
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<i64, StoreError> {
        self.hit();
        self.inner.insert_employee(employee).await
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        self.hit();
        self.inner.get_employee(id).await
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        employee: &Employee,
    ) -> Result<i64, StoreError> {
        self.hit();
        self.inner.update_employee(id, employee).await
    }

    async fn remove_employee(&self, id: EmployeeId) -> Result<(), StoreError> {
        self.hit();
        self.inner.remove_employee(id).await
    }
}

/// Builds an app over a fresh counting store and returns both.
pub fn counting_app() -> (Router, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::default());
    let app = build_app(Arc::clone(&store) as Arc<dyn EmployeeStore>);
    (app, store)
}

/// A captured response.
#[derive(Debug)]
pub struct TestResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body as text.
    pub body: String,
}

impl TestResponse {
    /// Decodes the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        let Ok(value) = serde_json::from_str(&self.body) else {
            panic!("response body is not the expected JSON: {}", self.body);
        };
        value
    }

    /// Returns a header value as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Sends one request through the router.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
    let Ok(request) = Request::builder().method(method).uri(uri).body(body) else {
        panic!("request should build");
    };
    let Ok(response) = app.clone().oneshot(request).await else {
        panic!("router is infallible");
    };

    let status = response.status();
    let headers = response.headers().clone();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("body should be readable");
    };
    let Ok(body) = String::from_utf8(bytes.to_vec()) else {
        panic!("body should be UTF-8");
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
