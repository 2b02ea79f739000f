//! Shared fixtures for database-backed API tests
//!
//! Uses `TEST_DATABASE_URL`, falling back to `DATABASE_URL`. Every test
//! recreates the schema, so tests within a binary are serialized.

#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard};

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use biztime_server::db::{Company, Database, DatabaseConfig};
use biztime_server::{build_router, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

const SCHEMA: &str = include_str!("../../../sql/schema.sql");

static DB_LOCK: Mutex<()> = Mutex::new(());

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub company: Company,
    _guard: MutexGuard<'static, ()>,
}

impl TestApp {
    /// Fresh schema plus the `sam` company.
    pub async fn new() -> Self {
        let guard = DB_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let url = std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .expect("TEST_DATABASE_URL or DATABASE_URL required");
        let db = Database::connect(&DatabaseConfig::new(url))
            .await
            .expect("pool creation failed");

        sqlx::raw_sql(SCHEMA)
            .execute(db.pool())
            .await
            .expect("schema setup failed");

        let company = create_test_company(&db).await;
        let router = build_router(db.clone(), &ServerConfig::default());

        Self {
            router,
            db,
            company,
            _guard: guard,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request build failed");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router call failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body read failed");
        let value = serde_json::from_slice(&bytes).expect("response was not JSON");
        (status, value)
    }
}

pub async fn create_test_company(db: &Database) -> Company {
    db.companies()
        .create(
            "sam",
            "Sam's Club",
            "Sam's West, Inc. is an American chain of membership-only retail warehouse clubs owned and operated by Walmart Inc.",
        )
        .await
        .expect("test company insert failed")
}
