//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wrapping a fresh in-memory application state
//! - Helpers for starting sessions and answering words

#![allow(dead_code)]

pub mod fixtures;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use vocab_practice_backend::{router, AppState};

/// Test context holding the application state behind a test server.
pub struct TestContext {
    pub state: AppState,
    pub server: TestServer,
}

impl TestContext {
    /// Create a new test context with empty session and result stores.
    pub fn new() -> Self {
        let state = AppState::new();
        let server = TestServer::new(router(state.clone())).unwrap();
        Self { state, server }
    }

    /// Start a session and return the parsed creation response.
    pub async fn start_session(&self, request: Value) -> Value {
        let response = self.server.post("/api/sessions").json(&request).await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    /// Submit an answer body and return the parsed response.
    pub async fn answer(&self, session_id: &str, body: Value) -> Value {
        let response = self
            .server
            .post(&format!("/api/sessions/{}/answers", session_id))
            .json(&body)
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// Read the current prompt.
    pub async fn prompt(&self, session_id: &str) -> Value {
        let response = self
            .server
            .get(&format!("/api/sessions/{}/prompt", session_id))
            .await;
        response.assert_status_ok();
        response.json()
    }
}
