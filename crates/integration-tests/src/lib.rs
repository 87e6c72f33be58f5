//! Integration test support for Tanawal.
//!
//! [`FakeTransport`] stands in for the API gateway: tests script replies per
//! `METHOD path`, optionally hold a reply until released, and inspect every
//! request that was made.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tanawal-integration-tests
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Value, json};
use tokio::sync::Notify;

use tanawal_admin::client::{ApiError, ApiRequest, Transport};

/// A scripted reply.
#[derive(Debug, Clone)]
pub struct Reply {
    outcome: Result<Value, u16>,
    gate: Option<Arc<Notify>>,
}

impl Reply {
    /// Succeed with `payload`.
    #[must_use]
    pub const fn ok(payload: Value) -> Self {
        Self {
            outcome: Ok(payload),
            gate: None,
        }
    }

    /// Fail with HTTP `status`.
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self {
            outcome: Err(status),
            gate: None,
        }
    }

    /// Hold the reply until `gate` is notified.
    #[must_use]
    pub fn held_by(mut self, gate: &Arc<Notify>) -> Self {
        self.gate = Some(Arc::clone(gate));
        self
    }
}

/// In-memory [`Transport`].
///
/// Unscripted calls succeed with `{"success": true}`.
#[derive(Debug, Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `reply` for the next `method path` call, e.g. `"GET GetFoodList"`.
    pub fn script(&self, route: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(route.to_owned())
            .or_default()
            .push_back(reply);
    }

    /// Every request made so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests whose `method path` equals `route`.
    #[must_use]
    pub fn requests_to(&self, route: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| route_of(r) == route)
            .collect()
    }

    fn next_reply(&self, route: &str) -> Option<Reply> {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(route)
            .and_then(VecDeque::pop_front)
    }
}

fn route_of(request: &ApiRequest) -> String {
    format!("{} {}", request.method, request.path)
}

impl Transport for FakeTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let route = route_of(&request);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let Some(reply) = self.next_reply(&route) else {
            return Ok(json!({ "success": true }));
        };
        if let Some(gate) = reply.gate {
            gate.notified().await;
        }
        reply.outcome.map_err(|status| ApiError::Status {
            status,
            body: format!("scripted failure for {route}"),
        })
    }
}
