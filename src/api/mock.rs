// src/api/mock.rs - Scripted backend for unit tests

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{ApiRequest, ApiResponse, HttpTransport, Method};
use crate::error::{Error, Result};

type Reply = Result<ApiResponse>;

/// Replies are queued per (method, path). The last reply for a route is
/// repeated once the queue is down to one entry.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        let body = match body {
            Value::Null => Vec::new(),
            other => serde_json::to_vec(&other).unwrap_or_default(),
        };
        self.push(method, path, Ok(ApiResponse { status, body }))
    }

    pub fn fail(&self, method: Method, path: &str) -> &Self {
        self.push(
            method,
            path,
            Err(Error::network(path, None, "connection refused")),
        )
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().push(request.clone());

        let mut replies = self.replies.lock();
        let queue = replies
            .get_mut(&(request.method, request.path.clone()))
            .ok_or_else(|| {
                Error::network(request.path.clone(), None, "no scripted reply")
            })?;

        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        reply.unwrap_or_else(|| Err(Error::network(request.path, None, "no scripted reply")))
    }
}
