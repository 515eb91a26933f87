//! Nullable query transport with canned responses and recorded queries.

use agora_governance::{Query, QueryTransport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A query transport that replays queued responses instead of calling an index.
///
/// Once the queue is empty, every call fails with [`TransportError::Exhausted`].
pub struct NullTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    executed: Mutex<Vec<Query>>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Create with a single response for the first call.
    pub fn with_response(response: Value) -> Self {
        let transport = Self::new();
        transport.enqueue(response);
        transport
    }

    /// Queue a successful response.
    pub fn enqueue(&self, response: Value) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a failure.
    pub fn enqueue_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// All queries executed so far (for assertions).
    pub fn executed(&self) -> Vec<Query> {
        self.executed.lock().unwrap().clone()
    }

    /// Clear all state.
    pub fn reset(&self) {
        self.responses.lock().unwrap().clear();
        self.executed.lock().unwrap().clear();
    }
}

impl Default for NullTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryTransport for NullTransport {
    async fn execute(&self, query: &Query) -> Result<Value, TransportError> {
        self.executed.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::Exhausted))
    }
}
