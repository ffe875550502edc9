//! Test Doubles
//!
//! Scripted transport that records every request it receives.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use graphql_client::{QueryBody, Response};
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::graphql::{ClientError, Transport};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub operation: String,
    pub variables: Value,
}

type Scripted = Result<Response<Value>, ClientError>;

/// Answers each operation from its own queue; an empty queue is a network error.
#[derive(Default)]
pub struct MockTransport {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, operation: &str, outcome: Scripted) {
        self.scripts
            .lock()
            .entry(operation.to_string())
            .or_default()
            .push_back(outcome);
    }

    pub fn respond(&self, operation: &str, data: Value) {
        let response = serde_json::from_value(json!({ "data": data })).expect("valid response envelope");
        self.push(operation, Ok(response));
    }

    pub fn respond_errors(&self, operation: &str, messages: &[&str]) {
        let errors: Vec<Value> = messages.iter().map(|message| json!({ "message": message })).collect();
        let response = serde_json::from_value(json!({ "data": null, "errors": errors })).expect("valid response envelope");
        self.push(operation, Ok(response));
    }

    pub fn fail(&self, operation: &str, message: &str) {
        self.push(operation, Err(ClientError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn operations(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.operation.clone()).collect()
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.operation == operation).count()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn execute(&self, body: &QueryBody<Value>) -> Result<Response<Value>, ClientError> {
        self.requests.lock().push(RecordedRequest {
            operation: body.operation_name.to_string(),
            variables: body.variables.clone(),
        });
        // Suspend once so joined requests overlap in flight.
        tokio::task::yield_now().await;
        self.scripts
            .lock()
            .get_mut(body.operation_name)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ClientError::Network(format!("no scripted response for {}", body.operation_name))))
    }
}
