use crm_llm_tools::error::{CrmApiError, CrmApiResult};
use crm_llm_tools::{Backend, BackendCall};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock backend for testing.
///
/// Replays queued responses in order and records every call it receives.
/// Once the queue is empty it answers `{}`.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingBackend {
    responses: Arc<Mutex<VecDeque<CrmApiResult<Value>>>>,
    calls: Arc<Mutex<Vec<BackendCall>>>,
}

#[allow(dead_code)]
impl RecordingBackend {
    /// Create a new backend with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond(&self, value: Value) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(value));
        self
    }

    /// Queue an HTTP error response.
    pub fn fail(&self, status: u16, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(CrmApiError::ApiError {
                status,
                message: message.to_string(),
            }));
        self
    }

    /// All calls received so far.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Backend for RecordingBackend {
    fn execute(&self, call: &BackendCall) -> CrmApiResult<Value> {
        self.calls.lock().unwrap().push(call.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Object(Default::default())))
    }
}
