//! Mock payment provider for testing.

use super::provider::{CreateOrderRequest, PaymentProvider, ProviderError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted provider that records every call it receives.
pub struct MockProvider {
    key_id: String,
    outcome: Result<serde_json::Value, ProviderError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    completed: AtomicUsize,
    requests: Mutex<Vec<CreateOrderRequest>>,
}

impl MockProvider {
    /// Provider that returns `order` for every call.
    pub fn succeeding(key_id: &str, order: serde_json::Value) -> Self {
        Self::with_outcome(key_id, Ok(order))
    }

    /// Provider that fails every call with `error`.
    pub fn failing(key_id: &str, error: ProviderError) -> Self {
        Self::with_outcome(key_id, Err(error))
    }

    fn with_outcome(key_id: &str, outcome: Result<serde_json::Value, ProviderError>) -> Self {
        Self {
            key_id: key_id.to_string(),
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to simulate a slow provider.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls started.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of calls that ran to completion.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<CreateOrderRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.completed.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }
}
