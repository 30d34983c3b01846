//! Mock transport for testing.
//!
//! Provides a scripted implementation of `MerchantTransport` for unit and
//! integration tests. Supports:
//! - Queued responses, returned in order
//! - Failure injection (no response received)
//! - Request capture for asserting on signed headers and bodies

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{MerchantTransport, OutgoingRequest, TransportError, TransportResponse};

/// Mock merchant transport.
///
/// Clones share state, so a test can keep one handle while the API under
/// test owns another.
///
/// # Example
///
/// ```ignore
/// let mock = MockTransport::new();
/// mock.push_response(TransportResponse::new(200, "hello"));
///
/// let api = MerchantApi::new(credentials, Arc::new(mock.clone()));
/// api.get_payment_details("1").await;
///
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    /// Scripted results, consumed front to back.
    results: VecDeque<Result<TransportResponse, TransportError>>,

    /// Every request sent, in order.
    requests: Vec<OutgoingRequest>,
}

impl MockTransport {
    /// Creates a mock with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn push_response(&self, response: TransportResponse) {
        self.lock().results.push_back(Ok(response));
    }

    /// Queues a failure with no response.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.lock()
            .results
            .push_back(Err(TransportError::new(message)));
    }

    /// Returns all captured requests.
    pub fn requests(&self) -> Vec<OutgoingRequest> {
        self.lock().requests.clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<OutgoingRequest> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl MerchantTransport for MockTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(request);
        state
            .results
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("MockTransport: no response queued")))
    }
}
