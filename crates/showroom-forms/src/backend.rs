//! Submission backends for the contact form.
//!
//! This module provides the [`SubmissionBackend`] trait and the built-in
//! implementations the controller hands validated payloads to.
//!
//! ## Backends
//!
//! - [`SimulatedBackend`] - Waits a fixed latency, logs the payload, succeeds
//! - [`InMemoryBackend`] - Collects payloads in memory and can be told to fail (for testing)

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use showroom_core::ShowroomError;

use crate::payload::SubmissionPayload;

/// A destination for validated contact requests.
///
/// Implementations must be `Send + Sync` so a controller can be shared
/// across tasks.
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
    /// Delivers one payload.
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), ShowroomError>;
}

/// A backend that pretends to send: it waits `latency` and then succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    latency: Duration,
}

impl SimulatedBackend {
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub const fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl SubmissionBackend for SimulatedBackend {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), ShowroomError> {
        tracing::info!(
            product = %payload.product,
            country = %payload.country,
            submitted_at = %payload.submitted_at,
            "Contact form submitted payload"
        );
        let body = payload.to_json()?;
        tracing::debug!(payload = %body, "payload body");
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}

/// A backend that records payloads instead of sending them.
///
/// Clones share the same storage, so a test can keep one handle and give
/// another to the controller.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    outbox: Arc<RwLock<Vec<SubmissionPayload>>>,
    failure: Arc<RwLock<Option<String>>>,
    latency: Duration,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every submit wait `latency` before recording.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes every following submit fail with `reason` until [`succeed`](Self::succeed) is called.
    pub async fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.write().await = Some(reason.into());
    }

    /// Clears a failure set with [`fail_with`](Self::fail_with).
    pub async fn succeed(&self) {
        *self.failure.write().await = None;
    }

    /// Returns all recorded payloads.
    pub async fn payloads(&self) -> Vec<SubmissionPayload> {
        self.outbox.read().await.clone()
    }

    /// Returns the number of recorded payloads.
    pub async fn count(&self) -> usize {
        self.outbox.read().await.len()
    }
}

#[async_trait]
impl SubmissionBackend for InMemoryBackend {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), ShowroomError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if let Some(reason) = self.failure.read().await.clone() {
            return Err(ShowroomError::SubmissionFailed(reason));
        }
        self.outbox.write().await.push(payload.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use showroom_core::settings::ContactSettings;

    use crate::fields::FormState;

    fn payload() -> SubmissionPayload {
        let state = FormState {
            name: "Ravi".to_string(),
            phone: "9876543210".to_string(),
            email: "ravi@example.com".to_string(),
            product: "Product C".to_string(),
            message: "Hello".to_string(),
        };
        SubmissionPayload::build(&state, &ContactSettings::default(), Utc::now()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_backend_waits_latency() {
        let backend = SimulatedBackend::new(Duration::from_millis(1200));
        let start = tokio::time::Instant::now();
        backend.submit(&payload()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1200));
        assert_eq!(backend.latency(), Duration::from_millis(1200));
    }

    #[tokio::test]
    async fn test_in_memory_backend_records() {
        let backend = InMemoryBackend::new();
        backend.submit(&payload()).await.unwrap();
        backend.submit(&payload()).await.unwrap();
        assert_eq!(backend.count().await, 2);
        assert_eq!(backend.payloads().await[0].name, "Ravi");
    }

    #[tokio::test]
    async fn test_in_memory_backend_failure_toggle() {
        let backend = InMemoryBackend::new();
        backend.fail_with("offline").await;
        let err = backend.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, ShowroomError::SubmissionFailed(ref r) if r == "offline"));
        assert_eq!(backend.count().await, 0);

        backend.succeed().await;
        backend.submit(&payload()).await.unwrap();
        assert_eq!(backend.count().await, 1);
    }

    #[tokio::test]
    async fn test_in_memory_backend_clones_share_storage() {
        let backend = InMemoryBackend::new();
        let clone = backend.clone();
        clone.submit(&payload()).await.unwrap();
        assert_eq!(backend.count().await, 1);
    }
}
