use crate::domain::payment_request::{Amount, PaymentRequest, PaymentStatus, RequestId};
use crate::domain::ports::PaymentRequestStore;
use crate::domain::validation::NewPaymentRequest;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal_macros::dec;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payment requests.
///
/// Records are kept newest-first: each insert is prepended. Nothing survives
/// the process, so this is the demo backend and the one tests run against.
#[derive(Default, Clone)]
pub struct InMemoryPaymentRequestStore {
    requests: Arc<RwLock<Vec<PaymentRequest>>>,
}

impl InMemoryPaymentRequestStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the three demo customers, timed relative to `now`.
    pub fn with_demo_data(now: DateTime<Utc>) -> Result<Self> {
        let seed = [
            (3, "Malee Sangsuk", Amount::new(dec!(75000))?, PaymentStatus::Pending, 20 * 60, -30),
            (2, "Wichan Ruamruay", Amount::new(dec!(25000))?, PaymentStatus::Paid, 8 * 60, -60),
            (1, "Somchai Jaidee", Amount::new(dec!(50000))?, PaymentStatus::Pending, 12 * 60, -120),
        ];

        let requests = seed
            .into_iter()
            .map(|(id, name, amount, status, due_in, created_ago)| PaymentRequest {
                id,
                name: name.to_string(),
                amount,
                status,
                due_date: now + TimeDelta::minutes(due_in),
                created_at: now + TimeDelta::minutes(created_ago),
            })
            .collect();

        Ok(Self {
            requests: Arc::new(RwLock::new(requests)),
        })
    }
}

#[async_trait]
impl PaymentRequestStore for InMemoryPaymentRequestStore {
    async fn insert(
        &self,
        draft: NewPaymentRequest,
        created_at: DateTime<Utc>,
    ) -> Result<PaymentRequest> {
        let mut requests = self.requests.write().await;
        let next_id = requests.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let request = PaymentRequest::new(next_id, draft, created_at);
        requests.insert(0, request.clone());
        Ok(request)
    }

    async fn get(&self, id: RequestId) -> Result<Option<PaymentRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.iter().find(|r| r.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<PaymentRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.clone())
    }

    async fn mark_paid(&self, id: RequestId) -> Result<Option<PaymentRequest>> {
        let mut requests = self.requests.write().await;
        Ok(requests.iter_mut().find(|r| r.id == id).map(|request| {
            request.mark_paid();
            request.clone()
        }))
    }
}
