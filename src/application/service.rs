use crate::config::Latency;
use crate::domain::payment_request::{PaymentRequest, RequestId};
use crate::domain::ports::{ClockBox, PaymentRequestStoreBox};
use crate::domain::summary::Summary;
use crate::domain::validation::{self, CandidateRequest};
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};

/// The call surface over the payment-request store.
///
/// `PaymentRequestService` validates new requests against the injected clock,
/// applies the configured latency before each operation and delegates storage
/// to whichever backend it was built with. Every operation completes its store
/// call before returning, so a caller never observes a half-applied create or
/// payment.
pub struct PaymentRequestService {
    store: PaymentRequestStoreBox,
    clock: ClockBox,
    latency: Latency,
}

impl PaymentRequestService {
    /// Creates a service without simulated latency.
    ///
    /// # Arguments
    ///
    /// * `store` - The backend holding payment requests.
    /// * `clock` - Source of "now" for validation, timestamps and overdue checks.
    pub fn new(store: PaymentRequestStoreBox, clock: ClockBox) -> Self {
        Self {
            store,
            clock,
            latency: Latency::none(),
        }
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns every request, most recently created first.
    pub async fn list(&self) -> Result<Vec<PaymentRequest>> {
        simulate(self.latency.list).await;

        let mut requests = self.store.get_all().await?;
        requests.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        debug!(count = requests.len(), "Listed payment requests");
        Ok(requests)
    }

    /// Looks up one request. A missing id is `Ok(None)`, not an error.
    pub async fn get(&self, id: RequestId) -> Result<Option<PaymentRequest>> {
        simulate(self.latency.get).await;

        let request = self.store.get(id).await?;
        if request.is_none() {
            debug!(id, "Payment request not found");
        }
        Ok(request)
    }

    /// Validates `candidate` and stores it as a new pending request.
    ///
    /// Fails with [`PaymentError::InvalidInput`] carrying every violated rule;
    /// nothing is stored in that case.
    pub async fn create(&self, candidate: CandidateRequest) -> Result<PaymentRequest> {
        simulate(self.latency.create).await;

        let now = self.clock.now();
        let draft = validation::validate(&candidate, now).map_err(|errors| {
            debug!(%errors, "Rejected payment request");
            PaymentError::InvalidInput(errors)
        })?;

        let request = self.store.insert(draft, now).await?;
        info!(
            id = request.id,
            amount = %request.amount,
            due_date = %request.due_date,
            "Created payment request"
        );
        Ok(request)
    }

    /// Marks a request as paid. Paying an already paid request succeeds again.
    pub async fn mark_paid(&self, id: RequestId) -> Result<PaymentRequest> {
        simulate(self.latency.mark_paid).await;

        match self.store.mark_paid(id).await? {
            Some(request) => {
                info!(id, "Marked payment request as paid");
                Ok(request)
            }
            None => {
                debug!(id, "Cannot mark unknown payment request as paid");
                Err(PaymentError::NotFound(id))
            }
        }
    }

    /// Dashboard statistics over the current listing.
    pub async fn summary(&self) -> Result<Summary> {
        let requests = self.list().await?;
        Ok(Summary::from_requests(&requests, self.clock.now()))
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
