use super::payment_request::{PaymentRequest, RequestId};
use super::validation::NewPaymentRequest;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage contract for payment requests.
///
/// Implementations must make `insert` and `mark_paid` atomic: id assignment and
/// the status change each happen under a single writer.
#[async_trait]
pub trait PaymentRequestStore: Send + Sync {
    /// Assigns the next id (`max(ids, 0) + 1`), stores a pending record and returns it.
    async fn insert(
        &self,
        draft: NewPaymentRequest,
        created_at: DateTime<Utc>,
    ) -> Result<PaymentRequest>;
    async fn get(&self, id: RequestId) -> Result<Option<PaymentRequest>>;
    /// All records, in no particular order.
    async fn get_all(&self) -> Result<Vec<PaymentRequest>>;
    /// Sets the record to paid. Returns `None` when no record has `id`.
    async fn mark_paid(&self, id: RequestId) -> Result<Option<PaymentRequest>>;
}

pub type PaymentRequestStoreBox = Box<dyn PaymentRequestStore>;
pub type PaymentRequestStoreFactory = Box<dyn Fn() -> PaymentRequestStoreBox + Send + Sync>;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub type ClockBox = Box<dyn Clock>;
