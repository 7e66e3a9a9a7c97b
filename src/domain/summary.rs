use super::payment_request::{DisplayStatus, PaymentRequest};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Dashboard statistics over a set of payment requests at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    /// Pending requests, overdue ones included.
    pub pending: usize,
    pub paid: usize,
    pub overdue: usize,
    /// Sum of all amounts regardless of status.
    pub total_amount: Decimal,
}

impl Summary {
    pub fn from_requests<'a>(
        requests: impl IntoIterator<Item = &'a PaymentRequest>,
        now: DateTime<Utc>,
    ) -> Self {
        requests
            .into_iter()
            .fold(Self::default(), |mut summary, request| {
                summary.total += 1;
                summary.total_amount += request.amount.value();
                match request.display_status(now) {
                    DisplayStatus::Paid => summary.paid += 1,
                    DisplayStatus::Overdue => {
                        summary.pending += 1;
                        summary.overdue += 1;
                    }
                    DisplayStatus::Pending => summary.pending += 1,
                }
                summary
            })
    }
}
