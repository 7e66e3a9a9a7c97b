use crate::domain::payment_request::{PaymentRequest, PaymentStatus, RequestId};
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

const HEADERS: [&str; 7] = [
    "id",
    "name",
    "amount",
    "status",
    "due_date",
    "created_at",
    "overdue",
];

#[derive(Serialize)]
struct RequestRow<'a> {
    id: RequestId,
    name: &'a str,
    amount: Decimal,
    status: PaymentStatus,
    due_date: String,
    created_at: String,
    overdue: bool,
}

/// Writes payment requests as CSV, one row per request.
///
/// The `overdue` column is computed against the `now` passed to
/// [`RequestWriter::write_requests`]; it is not part of the stored record.
pub struct RequestWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RequestWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    /// Writes the header row followed by `requests` in the given order.
    pub fn write_requests<'a>(
        &mut self,
        requests: impl IntoIterator<Item = &'a PaymentRequest>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.writer.write_record(HEADERS)?;
        for request in requests {
            self.writer.serialize(RequestRow {
                id: request.id,
                name: &request.name,
                amount: request.amount.normalized(),
                status: request.status,
                due_date: request.due_date.to_rfc3339_opts(SecondsFormat::Secs, true),
                created_at: request.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                overdue: request.is_overdue(now),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
