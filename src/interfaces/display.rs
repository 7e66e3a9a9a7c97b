//! Human-facing rendering: currency, timestamps, payment links and the
//! detail and summary blocks printed by the CLI.

use crate::domain::payment_request::{DisplayStatus, PaymentRequest, RequestId};
use crate::domain::summary::Summary;
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub const CURRENCY_SYMBOL: &str = "฿";

/// Formats an amount in baht with thousands separators: `฿1,234.5`.
pub fn format_currency(amount: Decimal) -> String {
    let text = amount.normalize().abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{CURRENCY_SYMBOL}{grouped}.{fraction}"),
        None => format!("{sign}{CURRENCY_SYMBOL}{grouped}"),
    }
}

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M").to_string()
}

/// Renders a remaining duration as `5h 07m`, or `7m` under an hour.
pub fn format_remaining(delta: TimeDelta) -> String {
    let minutes = delta.num_minutes().max(0);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m:02}m"),
    }
}

/// The page a customer opens to pay: `<base_url>/pay/<id>`.
pub fn payment_link(base_url: &str, id: RequestId) -> String {
    format!("{}/pay/{}", base_url.trim_end_matches('/'), id)
}

/// A payment request together with everything derived from it at one instant.
#[derive(Debug, Serialize)]
pub struct RequestView<'a> {
    #[serde(flatten)]
    pub request: &'a PaymentRequest,
    pub display_status: DisplayStatus,
    pub overdue: bool,
    pub payment_code: String,
    pub payment_link: String,
    pub minutes_remaining: Option<i64>,
}

impl<'a> RequestView<'a> {
    pub fn new(request: &'a PaymentRequest, now: DateTime<Utc>, base_url: &str) -> Self {
        Self {
            request,
            display_status: request.display_status(now),
            overdue: request.is_overdue(now),
            payment_code: request.payment_code(),
            payment_link: payment_link(base_url, request.id),
            minutes_remaining: request.time_remaining(now).map(|d| d.num_minutes()),
        }
    }

    /// Multi-line block shown by `paylink show`.
    pub fn render(&self) -> String {
        let request = self.request;
        let due = match (self.overdue, self.minutes_remaining) {
            (true, _) => format!("{} (overdue)", format_timestamp(request.due_date)),
            (false, Some(minutes)) => format!(
                "{} (in {})",
                format_timestamp(request.due_date),
                format_remaining(TimeDelta::minutes(minutes))
            ),
            (false, None) => format_timestamp(request.due_date),
        };

        format!(
            "Payment request #{}\n  Customer: {}\n  Amount:   {}\n  Status:   {}\n  Due:      {}\n  Created:  {}\n  Code:     {}\n  Link:     {}\n",
            request.id,
            request.name,
            format_currency(request.amount.value()),
            self.display_status,
            due,
            format_timestamp(request.created_at),
            self.payment_code,
            self.payment_link
        )
    }
}

pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Total requests: {}\nPending:        {}\nOverdue:        {}\nPaid:           {}\nTotal amount:   {}\n",
        summary.total,
        summary.pending,
        summary.overdue,
        summary.paid,
        format_currency(summary.total_amount)
    )
}
