//! Runtime settings shared by the binary and the service.

use std::time::Duration;

/// Base URL payment links are built on when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";

/// Artificial delay applied before each service operation.
///
/// The demo backend sleeps before touching the store so callers experience
/// something close to a network round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Latency {
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub mark_paid: Duration,
}

impl Latency {
    pub const fn none() -> Self {
        Self {
            list: Duration::ZERO,
            get: Duration::ZERO,
            create: Duration::ZERO,
            mark_paid: Duration::ZERO,
        }
    }

    pub const fn simulated() -> Self {
        Self {
            list: Duration::from_millis(300),
            get: Duration::from_millis(200),
            create: Duration::from_millis(400),
            mark_paid: Duration::from_millis(300),
        }
    }
}

/// Presentation settings for the CLI front end. Latency is given to
/// [`crate::application::service::PaymentRequestService::with_latency`] directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Origin that `/pay/<id>` links are appended to.
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}
