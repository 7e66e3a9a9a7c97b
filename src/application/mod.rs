//! Application layer exposing the payment-request operations.
//!
//! This module defines the `PaymentRequestService`, the single entry point the
//! CLI (or any future front end) calls to list, look up, create and pay
//! requests. It owns a boxed store and clock, so the backend is chosen once at
//! construction.

pub mod service;
