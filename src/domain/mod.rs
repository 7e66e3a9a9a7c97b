//! Domain model: payment requests, their creation rules and the ports the
//! application layer depends on.

pub mod payment_request;
pub mod ports;
pub mod summary;
pub mod validation;
