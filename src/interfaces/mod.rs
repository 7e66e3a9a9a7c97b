//! Adapters between the service and the outside world: CSV files and
//! human-readable output.

pub mod csv;
pub mod display;
