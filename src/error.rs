use crate::domain::payment_request::RequestId;
use crate::domain::validation::ValidationErrors;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PaymentError {
    #[error("Invalid input: {0}")]
    #[diagnostic(
        code(paylink::invalid_input),
        help("correct the listed fields and submit the request again")
    )]
    InvalidInput(ValidationErrors),
    #[error("Payment request {0} not found")]
    #[diagnostic(code(paylink::not_found))]
    NotFound(RequestId),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    #[diagnostic(code(paylink::internal))]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PaymentError {
    fn from(err: rocksdb::Error) -> Self {
        PaymentError::InternalError(Box::new(err))
    }
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        PaymentError::InternalError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
