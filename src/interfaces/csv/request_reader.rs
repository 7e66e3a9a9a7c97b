use crate::domain::validation::CandidateRequest;
use crate::error::{PaymentError, Result};
use std::io::Read;

/// Reads candidate payment requests from a CSV source.
///
/// Expects a header row with `name`, `amount` and `due_date` columns. Values are
/// trimmed and kept as text; whether they are acceptable is decided later by
/// validation, so a row with a bad amount still decodes.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes candidates.
    pub fn candidates(self) -> impl Iterator<Item = Result<CandidateRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
