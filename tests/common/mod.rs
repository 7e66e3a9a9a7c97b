use chrono::{TimeDelta, Utc};
use std::io::Write;
use tempfile::NamedTempFile;

/// RFC 3339 timestamp `delta` away from the wall clock.
pub fn due_in(delta: TimeDelta) -> String {
    (Utc::now() + delta).to_rfc3339()
}

/// Writes a `name,amount,due_date` CSV to a temp file.
pub fn requests_csv(rows: &[(&str, &str, &str)]) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    let mut wtr = csv::Writer::from_path(file.path()).unwrap();
    wtr.write_record(["name", "amount", "due_date"]).unwrap();
    for (name, amount, due_date) in rows {
        wtr.write_record([*name, *amount, *due_date]).unwrap();
    }
    wtr.flush().unwrap();
    file
}

/// Writes raw bytes to a temp file, for inputs csv would refuse to produce.
pub fn raw_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
