use crate::domain::payment_request::{PaymentRequest, RequestId};
use crate::domain::ports::PaymentRequestStore;
use crate::domain::validation::NewPaymentRequest;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing payment requests.
pub const CF_REQUESTS: &str = "requests";

/// A persistent store implementation using RocksDB.
///
/// Records live in a single column family keyed by the big-endian request id,
/// so key order is id order and the last key holds the highest id. Values are
/// JSON.
///
/// Inserts and status changes are read-modify-write sequences; they run under
/// `write_lock` so concurrent callers in one process cannot hand out the same
/// id. `Clone` shares both the database and the lock.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "requests" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_requests = ColumnFamilyDescriptor::new(CF_REQUESTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_requests])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn requests_cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_REQUESTS).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(
                "Requests column family not found",
            )))
        })
    }

    fn read(&self, cf: &ColumnFamily, id: RequestId) -> Result<Option<PaymentRequest>> {
        match self.db.get_cf(cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write(&self, cf: &ColumnFamily, request: &PaymentRequest) -> Result<()> {
        let value = serde_json::to_vec(request)?;
        self.db.put_cf(cf, request.id.to_be_bytes(), value)?;
        Ok(())
    }

    fn last_id(&self, cf: &ColumnFamily) -> Result<RequestId> {
        let Some(item) = self.db.iterator_cf(cf, IteratorMode::End).next() else {
            return Ok(0);
        };
        let (key, _value) = item?;
        let bytes = <[u8; 4]>::try_from(&key[..]).map_err(|_| {
            PaymentError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Malformed request key of {} bytes", key.len()),
            )))
        })?;
        Ok(RequestId::from_be_bytes(bytes))
    }
}

#[async_trait]
impl PaymentRequestStore for RocksDBStore {
    async fn insert(
        &self,
        draft: NewPaymentRequest,
        created_at: DateTime<Utc>,
    ) -> Result<PaymentRequest> {
        let _guard = self.write_lock.lock().await;
        let cf = self.requests_cf()?;

        let request = PaymentRequest::new(self.last_id(cf)? + 1, draft, created_at);
        self.write(cf, &request)?;
        Ok(request)
    }

    async fn get(&self, id: RequestId) -> Result<Option<PaymentRequest>> {
        let cf = self.requests_cf()?;
        self.read(cf, id)
    }

    async fn get_all(&self) -> Result<Vec<PaymentRequest>> {
        let cf = self.requests_cf()?;

        let mut requests = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            requests.push(serde_json::from_slice(&value)?);
        }

        Ok(requests)
    }

    async fn mark_paid(&self, id: RequestId) -> Result<Option<PaymentRequest>> {
        let _guard = self.write_lock.lock().await;
        let cf = self.requests_cf()?;

        let Some(mut request) = self.read(cf, id)? else {
            return Ok(None);
        };
        request.mark_paid();
        self.write(cf, &request)?;
        Ok(Some(request))
    }
}
