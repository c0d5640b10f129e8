use crate::context::Context;
use crate::core::record::DNSRecord;
use crate::error::{BatchError, Error, RecordFailure};
use async_trait::async_trait;

/// Result of a multi-record operation. Records that succeeded are in
/// `records`; `error` is `None` unless at least one record failed.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<DNSRecord>,
    pub error: Option<BatchError>,
}

impl BatchOutcome {
    pub fn new(records: Vec<DNSRecord>, failures: Vec<RecordFailure>) -> Self {
        let error = if failures.is_empty() {
            None
        } else {
            Some(BatchError { failures })
        };
        Self { records, error }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (Vec<DNSRecord>, Option<BatchError>) {
        (self.records, self.error)
    }
}

/// Zone-level record management. `zone` may carry a trailing dot.
#[async_trait]
pub trait DNSProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn get_records(&self, ctx: &Context, zone: &str) -> Result<Vec<DNSRecord>, Error>;

    /// Creates every record, ignoring any ids they carry.
    async fn append_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<BatchOutcome, Error>;

    /// Updates records that carry an id and creates the rest.
    async fn set_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<BatchOutcome, Error>;

    async fn delete_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<BatchOutcome, Error>;
}
