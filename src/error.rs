use std::fmt;

use crate::context::Interrupted;
use crate::core::record::DNSRecord;

#[derive(Debug)]
pub enum Error {
    /// The provider could not be reached.
    Transport(String),
    /// The provider answered with a body we could not read.
    Decode(String),
    /// The provider answered with a non-success status.
    Provider {
        status_code: i32,
        kind: String,
        message: String,
    },
    /// The record type has no provider-side encoding.
    UnsupportedType(Box<DNSRecord>),
    InvalidInput(String),
    Cancelled,
    DeadlineExceeded,
    Config(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(msg) => write!(f, "Transport error: {msg}"),
            Error::Decode(msg) => write!(f, "Decode error: {msg}"),
            Error::Provider {
                status_code,
                kind,
                message,
            } => write!(f, "Provider error: {status_code}: {kind}: {message}"),
            Error::UnsupportedType(record) => write!(
                f,
                "Unsupported record type {}: {record}",
                record.record_type
            ),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Error::Cancelled => write!(f, "Operation cancelled"),
            Error::DeadlineExceeded => write!(f, "Deadline exceeded"),
            Error::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl From<Interrupted> for Error {
    fn from(reason: Interrupted) -> Self {
        match reason {
            Interrupted::Cancelled => Error::Cancelled,
            Interrupted::DeadlineExceeded => Error::DeadlineExceeded,
        }
    }
}

/// One record of a batch that could not be processed.
#[derive(Debug)]
pub struct RecordFailure {
    /// Position of the record in the batch input.
    pub index: usize,
    pub record: DNSRecord,
    pub error: Error,
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record #{} ({}): {}", self.index, self.record, self.error)
    }
}

/// Every per-record failure of a batch operation, in input order.
#[derive(Debug, Default)]
pub struct BatchError {
    pub failures: Vec<RecordFailure>,
}

impl BatchError {
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordFailure> {
        self.failures.iter()
    }
}

impl std::error::Error for BatchError {}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} record(s) failed", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}
