//! Manage DNS records hosted at Dynu through a provider-agnostic record
//! model.
//!
//! [`providers::dynu::DynuProvider`] implements [`core::provider::DNSProvider`]:
//! it resolves the zone to its Dynu domain, translates every
//! [`core::record::DNSRecord`] to Dynu's record shape and back, and reports
//! per-record failures of batch operations without aborting the batch.

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod providers;

pub use crate::config::Config;
pub use crate::context::{CancelHandle, Context, Interrupted};
pub use crate::core::provider::{BatchOutcome, DNSProvider};
pub use crate::core::record::{DNSRecord, DNSRecordType};
pub use crate::error::{BatchError, Error, RecordFailure};
pub use crate::providers::dynu::DynuProvider;
