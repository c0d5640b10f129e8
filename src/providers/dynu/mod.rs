//! Dynu provider implementation

pub mod client;
pub mod convert;
pub mod error;
pub mod types;


pub use client::{DEFAULT_API_URL, DynuApi, DynuClient, DynuConfig};
pub use error::DynuProviderError;
pub use types::{DynuRecord, RootDomain};

use crate::config::Config;
use crate::context::Context;
use crate::core::name::zone_to_fqdn;
use crate::core::provider::{BatchOutcome, DNSProvider};
use crate::core::record::DNSRecord;
use crate::error::{Error, RecordFailure};
use async_trait::async_trait;
use convert::{to_dns_record, to_dynu_record};
use error::map_error;
use tracing::{info, warn};

/// Manages records of a zone hosted at Dynu.
///
/// `own_domain` is the Dynu domain record names are relative to. It only
/// needs to be set when it differs from the zone being managed.
pub struct DynuProvider<C = DynuClient> {
    client: C,
    own_domain: Option<String>,
}

impl DynuProvider<DynuClient> {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = DynuClient::new(DynuConfig {
            api_token: config.api_token.clone(),
            api_url: config.api_url.clone(),
            timeout: config.timeout,
        })
        .map_err(map_error)?;
        Ok(Self::with_client(client, config.own_domain.clone()))
    }
}

impl<C: DynuApi> DynuProvider<C> {
    pub fn with_client(client: C, own_domain: Option<String>) -> Self {
        let own_domain = own_domain
            .map(|d| zone_to_fqdn(&d).to_string())
            .filter(|d| !d.is_empty());
        Self { client, own_domain }
    }

    fn own_domain<'a>(&'a self, domain: &'a str) -> &'a str {
        self.own_domain.as_deref().unwrap_or(domain)
    }

    async fn resolve_root(&self, ctx: &Context, domain: &str) -> Result<RootDomain, Error> {
        // GET /dns/getroot/{hostname}
        let root = self
            .client
            .get_root_domain(ctx, self.own_domain(domain))
            .await
            .map_err(map_error)?;
        Ok(root)
    }

    async fn append_or_set_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
        force_create: bool,
    ) -> Result<BatchOutcome, Error> {
        let domain = zone_to_fqdn(zone);
        let own_domain = self.own_domain(domain);
        let root = self.resolve_root(ctx, domain).await?;

        let mut updated = Vec::with_capacity(records.len());
        let mut failures = Vec::new();

        for (index, rec) in records.into_iter().enumerate() {
            if let Some(reason) = ctx.interrupted() {
                failures.push(RecordFailure {
                    index,
                    record: rec,
                    error: reason.into(),
                });
                continue;
            }

            let dr = match to_dynu_record(&rec, domain, own_domain) {
                Ok(dr) => dr,
                Err(e) => {
                    warn!(index, record = %rec, error = %e, "skipping record");
                    failures.push(RecordFailure {
                        index,
                        record: rec,
                        error: map_error(e),
                    });
                    continue;
                }
            };

            // POST /dns/{id}/record[/{recordId}]
            match self
                .client
                .add_or_update_record(ctx, root.id, &dr, force_create)
                .await
            {
                Ok(stored) => updated.push(to_dns_record(&stored, domain)),
                Err(e) => {
                    warn!(index, record = %rec, error = %e, "failed to write record");
                    failures.push(RecordFailure {
                        index,
                        record: rec,
                        error: map_error(e),
                    });
                }
            }
        }

        info!(
            zone = domain,
            written = updated.len(),
            failed = failures.len(),
            force_create,
            "record batch finished"
        );
        Ok(BatchOutcome::new(updated, failures))
    }
}

#[async_trait]
impl<C: DynuApi> DNSProvider for DynuProvider<C> {
    fn name(&self) -> &str {
        "dynu"
    }

    async fn get_records(&self, ctx: &Context, zone: &str) -> Result<Vec<DNSRecord>, Error> {
        let domain = zone_to_fqdn(zone);
        let root = self.resolve_root(ctx, domain).await?;

        // GET /dns/{id}/record
        let records = self
            .client
            .get_records(ctx, root.id)
            .await
            .map_err(map_error)?;

        Ok(records.iter().map(|dr| to_dns_record(dr, domain)).collect())
    }

    async fn append_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<BatchOutcome, Error> {
        self.append_or_set_records(ctx, zone, records, true).await
    }

    async fn set_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<BatchOutcome, Error> {
        self.append_or_set_records(ctx, zone, records, false).await
    }

    async fn delete_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<BatchOutcome, Error> {
        let domain = zone_to_fqdn(zone);
        let root = self.resolve_root(ctx, domain).await?;

        let mut deleted = Vec::with_capacity(records.len());
        let mut failures = Vec::new();

        for (index, rec) in records.into_iter().enumerate() {
            if let Some(reason) = ctx.interrupted() {
                failures.push(RecordFailure {
                    index,
                    record: rec,
                    error: reason.into(),
                });
                continue;
            }

            let Ok(record_id) = rec.id.trim().parse::<i64>() else {
                warn!(index, record = %rec, "record has no numeric id");
                let error = Error::InvalidInput(format!("record id {:?} is not numeric", rec.id));
                failures.push(RecordFailure {
                    index,
                    record: rec,
                    error,
                });
                continue;
            };

            // DELETE /dns/{id}/record/{recordId}
            match self.client.delete_record(ctx, root.id, record_id).await {
                Ok(()) => deleted.push(rec),
                Err(e) => {
                    warn!(index, record_id, error = %e, "failed to delete record");
                    failures.push(RecordFailure {
                        index,
                        record: rec,
                        error: map_error(e),
                    });
                }
            }
        }

        info!(
            zone = domain,
            deleted = deleted.len(),
            failed = failures.len(),
            "record deletion finished"
        );
        Ok(BatchOutcome::new(deleted, failures))
    }
}
