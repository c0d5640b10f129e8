//! Translation between [`DNSRecord`] and [`DynuRecord`].
//!
//! Reads accept whatever type Dynu returns; writes reject types that have
//! no Dynu encoding.

use std::time::Duration;

use crate::core::name::{absolute_name, relative_name};
use crate::core::record::{DNSRecord, DNSRecordType};
use crate::providers::dynu::error::DynuProviderError;
use crate::providers::dynu::types::DynuRecord;

/// Converts a record read from Dynu into a record relative to `domain`.
pub fn to_dns_record(dr: &DynuRecord, domain: &str) -> DNSRecord {
    // abc.my.dynu.com under dynu.com -> abc.my
    let mut name = relative_name(&dr.hostname, domain);
    if name.is_empty() {
        name = "@".to_string();
    }

    let record_type = DNSRecordType::from(dr.record_type.as_str());
    let mut priority = 0;
    let value = match record_type {
        DNSRecordType::A => dr.ipv4_address.clone(),
        DNSRecordType::AAAA => dr.ipv6_address.clone(),
        DNSRecordType::CNAME | DNSRecordType::NS => dr.host.clone(),
        DNSRecordType::MX => {
            priority = u32::try_from(dr.priority).unwrap_or(0);
            dr.host.clone()
        }
        DNSRecordType::PTR => {
            name = dr.host.clone();
            dr.hostname.clone()
        }
        DNSRecordType::SPF | DNSRecordType::TXT => dr.text_data.clone(),
        DNSRecordType::Other(_) => dr.content.clone(),
    };

    DNSRecord {
        id: dr.id.to_string(),
        record_type,
        name,
        value,
        // Negative TTLs from the API read as zero.
        ttl: Duration::from_secs(u64::try_from(dr.ttl).unwrap_or(0)),
        priority,
    }
}

/// Converts a record relative to `domain` into a Dynu record whose node
/// name is relative to `own_domain`.
pub fn to_dynu_record(
    rec: &DNSRecord,
    domain: &str,
    own_domain: &str,
) -> Result<DynuRecord, DynuProviderError> {
    let id = rec.id.trim().parse::<i64>().unwrap_or(0);
    let ttl = i32::try_from(rec.ttl.as_secs()).map_err(|_| invalid(rec, "TTL out of range"))?;

    let name = if rec.name == "@" { "" } else { rec.name.as_str() };
    // sub.my -> sub.my.dynu.com -> sub under my.dynu.com
    let fqdn = absolute_name(name, domain);
    let node_name = relative_name(&fqdn, own_domain);

    let mut dr = DynuRecord {
        id,
        record_type: rec.record_type.as_str().to_string(),
        node_name,
        ttl,
        state: true,
        ..Default::default()
    };

    match &rec.record_type {
        DNSRecordType::A => dr.ipv4_address = rec.value.clone(),
        DNSRecordType::AAAA => dr.ipv6_address = rec.value.clone(),
        DNSRecordType::CNAME | DNSRecordType::NS => dr.host = rec.value.clone(),
        DNSRecordType::MX => {
            dr.host = rec.value.clone();
            dr.priority =
                i32::try_from(rec.priority).map_err(|_| invalid(rec, "priority out of range"))?;
        }
        DNSRecordType::PTR => {
            // Dynu can only point a PTR at one of its own names.
            dr.host = rec.name.clone();
            dr.node_name = relative_name(&rec.value, own_domain);
        }
        DNSRecordType::SPF | DNSRecordType::TXT => dr.text_data = rec.value.clone(),
        DNSRecordType::Other(_) => {
            return Err(DynuProviderError::UnsupportedRecordType(Box::new(
                rec.clone(),
            )));
        }
    }

    Ok(dr)
}

fn invalid(rec: &DNSRecord, reason: &str) -> DynuProviderError {
    DynuProviderError::InvalidRecord {
        record: Box::new(rec.clone()),
        reason: reason.to_string(),
    }
}
