use std::fmt;
use std::time::Duration;

/// Record types with a known provider encoding. Anything else is carried
/// through verbatim in `Other`.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DNSRecordType {
    A,
    AAAA,
    CNAME,
    MX,
    NS,
    PTR,
    SPF,
    TXT,
    Other(String),
}

impl DNSRecordType {
    pub fn as_str(&self) -> &str {
        match self {
            DNSRecordType::A => "A",
            DNSRecordType::AAAA => "AAAA",
            DNSRecordType::CNAME => "CNAME",
            DNSRecordType::MX => "MX",
            DNSRecordType::NS => "NS",
            DNSRecordType::PTR => "PTR",
            DNSRecordType::SPF => "SPF",
            DNSRecordType::TXT => "TXT",
            DNSRecordType::Other(tag) => tag,
        }
    }
}

impl From<&str> for DNSRecordType {
    fn from(tag: &str) -> Self {
        match tag {
            "A" => DNSRecordType::A,
            "AAAA" => DNSRecordType::AAAA,
            "CNAME" => DNSRecordType::CNAME,
            "MX" => DNSRecordType::MX,
            "NS" => DNSRecordType::NS,
            "PTR" => DNSRecordType::PTR,
            "SPF" => DNSRecordType::SPF,
            "TXT" => DNSRecordType::TXT,
            other => DNSRecordType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DNSRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-agnostic record. `name` is relative to the zone it was read
/// from or written to, with `@` standing for the zone apex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DNSRecord {
    /// Provider identifier, empty for records that do not exist yet.
    pub id: String,
    pub record_type: DNSRecordType,
    pub name: String,
    pub value: String,
    pub ttl: Duration,
    /// Only meaningful for MX records.
    pub priority: u32,
}

impl DNSRecord {
    pub fn new(
        record_type: DNSRecordType,
        name: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: String::new(),
            record_type,
            name: name.into(),
            value: value.into(),
            ttl,
            priority: 0,
        }
    }
}

impl fmt::Display for DNSRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:?}",
            self.name,
            self.ttl.as_secs(),
            self.record_type,
            self.value
        )?;
        if self.record_type == DNSRecordType::MX {
            write!(f, " priority={}", self.priority)?;
        }
        if !self.id.is_empty() {
            write!(f, " id={}", self.id)?;
        }
        Ok(())
    }
}
