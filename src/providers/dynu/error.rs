use crate::context::Interrupted;
use crate::core::record::DNSRecord;
use crate::error::Error;
use crate::providers::dynu::types::ApiException;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DynuProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(ApiException),

    #[error("record {0}: record type not implemented")]
    UnsupportedRecordType(Box<DNSRecord>),

    #[error("record {record}: {reason}")]
    InvalidRecord {
        record: Box<DNSRecord>,
        reason: String,
    },

    #[error(transparent)]
    Interrupted(#[from] Interrupted),
}

impl From<ApiException> for DynuProviderError {
    fn from(exc: ApiException) -> Self {
        DynuProviderError::Api(exc)
    }
}

pub fn map_error(e: DynuProviderError) -> Error {
    use DynuProviderError::*;
    match e {
        Http(err) => Error::Transport(err.to_string()),
        Decode(err) => Error::Decode(err.to_string()),
        Api(exc) => Error::Provider {
            status_code: exc.status_code,
            kind: exc.kind,
            message: exc.message,
        },
        UnsupportedRecordType(record) => Error::UnsupportedType(record),
        err @ InvalidRecord { .. } => Error::InvalidInput(err.to_string()),
        Interrupted(reason) => reason.into(),
    }
}

impl From<DynuProviderError> for Error {
    fn from(e: DynuProviderError) -> Self {
        map_error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::DNSRecordType;
    use assert_matches::assert_matches;
    use std::time::Duration;

    #[test]
    fn test_map_error_variants() {
        use DynuProviderError::*;

        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = map_error(Decode(decode));
        assert!(matches!(err, Error::Decode(_)));

        let err = map_error(Api(ApiException {
            status_code: 404,
            kind: "Not Found".to_string(),
            message: "no such domain".to_string(),
        }));
        assert!(matches!(
            err,
            Error::Provider { status_code: 404, ref kind, ref message }
                if kind == "Not Found" && message == "no such domain"
        ));

        let record = DNSRecord::new(
            DNSRecordType::Other("SRV".into()),
            "x",
            "y",
            Duration::from_secs(60),
        );
        let err = map_error(UnsupportedRecordType(Box::new(record)));
        assert!(matches!(err, Error::UnsupportedType(_)));

        let record = DNSRecord::new(DNSRecordType::A, "x", "1.2.3.4", Duration::from_secs(60));
        let err = map_error(InvalidRecord {
            record: Box::new(record),
            reason: "TTL out of range".to_string(),
        });
        assert_matches!(err, Error::InvalidInput(msg) if msg.ends_with("TTL out of range"));

        let err = map_error(Interrupted(crate::context::Interrupted::Cancelled));
        assert!(matches!(err, Error::Cancelled));
        let err = map_error(Interrupted(crate::context::Interrupted::DeadlineExceeded));
        assert!(matches!(err, Error::DeadlineExceeded));
    }

    #[test]
    fn test_unsupported_message_names_record() {
        let record = DNSRecord::new(
            DNSRecordType::Other("UNKNOWN".into()),
            "abc",
            "x",
            Duration::from_secs(120),
        );
        let err = DynuProviderError::UnsupportedRecordType(Box::new(record));
        assert_eq!(
            err.to_string(),
            "record abc 120 UNKNOWN \"x\": record type not implemented"
        );
    }
}
