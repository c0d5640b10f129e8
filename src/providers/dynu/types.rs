use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

fn is_zero_i64(v: &i64) -> bool {
    *v == 0
}

fn is_zero_i32(v: &i32) -> bool {
    *v == 0
}

/// Reads an explicit `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Responses carry their outcome in the body rather than the HTTP status.
pub trait ApiResponse {
    fn status_code(&self) -> i32;
}

/// A DNS record as stored by Dynu. `node_name` is relative to the domain
/// the record belongs to; `hostname` is filled in by Dynu on reads.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DynuRecord {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero_i64")]
    pub id: i64,
    #[serde(rename = "recordType", default, deserialize_with = "null_as_default")]
    pub record_type: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero_i64")]
    pub domain_id: i64,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub domain_name: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub node_name: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub ipv4_address: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub ipv6_address: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub text_data: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero_i32")]
    pub ttl: i32,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero_i32")]
    pub priority: i32,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero_i32")]
    pub status_code: i32,
}

impl ApiResponse for DynuRecord {
    fn status_code(&self) -> i32 {
        self.status_code
    }
}

/// Answer of `GET /dns/getroot/{hostname}`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RootDomain {
    #[serde(deserialize_with = "null_as_default")]
    pub status_code: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub domain_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub node: String,
}

impl ApiResponse for RootDomain {
    fn status_code(&self) -> i32 {
        self.status_code
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status_code: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub dns_records: Vec<DynuRecord>,
}

impl ApiResponse for RecordsResponse {
    fn status_code(&self) -> i32 {
        self.status_code
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status_code: i32,
}

impl ApiResponse for DeleteResponse {
    fn status_code(&self) -> i32 {
        self.status_code
    }
}

/// Error payload. Dynu puts these fields at the top level of the body
/// instead of nesting them, so the same body is decoded twice.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiException {
    #[serde(deserialize_with = "null_as_default")]
    pub status_code: i32,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

impl ApiException {
    pub fn from_status(status_code: i32) -> Self {
        Self {
            status_code,
            kind: String::new(),
            message: String::new(),
        }
    }
}

impl fmt::Display for ApiException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.status_code, self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_record_from_listing() {
        let body = json!({
            "statusCode": 200,
            "dnsRecords": [{
                "id": 123,
                "domainId": 9,
                "domainName": "my.dynu.com",
                "nodeName": "abc",
                "hostname": "abc.my.dynu.com",
                "recordType": "A",
                "ttl": 120,
                "state": true,
                "content": "abc.my.dynu.com. 120 IN A 1.2.3.4",
                "updatedOn": "2024-01-01T00:00:00",
                "ipv4Address": "1.2.3.4"
            }]
        });
        let resp: RecordsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.status_code(), 200);
        let rec = &resp.dns_records[0];
        assert_eq!(rec.id, 123);
        assert_eq!(rec.record_type, "A");
        assert_eq!(rec.node_name, "abc");
        assert_eq!(rec.hostname, "abc.my.dynu.com");
        assert_eq!(rec.ipv4_address, "1.2.3.4");
        assert_eq!(rec.ttl, 120);
        assert!(rec.state);
    }

    #[test]
    fn test_decode_listing_with_null_fields() {
        let body = r#"{"statusCode":200,"dnsRecords":[{"id":7,"recordType":"TXT","nodeName":null,"hostname":"my.dynu.com","host":null,"textData":null,"ipv4Address":null,"content":null,"ttl":300,"priority":null,"state":null}]}"#;
        let resp: RecordsResponse = serde_json::from_str(body).unwrap();
        let rec = &resp.dns_records[0];
        assert_eq!(rec.id, 7);
        assert_eq!(rec.record_type, "TXT");
        assert_eq!(rec.node_name, "");
        assert_eq!(rec.host, "");
        assert_eq!(rec.text_data, "");
        assert_eq!(rec.content, "");
        assert_eq!(rec.ttl, 300);
        assert_eq!(rec.priority, 0);
        assert!(!rec.state);
    }

    #[test]
    fn test_decode_null_envelopes() {
        let resp: RecordsResponse =
            serde_json::from_str(r#"{"statusCode":200,"dnsRecords":null}"#).unwrap();
        assert!(resp.dns_records.is_empty());

        let exc: ApiException =
            serde_json::from_str(r#"{"statusCode":404,"type":null,"message":null}"#).unwrap();
        assert_eq!(exc, ApiException::from_status(404));

        let root: RootDomain =
            serde_json::from_str(r#"{"statusCode":200,"id":1,"domainName":"my.dynu.com","hostname":null,"node":null}"#)
                .unwrap();
        assert_eq!(root.node, "");
    }

    #[test]
    fn test_decode_negative_ttl() {
        let rec: DynuRecord =
            serde_json::from_str(r#"{"id":1,"recordType":"A","ttl":-1,"priority":-5}"#).unwrap();
        assert_eq!(rec.ttl, -1);
        assert_eq!(rec.priority, -5);
    }

    #[test]
    fn test_encode_omits_empty_fields() {
        let rec = DynuRecord {
            record_type: "TXT".to_string(),
            text_data: "hello".to_string(),
            ttl: 300,
            state: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            value,
            json!({
                "recordType": "TXT",
                "textData": "hello",
                "ttl": 300,
                "state": true
            })
        );
    }

    #[test]
    fn test_decode_exception() {
        let body = r#"{"statusCode":501,"type":"Argument Exception","message":"Invalid hostname."}"#;
        let exc: ApiException = serde_json::from_str(body).unwrap();
        assert_eq!(exc.status_code, 501);
        assert_eq!(exc.to_string(), "501: Argument Exception: Invalid hostname.");
    }

    #[test]
    fn test_decode_root_domain() {
        let body = r#"{"statusCode":200,"id":98765,"domainName":"my.dynu.com","hostname":"www.my.dynu.com","node":"www"}"#;
        let root: RootDomain = serde_json::from_str(body).unwrap();
        assert_eq!(root.id, 98765);
        assert_eq!(root.domain_name, "my.dynu.com");
        assert_eq!(root.node, "www");
    }
}
