use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use crate::context::Context;
use crate::providers::dynu::error::DynuProviderError;
use crate::providers::dynu::types::*;

pub const DEFAULT_API_URL: &str = "https://api.dynu.com/v2";

pub struct DynuConfig {
    pub api_token: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl DynuConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// The remote operations the provider needs from Dynu.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DynuApi: Send + Sync {
    /// Resolves a hostname to the Dynu domain that owns it.
    async fn get_root_domain(
        &self,
        ctx: &Context,
        hostname: &str,
    ) -> Result<RootDomain, DynuProviderError>;

    async fn get_records(
        &self,
        ctx: &Context,
        domain_id: i64,
    ) -> Result<Vec<DynuRecord>, DynuProviderError>;

    /// Updates the record when it has an id and `force_create` is false,
    /// creates it otherwise. Returns the record as stored by Dynu.
    async fn add_or_update_record(
        &self,
        ctx: &Context,
        domain_id: i64,
        record: &DynuRecord,
        force_create: bool,
    ) -> Result<DynuRecord, DynuProviderError>;

    async fn delete_record(
        &self,
        ctx: &Context,
        domain_id: i64,
        record_id: i64,
    ) -> Result<(), DynuProviderError>;
}

pub struct DynuClient {
    config: DynuConfig,
    client: Client,
    // Requests through one client never overlap.
    lock: Mutex<()>,
}

impl DynuClient {
    pub fn new(config: DynuConfig) -> Result<Self, DynuProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config,
            client,
            lock: Mutex::new(()),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.config.api_url.trim_end_matches('/').to_string();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    async fn execute<T>(
        &self,
        ctx: &Context,
        method: Method,
        url: String,
        body: Option<&DynuRecord>,
    ) -> Result<T, DynuProviderError>
    where
        T: DeserializeOwned + ApiResponse,
    {
        ctx.run(self.send(method, url, body)).await?
    }

    async fn send<T>(
        &self,
        method: Method,
        url: String,
        body: Option<&DynuRecord>,
    ) -> Result<T, DynuProviderError>
    where
        T: DeserializeOwned + ApiResponse,
    {
        let _guard = self.lock.lock().await;
        debug!(%method, %url, "sending Dynu API request");

        let mut request = self
            .client
            .request(method, &url)
            .header(ACCEPT, "application/json")
            .header("API-Key", &self.config.api_token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.bytes().await?;
        debug!(%url, %status, len = raw.len(), "received Dynu API response");
        decode_response(status, &raw)
    }
}

/// Decodes `raw` as `T`, turning anything but `statusCode: 200` into the
/// exception carried by the same body.
fn decode_response<T>(status: StatusCode, raw: &[u8]) -> Result<T, DynuProviderError>
where
    T: DeserializeOwned + ApiResponse,
{
    let exception = serde_json::from_slice::<ApiException>(raw).ok();

    let parsed: T = match serde_json::from_slice(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            return Err(match exception {
                Some(exc) if !status.is_success() && exc.status_code != 0 => exc.into(),
                _ => err.into(),
            });
        }
    };

    let code = parsed.status_code();
    if code != i32::from(StatusCode::OK.as_u16()) {
        let exc = exception
            .filter(|exc| exc.status_code != 0)
            .unwrap_or_else(|| ApiException::from_status(code));
        return Err(exc.into());
    }

    Ok(parsed)
}

#[async_trait]
impl DynuApi for DynuClient {
    async fn get_root_domain(
        &self,
        ctx: &Context,
        hostname: &str,
    ) -> Result<RootDomain, DynuProviderError> {
        let url = self.endpoint(&["dns", "getroot", hostname]);
        self.execute(ctx, Method::GET, url, None).await
    }

    async fn get_records(
        &self,
        ctx: &Context,
        domain_id: i64,
    ) -> Result<Vec<DynuRecord>, DynuProviderError> {
        let url = self.endpoint(&["dns", &domain_id.to_string(), "record"]);
        let response: RecordsResponse = self.execute(ctx, Method::GET, url, None).await?;
        Ok(response.dns_records)
    }

    async fn add_or_update_record(
        &self,
        ctx: &Context,
        domain_id: i64,
        record: &DynuRecord,
        force_create: bool,
    ) -> Result<DynuRecord, DynuProviderError> {
        let domain_id = domain_id.to_string();
        let record_id = record.id.to_string();
        let mut segments = vec!["dns", domain_id.as_str(), "record"];
        if record.id != 0 && !force_create {
            segments.push(record_id.as_str());
        }
        let url = self.endpoint(&segments);
        self.execute(ctx, Method::POST, url, Some(record)).await
    }

    async fn delete_record(
        &self,
        ctx: &Context,
        domain_id: i64,
        record_id: i64,
    ) -> Result<(), DynuProviderError> {
        let url = self.endpoint(&[
            "dns",
            &domain_id.to_string(),
            "record",
            &record_id.to_string(),
        ]);
        let _: DeleteResponse = self.execute(ctx, Method::DELETE, url, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_decode_success() {
        let raw = br#"{"statusCode":200,"id":5,"domainName":"example.com"}"#;
        let root: RootDomain = decode_response(StatusCode::OK, raw).unwrap();
        assert_eq!(root.id, 5);
    }

    #[test]
    fn test_decode_status_code_in_body() {
        let raw = br#"{"statusCode":501,"type":"Argument Exception","message":"bad"}"#;
        let err = decode_response::<RootDomain>(StatusCode::OK, raw).unwrap_err();
        assert_matches!(err, DynuProviderError::Api(exc) if exc.status_code == 501 && exc.kind == "Argument Exception");
    }

    #[test]
    fn test_decode_http_error_with_exception_body() {
        let raw = br#"{"statusCode":401,"type":"Authentication Exception","message":"Invalid key"}"#;
        let err = decode_response::<DeleteResponse>(StatusCode::UNAUTHORIZED, raw).unwrap_err();
        assert_matches!(err, DynuProviderError::Api(exc) if exc.message == "Invalid key");
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_response::<RecordsResponse>(StatusCode::OK, b"<html>").unwrap_err();
        assert_matches!(err, DynuProviderError::Decode(_));
    }

    #[test]
    fn test_decode_missing_status_code() {
        let err = decode_response::<DeleteResponse>(StatusCode::OK, b"{}").unwrap_err();
        assert_matches!(err, DynuProviderError::Api(exc) if exc.status_code == 0);
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let mut config = DynuConfig::new("token");
        config.api_url = "http://localhost:1234/v2/".to_string();
        let client = DynuClient::new(config).unwrap();
        assert_eq!(
            client.endpoint(&["dns", "getroot", "example.com"]),
            "http://localhost:1234/v2/dns/getroot/example.com"
        );
    }
}
