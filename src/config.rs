use std::env;
use std::time::Duration;

use crate::error::Error;
use crate::providers::dynu::DEFAULT_API_URL;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_token: String,
    /// Dynu domain that record names are relative to, when it differs from
    /// the zone being managed.
    pub own_domain: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = var("DYNU_API_TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::Config("DYNU_API_TOKEN is not set".to_string()))?;
        let timeout = match var("DYNU_TIMEOUT") {
            Some(secs) => secs.parse().map_err(|_| {
                Error::Config(format!("DYNU_TIMEOUT is not a number of seconds: {secs}"))
            })?,
            None => 30,
        };

        Ok(Config {
            api_token,
            own_domain: var("DYNU_OWN_DOMAIN").filter(|domain| !domain.is_empty()),
            api_url: var("DYNU_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(timeout),
        })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    impl Default for Config {
        fn default() -> Self {
            Config {
                api_token: String::from("test-token"),
                own_domain: None,
                api_url: String::from("http://127.0.0.1:8080/v2"),
                timeout: Duration::from_secs(5),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[("DYNU_API_TOKEN", "abc")])).unwrap();
        assert_eq!(config.api_token, "abc");
        assert_eq!(config.own_domain, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_all_values() {
        let config = Config::from_vars(vars(&[
            ("DYNU_API_TOKEN", "abc"),
            ("DYNU_OWN_DOMAIN", "my.example.com"),
            ("DYNU_API_URL", "http://localhost:1234/v2"),
            ("DYNU_TIMEOUT", "5"),
        ]))
        .unwrap();
        assert_eq!(config.own_domain.as_deref(), Some("my.example.com"));
        assert_eq!(config.api_url, "http://localhost:1234/v2");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_vars(vars(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        let err = Config::from_vars(vars(&[("DYNU_API_TOKEN", "")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bad_timeout() {
        let err = Config::from_vars(vars(&[("DYNU_API_TOKEN", "abc"), ("DYNU_TIMEOUT", "soon")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_default_config_builds_provider() {
        let provider = crate::providers::dynu::DynuProvider::new(&Config::default());
        assert!(provider.is_ok());
    }
}
