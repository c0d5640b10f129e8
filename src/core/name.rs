//! Conversions between relative record names and fully-qualified names.
//!
//! Names are compared as plain text: no case folding and no trailing dot
//! handling beyond [`zone_to_fqdn`].

/// Strips the trailing dot from a zone name (`example.com.` -> `example.com`).
pub fn zone_to_fqdn(zone: &str) -> &str {
    zone.trim_end_matches('.')
}

/// Joins a relative name onto `domain`. An empty name or `@` is the domain
/// itself.
pub fn absolute_name(name: &str, domain: &str) -> String {
    if domain.is_empty() {
        return name.trim_matches('.').to_string();
    }
    if name.is_empty() || name == "@" {
        return domain.to_string();
    }
    if name.ends_with('.') {
        format!("{name}{domain}")
    } else {
        format!("{name}.{domain}")
    }
}

/// Returns `fqdn` relative to `domain`: empty when they are equal, the
/// leading labels when `fqdn` is under `domain`.
///
/// A name that is not under `domain` is returned unchanged.
pub fn relative_name(fqdn: &str, domain: &str) -> String {
    if fqdn == domain {
        return String::new();
    }
    if domain.is_empty() {
        return fqdn.to_string();
    }
    match fqdn.strip_suffix(domain) {
        Some(prefix) if prefix.ends_with('.') => prefix[..prefix.len() - 1].to_string(),
        _ => {
            tracing::debug!(fqdn, domain, "name is not under domain, keeping it as is");
            fqdn.to_string()
        }
    }
}
