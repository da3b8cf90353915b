//! Tab URL -> org instance and record id.
//!
//! Pure string/URL work; nothing here touches the network.

use url::Url;

use crate::error::{CloneError, Result};

const SALESFORCE_DOMAIN: &str = "salesforce.com";
const FORCE_DOMAIN: &str = "force.com";

/// `<org>.<service>.force.com` is the shortest host that names an org.
const MIN_FORCE_LABELS: usize = 4;

/// My Domain sandboxes are `<org>--<sandbox>`.
const SANDBOX_SEPARATOR: &str = "--";

pub const KEY_PREFIX_LEN: usize = 3;

/// Where a source record lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    pub instance_url: String,
    pub record_id: String,
}

fn parse_web_url(url: &str) -> Option<Url> {
    let parsed = Url::parse(url).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(parsed)
}

fn has_domain_suffix(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|head| head.ends_with('.'))
}

pub fn is_salesforce_host(url: &str) -> bool {
    parse_web_url(url)
        .and_then(|u| {
            u.host_str().map(|host| {
                has_domain_suffix(host, SALESFORCE_DOMAIN) || has_domain_suffix(host, FORCE_DOMAIN)
            })
        })
        .unwrap_or(false)
}

/// Canonical API base (`scheme://host[:port]`) for the org behind `url`.
///
/// `*.salesforce.com` hosts are kept as they are. `*.force.com` hosts are
/// rewritten to `<org>.salesforce.com` where `<org>` is the first label with
/// any sandbox suffix cut off; a force.com host too short to carry an org label
/// resolves to `None`.
pub fn resolve_instance_url(url: &str) -> Option<String> {
    let parsed = parse_web_url(url)?;
    let host = parsed.host_str()?;

    if has_domain_suffix(host, SALESFORCE_DOMAIN) {
        return Some(match parsed.port() {
            Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
            None => format!("{}://{}", parsed.scheme(), host),
        });
    }

    if has_domain_suffix(host, FORCE_DOMAIN) {
        let labels = host.split('.').collect::<Vec<_>>();
        if labels.len() < MIN_FORCE_LABELS {
            return None;
        }
        let first = labels[0];
        let org = first
            .split_once(SANDBOX_SEPARATOR)
            .map_or(first, |(org, _)| org);
        if org.is_empty() {
            return None;
        }
        return Some(format!("{}://{}.{}", parsed.scheme(), org, SALESFORCE_DOMAIN));
    }

    None
}

/// The first path segment of a page served by its own instance, ignoring any
/// query or fragment.
///
/// Returns `None` when the page is not served from the resolved instance
/// itself (Lightning and Visualforce hosts), since the record id is then not
/// the first path segment.
pub fn extract_record_id(url: &str) -> Option<String> {
    let parsed = parse_web_url(url)?;
    let instance = Url::parse(&resolve_instance_url(url)?).ok()?;
    if instance.host_str() != parsed.host_str()
        || instance.port_or_known_default() != parsed.port_or_known_default()
    {
        return None;
    }
    let segment = parsed.path_segments()?.next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.to_string())
}

pub fn key_prefix(record_id: &str) -> Option<&str> {
    record_id.get(..KEY_PREFIX_LEN)
}

/// Salesforce ids are 15 (case-sensitive) or 18 (case-safe) alphanumerics.
pub fn is_valid_record_id(record_id: &str) -> bool {
    matches!(record_id.len(), 15 | 18) && record_id.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn resolve_org(url: &str) -> Result<String> {
    resolve_instance_url(url)
        .ok_or_else(|| CloneError::InvalidUrl(format!("{} is not a Salesforce page", url)))
}

pub fn resolve_source(url: &str) -> Result<SourceLocation> {
    let instance_url = resolve_org(url)?;
    let record_id = extract_record_id(url)
        .filter(|id| is_valid_record_id(id))
        .ok_or_else(|| {
            CloneError::InvalidUrl(format!(
                "{} is not a record detail page (expected {}/<15 or 18 character record id>)",
                url, instance_url
            ))
        })?;
    Ok(SourceLocation {
        instance_url,
        record_id,
    })
}

#[cfg(test)]
#[path = "tests/identity_tests.rs"]
mod tests;
