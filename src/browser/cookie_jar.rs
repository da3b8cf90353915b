use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use super::CookieStore;

fn root_path() -> String {
    "/".to_string()
}

/// One cookie in the shape `chrome.cookies.getAll` exports (extra keys are ignored).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,

    #[serde(default = "root_path")]
    pub path: String,

    #[serde(default)]
    pub host_only: bool,
}

impl Cookie {
    fn matches_host(&self, host: &str) -> bool {
        let domain = self.domain.trim_start_matches('.').to_ascii_lowercase();
        if host == domain {
            return true;
        }
        !self.host_only
            && host
                .strip_suffix(&domain)
                .is_some_and(|head| head.ends_with('.'))
    }

    fn matches_path(&self, path: &str) -> bool {
        let prefix = self.path.as_str();
        if path == prefix || prefix == "/" {
            return true;
        }
        path.strip_prefix(prefix)
            .is_some_and(|rest| prefix.ends_with('/') || rest.starts_with('/'))
    }
}

/// Cookie store backed by a JSON array of exported cookies.
#[derive(Clone, Debug, Default)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("read cookie file {}", path.display()))?;
        let cookies: Vec<Cookie> = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse cookie file {}", path.display()))?;
        Ok(Self { cookies })
    }

    pub fn from_cookies(cookies: Vec<Cookie>) -> Self {
        Self { cookies }
    }
}

impl CookieStore for CookieJar {
    fn get(&self, url: &str, name: &str) -> Result<Option<String>> {
        let parsed = Url::parse(url).with_context(|| format!("parse cookie url {}", url))?;
        let Some(host) = parsed.host_str() else {
            return Ok(None);
        };
        let path = parsed.path();

        // Most specific wins: longest path, then longest domain.
        let best = self
            .cookies
            .iter()
            .filter(|c| c.name == name && c.matches_host(host) && c.matches_path(path))
            .max_by_key(|c| (c.path.len(), c.domain.trim_start_matches('.').len()));
        Ok(best.map(|c| c.value.clone()))
    }
}

#[cfg(test)]
#[path = "../tests/browser/cookie_jar_tests.rs"]
mod tests;
