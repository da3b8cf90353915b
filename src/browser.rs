//! Browser-side collaborators the pipeline consumes: the active tab, the cookie
//! store and persistent extension storage.
//!
//! The traits mirror the browser APIs one-to-one; the concrete types back them
//! with files so the clone flow can run outside a browser.

use anyhow::Result;
use serde_json::Value;

mod cookie_jar;
mod storage;

pub use self::cookie_jar::{Cookie, CookieJar};
pub use self::storage::{DirStorage, MemoryStorage};

pub trait TabSource {
    /// URL of the focused tab, if there is one.
    fn active_tab_url(&self) -> Result<Option<String>>;
}

pub trait CookieStore {
    /// Value of the cookie `name` that the browser would send to `url`.
    fn get(&self, url: &str, name: &str) -> Result<Option<String>>;
}

/// Key/value storage that outlives the process (chrome.storage.local).
pub trait ExtensionStorage {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&self, key: &str, value: Value) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Reads and removes `key`. Implementations that can do this atomically
    /// should override the default.
    fn take(&self, key: &str) -> Result<Option<Value>> {
        let value = self.get(key)?;
        if value.is_some() {
            self.remove(key)?;
        }
        Ok(value)
    }
}

/// A tab whose URL is known up front (the CLI passes it in).
#[derive(Clone, Debug)]
pub struct FixedTab {
    url: String,
}

impl FixedTab {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TabSource for FixedTab {
    fn active_tab_url(&self) -> Result<Option<String>> {
        if self.url.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(self.url.clone()))
    }
}
