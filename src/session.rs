//! Session credential lookup.

use crate::browser::CookieStore;
use crate::error::{CloneError, Result};

/// Cookie Salesforce keeps the UI session id in; the same id authorises REST calls.
pub const SESSION_COOKIE: &str = "sid";

/// The `sid` value the browser holds for `url`. A missing cookie and an empty
/// value are the same failure.
pub fn get_session_id(cookies: &dyn CookieStore, url: &str) -> Result<String> {
    match cookies.get(url, SESSION_COOKIE) {
        Ok(Some(value)) if !value.is_empty() => Ok(value),
        Ok(_) => Err(CloneError::CookieNotFound(url.to_string())),
        Err(err) => Err(CloneError::CookieStore(format!("{:#}", err))),
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
