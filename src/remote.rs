//! Salesforce REST access.
//!
//! `OrgApi` is the seam the describe/record services talk through;
//! `RestClient` implements it over `reqwest` for one org and one session.

use anyhow::Context;
use reqwest::StatusCode;
use reqwest::blocking::RequestBuilder;
use tracing::debug;

use crate::config::Settings;
use crate::error::{CloneError, Result};
use crate::model::{CleanRecord, FieldDescribe, Record};

mod http_client;

mod types;
pub use self::types::*;
mod sobjects;

/// Authenticated operations against one org.
pub trait OrgApi {
    fn instance_url(&self) -> &str;

    /// `GET /sobjects`. A body without an object list is returned with
    /// `sobjects: None` rather than failing.
    fn list_sobjects(&self) -> Result<SObjectListing>;

    /// `GET` of a row path produced from a record URL template.
    fn get_record(&self, path: &str) -> Result<Record>;

    /// `GET /query`, returning the first page of rows.
    fn query_records(&self, soql: &str) -> Result<Vec<Record>>;

    /// `GET /sobjects/{object}/describe`, returning its field list.
    fn describe_fields(&self, object: &str) -> Result<Vec<FieldDescribe>>;

    /// `POST /sobjects/{object}`. Returns the raw success body.
    fn create_record(&self, object: &str, record: &CleanRecord) -> Result<String>;
}

/// Opens an `OrgApi` for an instance URL and session id.
pub trait Connect {
    fn connect(&self, instance_url: &str, session_id: &str) -> Result<Box<dyn OrgApi>>;
}

pub struct RestClient {
    instance_url: String,
    session_id: String,
    api_version: String,
    client: reqwest::blocking::Client,
}

impl RestClient {
    pub fn new(instance_url: &str, session_id: &str, settings: &Settings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("sfclone")
            .timeout(settings.timeout())
            .build()
            .context("build reqwest client")
            .map_err(|err| CloneError::network("client setup", format!("{:#}", err)))?;
        Ok(Self {
            instance_url: instance_url.trim_end_matches('/').to_string(),
            session_id: session_id.to_string(),
            api_version: settings.api_version.clone(),
            client,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct RestConnector {
    settings: Settings,
}

impl RestConnector {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Connect for RestConnector {
    fn connect(&self, instance_url: &str, session_id: &str) -> Result<Box<dyn OrgApi>> {
        debug!(instance_url, api_version = %self.settings.api_version, "connecting");
        let client = RestClient::new(instance_url, session_id, &self.settings)?;
        Ok(Box::new(client))
    }
}
