//! Response shapes of the REST endpoints the pipeline reads.

use serde::Deserialize;

use crate::model::{FieldDescribe, Record};

#[derive(Debug, Default, Deserialize)]
pub struct SObjectListing {
    #[serde(default)]
    pub sobjects: Option<Vec<SObjectSummary>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SObjectSummary {
    pub name: String,

    /// Null for objects that have no records of their own.
    #[serde(default)]
    pub key_prefix: Option<String>,

    #[serde(default)]
    pub custom_setting: bool,

    #[serde(default)]
    pub urls: SObjectUrls,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SObjectUrls {
    #[serde(default)]
    pub row_template: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct DescribeResponse {
    #[serde(default)]
    pub(super) fields: Vec<FieldDescribe>,
}

#[derive(Debug, Deserialize)]
pub(super) struct QueryResponse {
    #[serde(default)]
    pub(super) records: Vec<Record>,
}
