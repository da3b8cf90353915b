//! Reading a source record, cleaning it against live field metadata, and
//! inserting the result into a destination org.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{CloneError, Result};
use crate::model::{CleanRecord, FieldSelection, ObjectDescribe, Record};
use crate::remote::OrgApi;

pub fn fetch_record(api: &dyn OrgApi, describe: &ObjectDescribe, record_id: &str) -> Result<Record> {
    debug!(
        object = %describe.api_name,
        record_id,
        custom_setting = describe.is_custom_setting,
        "fetching record"
    );
    if describe.is_custom_setting {
        return fetch_custom_setting(api, describe, record_id);
    }
    api.get_record(&describe.record_path(record_id))
}

// Custom settings are read through SOQL rather than the row URL.
fn fetch_custom_setting(
    api: &dyn OrgApi,
    describe: &ObjectDescribe,
    record_id: &str,
) -> Result<Record> {
    let soql = custom_setting_query(&describe.api_name, record_id);
    api.query_records(&soql)?
        .into_iter()
        .next()
        .ok_or_else(|| CloneError::ObjectNotFound(format!("{} {}", describe.api_name, record_id)))
}

pub(crate) fn custom_setting_query(api_name: &str, record_id: &str) -> String {
    format!(
        "SELECT FIELDS(ALL) FROM {} WHERE Id = '{}' LIMIT 1",
        api_name,
        record_id.replace('\\', "\\\\").replace('\'', "\\'")
    )
}

/// Strips everything the destination org would refuse on insert.
///
/// The field list is fetched live on every call. What survives: fields the
/// describe marks both creatable and updateable, minus `Id` and `attributes`.
pub fn clean_record(
    api: &dyn OrgApi,
    describe: &ObjectDescribe,
    record: Record,
    selection: &FieldSelection,
) -> Result<CleanRecord> {
    let fields = api.describe_fields(&describe.api_name)?;
    if fields.is_empty() {
        return Err(CloneError::DescribeUnavailable(describe.api_name.clone()));
    }
    let writable = fields
        .iter()
        .filter(|f| f.is_writable())
        .map(|f| f.name.as_str())
        .collect::<HashSet<_>>();

    let record = match selection {
        FieldSelection::All => record,
        FieldSelection::Only(names) => record.select(names),
    };
    let before = record.len();
    let clean = CleanRecord::retaining(record, |name| writable.contains(name));
    debug!(
        object = %describe.api_name,
        kept = clean.len(),
        dropped = before - clean.len(),
        "cleaned record"
    );
    Ok(clean)
}

pub fn insert_record(api: &dyn OrgApi, object_api_name: &str, record: &CleanRecord) -> Result<String> {
    let body = api.create_record(object_api_name, record)?;
    new_record_id(&body).ok_or_else(|| CloneError::InsertRejected {
        object: object_api_name.to_string(),
        body,
    })
}

/// The new id from a create response (`id`, or `Id` from older endpoints).
pub(crate) fn new_record_id(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    ["id", "Id"]
        .iter()
        .filter_map(|k| v.get(*k).and_then(|x| x.as_str()))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
