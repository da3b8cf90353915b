//! Org-wide object metadata, keyed by record id prefix.

use tracing::{debug, info, warn};

use crate::error::{CloneError, Result};
use crate::identity::key_prefix;
use crate::model::{DescribeIndex, ObjectDescribe};
use crate::remote::{OrgApi, SObjectSummary};

/// Builds the index from one listing call.
///
/// A listing without an object list completes with an empty index; lookups
/// against it then fail with `UnknownObjectType`.
pub fn load_describe_index(api: &dyn OrgApi) -> Result<DescribeIndex> {
    let listing = api.list_sobjects()?;
    let Some(sobjects) = listing.sobjects else {
        warn!(
            instance_url = api.instance_url(),
            "empty response from sobject listing; continuing with an empty describe index"
        );
        return Ok(DescribeIndex::default());
    };

    let index = build_index(sobjects);
    info!(
        instance_url = api.instance_url(),
        objects = index.len(),
        "loaded describe index"
    );
    Ok(index)
}

fn build_index(sobjects: Vec<SObjectSummary>) -> DescribeIndex {
    let mut index = DescribeIndex::default();
    for summary in sobjects {
        let Some(prefix) = summary.key_prefix.filter(|p| !p.is_empty()) else {
            continue;
        };
        let Some(template) = summary.urls.row_template else {
            continue;
        };
        let describe = ObjectDescribe {
            api_name: summary.name,
            is_custom_setting: summary.custom_setting,
            record_url_template: template,
        };
        let name = describe.api_name.clone();
        if !index.insert_if_absent(prefix.clone(), describe) {
            debug!(key_prefix = %prefix, object = %name, "duplicate key prefix ignored");
        }
    }
    index
}

pub fn lookup<'a>(index: &'a DescribeIndex, record_id: &str) -> Result<&'a ObjectDescribe> {
    let unknown = |prefix: &str| CloneError::UnknownObjectType {
        key_prefix: prefix.to_string(),
        record_id: record_id.to_string(),
    };
    let prefix = key_prefix(record_id).ok_or_else(|| unknown(record_id))?;
    index.get(prefix).ok_or_else(|| unknown(prefix))
}

#[cfg(test)]
#[path = "tests/describe_tests.rs"]
mod tests;
