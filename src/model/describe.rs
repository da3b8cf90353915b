use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Placeholder Salesforce puts in `urls.rowTemplate` where the record id goes.
pub const RECORD_ID_PLACEHOLDER: &str = "{ID}";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescribe {
    pub api_name: String,
    pub is_custom_setting: bool,
    pub record_url_template: String,
}

impl ObjectDescribe {
    pub fn record_path(&self, record_id: &str) -> String {
        self.record_url_template
            .replace(RECORD_ID_PLACEHOLDER, record_id)
    }
}

/// Key-prefix -> object metadata for one org. Built once per session and then
/// only read.
#[derive(Clone, Debug, Default)]
pub struct DescribeIndex {
    by_prefix: HashMap<String, ObjectDescribe>,
}

impl DescribeIndex {
    pub fn get(&self, key_prefix: &str) -> Option<&ObjectDescribe> {
        self.by_prefix.get(key_prefix)
    }

    pub fn len(&self) -> usize {
        self.by_prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_prefix.is_empty()
    }

    /// Entries ordered by key prefix.
    pub fn entries(&self) -> Vec<(&str, &ObjectDescribe)> {
        let mut out = self
            .by_prefix
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect::<Vec<_>>();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Returns false (and keeps the existing entry) when the prefix is taken.
    pub(crate) fn insert_if_absent(&mut self, key_prefix: String, describe: ObjectDescribe) -> bool {
        if self.by_prefix.contains_key(&key_prefix) {
            return false;
        }
        self.by_prefix.insert(key_prefix, describe);
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescribe {
    pub name: String,

    #[serde(default)]
    pub creatable: bool,

    #[serde(default)]
    pub updateable: bool,
}

impl FieldDescribe {
    pub fn is_writable(&self) -> bool {
        self.creatable && self.updateable
    }
}
