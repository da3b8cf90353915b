use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ID_FIELD: &str = "Id";
pub const ATTRIBUTES_FIELD: &str = "attributes";
pub const RECORD_TYPE_FIELD: &str = "RecordTypeId";

/// A record as returned by the REST API: field API name -> value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(|v| v.as_str())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Narrows the record to `names`, skipping fields that are null or missing.
    pub fn select(self, names: &[String]) -> Record {
        let mut fields = self.0;
        let mut out = Map::new();
        for name in names {
            if let Some(v) = fields.remove(name)
                && !v.is_null()
            {
                out.insert(name.clone(), v);
            }
        }
        Record(out)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A record ready for insertion into another org.
///
/// Never holds the source `Id` or the `attributes` block: every constructor,
/// deserialization included, strips them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Record", into = "Record")]
pub struct CleanRecord(Map<String, Value>);

impl CleanRecord {
    /// Strips identity fields, then keeps only the fields `keep` accepts.
    pub fn retaining(record: Record, keep: impl Fn(&str) -> bool) -> Self {
        let mut clean = CleanRecord::from(record);
        clean.0.retain(|name, _| keep(name));
        clean
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Record> for CleanRecord {
    fn from(record: Record) -> Self {
        let mut fields = record.0;
        fields.remove(ID_FIELD);
        fields.remove(ATTRIBUTES_FIELD);
        Self(fields)
    }
}

impl From<CleanRecord> for Record {
    fn from(clean: CleanRecord) -> Self {
        Record(clean.0)
    }
}

/// Which source fields a clone carries over before describe-based cleaning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FieldSelection {
    #[default]
    All,
    Only(Vec<String>),
}

impl FieldSelection {
    /// Parses a comma-separated field list; blank input selects every field.
    pub fn parse_list(raw: &str) -> Self {
        let names = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if names.is_empty() {
            FieldSelection::All
        } else {
            FieldSelection::Only(names)
        }
    }
}
