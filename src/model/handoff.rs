use serde::{Deserialize, Serialize};

use super::CleanRecord;

/// The one pending record passed from the source flow to the destination flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffSlot {
    pub record: CleanRecord,
    pub object_api_name: String,
}
