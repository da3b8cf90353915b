//! The single pending record passed from the source flow to the destination
//! flow through persistent storage.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, warn};

use crate::browser::ExtensionStorage;
use crate::error::{CloneError, Result};
use crate::model::{CleanRecord, HandoffSlot};

pub const RECORD_KEY: &str = "RECORD_KEY";
const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    stored_at: String,
    slot: HandoffSlot,
}

pub struct HandoffStore<'a> {
    storage: &'a dyn ExtensionStorage,
}

impl<'a> HandoffStore<'a> {
    pub fn new(storage: &'a dyn ExtensionStorage) -> Self {
        Self { storage }
    }

    /// Stores `record`, replacing whatever was pending.
    pub fn put(&self, record: CleanRecord, object_api_name: &str) -> Result<()> {
        let stored_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|err| CloneError::Storage(format!("format time: {}", err)))?;
        let envelope = Envelope {
            version: ENVELOPE_VERSION,
            stored_at,
            slot: HandoffSlot {
                record,
                object_api_name: object_api_name.to_string(),
            },
        };
        let value = serde_json::to_value(&envelope)
            .map_err(|err| CloneError::Storage(format!("serialize pending record: {}", err)))?;

        // Only for the overwrite warning; an unreadable old slot is replaced too.
        match self.storage.get(RECORD_KEY) {
            Ok(Some(_)) => warn!("replacing a pending record that was never cloned"),
            Ok(None) => {}
            Err(err) => warn!(error = %format!("{:#}", err), "replacing an unreadable pending record"),
        }
        self.storage
            .set(RECORD_KEY, value)
            .map_err(CloneError::storage)?;
        debug!(object = object_api_name, "stored pending record");
        Ok(())
    }

    /// Removes and returns the pending record; a second call fails until the
    /// next `put`.
    pub fn take_and_clear(&self) -> Result<HandoffSlot> {
        let value = self
            .storage
            .take(RECORD_KEY)
            .map_err(CloneError::storage)?
            .ok_or(CloneError::NoPendingRecord)?;
        let envelope: Envelope = serde_json::from_value(value)
            .map_err(|err| CloneError::Storage(format!("parse pending record: {}", err)))?;
        if envelope.version != ENVELOPE_VERSION {
            return Err(CloneError::Storage(format!(
                "unsupported pending record version {}",
                envelope.version
            )));
        }
        debug!(
            object = %envelope.slot.object_api_name,
            stored_at = %envelope.stored_at,
            "took pending record"
        );
        Ok(envelope.slot)
    }
}

#[cfg(test)]
#[path = "tests/handoff_tests.rs"]
mod tests;
