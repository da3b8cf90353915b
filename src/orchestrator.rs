//! Sequences the pipeline for the two user actions.
//!
//! Each action builds the state it needs (`OrgSession`) and hands it from
//! stage to stage; nothing is kept between actions except the handoff slot.

use serde::Serialize;
use tracing::{debug, info};

use crate::browser::{CookieStore, ExtensionStorage, TabSource};
use crate::describe::{load_describe_index, lookup};
use crate::error::{CloneError, Result};
use crate::handoff::HandoffStore;
use crate::identity;
use crate::model::{DescribeIndex, FieldSelection, HandoffSlot, ObjectDescribe, RECORD_TYPE_FIELD};
use crate::record::{clean_record, fetch_record, insert_record};
use crate::remote::{Connect, OrgApi};
use crate::session::get_session_id;

/// One org as seen from one tab, for the duration of one action.
pub struct OrgSession {
    pub instance_url: String,
    pub api: Box<dyn OrgApi>,
    pub index: DescribeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceSelected {
    pub instance_url: String,
    pub record_id: String,
    pub object_api_name: String,
    pub field_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CloneOutcome {
    pub instance_url: String,
    pub object_api_name: String,
    pub new_id: String,
}

pub struct Orchestrator<'a> {
    tabs: &'a dyn TabSource,
    cookies: &'a dyn CookieStore,
    connector: &'a dyn Connect,
    handoff: HandoffStore<'a>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        tabs: &'a dyn TabSource,
        cookies: &'a dyn CookieStore,
        connector: &'a dyn Connect,
        storage: &'a dyn ExtensionStorage,
    ) -> Self {
        Self {
            tabs,
            cookies,
            connector,
            handoff: HandoffStore::new(storage),
        }
    }

    fn active_url(&self) -> Result<String> {
        self.tabs
            .active_tab_url()
            .map_err(|err| CloneError::InvalidUrl(format!("read active tab url: {:#}", err)))?
            .ok_or_else(|| CloneError::InvalidUrl("no active tab".to_string()))
    }

    /// Session, connection and describe index for the org behind `tab_url`.
    pub fn open_org(&self, tab_url: &str) -> Result<OrgSession> {
        let instance_url = identity::resolve_org(tab_url)?;
        let session_id = get_session_id(self.cookies, tab_url)?;
        let api = self.connector.connect(&instance_url, &session_id)?;
        let index = load_describe_index(api.as_ref())?;
        Ok(OrgSession {
            instance_url,
            api,
            index,
        })
    }

    /// Reads the record open in the active tab, cleans it and leaves it pending.
    pub fn select_source_record(&self, selection: &FieldSelection) -> Result<SourceSelected> {
        let tab_url = self.active_url()?;
        let location = identity::resolve_source(&tab_url)?;
        debug!(record_id = %location.record_id, "selecting source record");

        let org = self.open_org(&tab_url)?;
        let describe = lookup(&org.index, &location.record_id)?;
        let record = fetch_record(org.api.as_ref(), describe, &location.record_id)?;
        let clean = clean_record(org.api.as_ref(), describe, record, selection)?;
        let field_count = clean.len();

        self.handoff.put(clean, &describe.api_name)?;
        info!(
            instance_url = %org.instance_url,
            object = %describe.api_name,
            record_id = %location.record_id,
            field_count,
            "source record selected"
        );
        Ok(SourceSelected {
            instance_url: org.instance_url.clone(),
            record_id: location.record_id,
            object_api_name: describe.api_name.clone(),
            field_count,
        })
    }

    /// Inserts the pending record into the org open in the active tab.
    ///
    /// The destination org and session are resolved before the pending record
    /// is consumed; once taken it is gone even if the insert then fails.
    pub fn clone_to_destination(&self) -> Result<CloneOutcome> {
        let tab_url = self.active_url()?;
        let instance_url = identity::resolve_org(&tab_url)?;
        let session_id = get_session_id(self.cookies, &tab_url)?;

        let HandoffSlot {
            mut record,
            object_api_name,
        } = self.handoff.take_and_clear()?;
        // Record type ids are org specific.
        if record.remove(RECORD_TYPE_FIELD).is_some() {
            debug!(object = %object_api_name, "dropped source record type");
        }

        let api = self.connector.connect(&instance_url, &session_id)?;
        let new_id = insert_record(api.as_ref(), &object_api_name, &record)?;
        info!(
            instance_url = %instance_url,
            object = %object_api_name,
            new_id = %new_id,
            "record cloned"
        );
        Ok(CloneOutcome {
            instance_url,
            object_api_name,
            new_id,
        })
    }

    /// Describe index of the org in the active tab, ordered by key prefix.
    pub fn list_objects(&self) -> Result<Vec<(String, ObjectDescribe)>> {
        let tab_url = self.active_url()?;
        let org = self.open_org(&tab_url)?;
        Ok(org
            .index
            .entries()
            .into_iter()
            .map(|(prefix, describe)| (prefix.to_string(), describe.clone()))
            .collect())
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
