//! Typed records, object metadata and the handoff slot.

mod describe;
mod handoff;
mod record;

pub use self::describe::{DescribeIndex, FieldDescribe, ObjectDescribe, RECORD_ID_PLACEHOLDER};
pub use self::handoff::HandoffSlot;
pub use self::record::{
    ATTRIBUTES_FIELD, CleanRecord, FieldSelection, ID_FIELD, RECORD_TYPE_FIELD, Record,
};
