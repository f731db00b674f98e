//! A generic store for records that share the same shape: an amount, a
//! description, a category drawn from a closed enumeration and a date.

mod endpoints;
mod kind;
mod model;
mod store;
mod timestamp;

pub use endpoints::{
    create_record_endpoint, delete_record_endpoint, get_record_endpoint, list_records_endpoint,
    update_record_endpoint,
};
pub use kind::{Category, RecordKind, UnknownCategory};
pub use model::{NewRecord, Record, RecordId, RecordUpdate, create_record_table, map_row};
pub use store::RecordStore;
