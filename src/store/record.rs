//! Record adapter - typed entities to and from untyped store records
//!
//! Comments and contacts share the store's single table; a `type`
//! discriminator field distinguishes the shapes. The discriminator is a
//! closed set - decoding dispatches over an explicit match rather than any
//! name-based lookup.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{Store, StoredRecord};

/// Name of the discriminator field.
pub const TYPE_FIELD: &str = "type";

/// A reader comment on a post. Associated to its post by slug equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub date: NaiveDateTime,
    pub content: String,
    pub email: String,
    pub post_slug: String,
}

/// A contact form submission. Not associated with any other entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub name: String,
    pub message: String,
    pub date: NaiveDateTime,
}

/// The closed set of record kinds the store holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Comment(Comment),
    Contact(Contact),
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record has no {TYPE_FIELD:?} field")]
    MissingType,

    #[error("unknown record type {0:?}")]
    UnknownType(String),

    #[error("record does not match its declared shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Flatten an entity into an untyped store record, tagged with its
/// discriminator.
pub fn to_record(record: &Record) -> Result<StoredRecord, RecordError> {
    let (kind, value) = match record {
        Record::Comment(comment) => ("comment", serde_json::to_value(comment)?),
        Record::Contact(contact) => ("contact", serde_json::to_value(contact)?),
    };

    let mut fields = match value {
        Value::Object(map) => map,
        _ => unreachable!("entities serialize to JSON objects"),
    };
    fields.insert(TYPE_FIELD.to_string(), Value::String(kind.to_string()));

    Ok(fields)
}

/// Reconstruct an entity from an untyped store record, consuming the
/// discriminator field.
pub fn from_record(record: &StoredRecord) -> Result<Record, RecordError> {
    let kind = record
        .get(TYPE_FIELD)
        .and_then(Value::as_str)
        .ok_or(RecordError::MissingType)?
        .to_string();

    let mut fields = record.clone();
    fields.remove(TYPE_FIELD);
    let fields = Value::Object(fields);

    match kind.as_str() {
        "comment" => Ok(Record::Comment(serde_json::from_value(fields)?)),
        "contact" => Ok(Record::Contact(serde_json::from_value(fields)?)),
        _ => Err(RecordError::UnknownType(kind)),
    }
}

/// Comments attached to a post, in store iteration (insertion) order.
pub fn comments_for_post(store: &Store, post_slug: &str) -> Result<Vec<Comment>, RecordError> {
    store
        .search(|r| {
            r.get(TYPE_FIELD).and_then(Value::as_str) == Some("comment")
                && r.get("post_slug").and_then(Value::as_str) == Some(post_slug)
        })
        .into_iter()
        .map(|r| match from_record(r)? {
            Record::Comment(comment) => Ok(comment),
            Record::Contact(_) => unreachable!("search filtered on comment records"),
        })
        .collect()
}
