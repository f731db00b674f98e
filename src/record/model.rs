//! The record shape shared by every record kind and its table definition.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::record::{Category, RecordKind, UnknownCategory, timestamp};

/// Alias for the integer type used for record IDs.
pub type RecordId = i64;

/// The columns of a record table in the order [map_row] expects them.
pub(crate) const RECORD_COLUMNS: &str =
    "id, amount, description, category, date, created_at, updated_at";

/// A stored expense or revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<C> {
    /// The ID assigned by the store when the record was created.
    pub id: RecordId,
    /// How much money the record is for.
    pub amount: f64,
    /// What the money was for or where it came from.
    pub description: String,
    /// The category the record belongs to.
    #[serde(rename = "type")]
    pub category: C,
    /// When the expense or revenue happened.
    #[serde(with = "timestamp")]
    pub date: OffsetDateTime,
    /// When the record was created.
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
    /// When the record was last updated, `None` if it has never been updated.
    #[serde(with = "timestamp::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// The fields needed to create a record. All fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord<C> {
    /// How much money the record is for.
    pub amount: f64,
    /// What the money was for or where it came from.
    pub description: String,
    /// The category the record belongs to.
    #[serde(rename = "type")]
    pub category: C,
    /// When the expense or revenue happened.
    #[serde(with = "timestamp")]
    pub date: OffsetDateTime,
}

/// A partial update to a record. Fields that are `None` keep their stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct RecordUpdate<C> {
    /// The new amount.
    #[serde(default)]
    pub amount: Option<f64>,
    /// The new description.
    #[serde(default)]
    pub description: Option<String>,
    /// The new category.
    #[serde(default, rename = "type")]
    pub category: Option<C>,
    /// The new date.
    #[serde(default, with = "timestamp::option")]
    pub date: Option<OffsetDateTime>,
}

impl<C> Default for RecordUpdate<C> {
    fn default() -> Self {
        Self {
            amount: None,
            description: None,
            category: None,
            date: None,
        }
    }
}

/// Create the table for records of kind `K` if it does not exist yet.
///
/// The category column only accepts the names of the members of `K::Category`.
pub fn create_record_table<K: RecordKind>(connection: &Connection) -> Result<(), rusqlite::Error> {
    let members = K::Category::MEMBERS
        .iter()
        .map(|member| format!("'{}'", member.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL CHECK (category IN ({members})),
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT
            )",
            K::TABLE
        ),
        (),
    )?;

    Ok(())
}

/// Convert a row selected with [RECORD_COLUMNS] into a record.
pub fn map_row<C: Category>(row: &Row) -> Result<Record<C>, rusqlite::Error> {
    let raw_category: String = row.get(3)?;
    let category = match C::parse(&raw_category) {
        Some(category) => category,
        None => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                Box::new(UnknownCategory(raw_category)),
            ));
        }
    };

    Ok(Record {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        category,
        date: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
