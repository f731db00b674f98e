//! Implements a SQLite backed store that is generic over the kind of record.

use std::{
    fmt::Debug,
    marker::PhantomData,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::extract::FromRef;
use rusqlite::{Connection, OptionalExtension};
use time::{Duration, OffsetDateTime};

use crate::{
    AppState, Error, Page,
    record::{
        Category, NewRecord, Record, RecordId, RecordKind, RecordUpdate, map_row,
        model::RECORD_COLUMNS,
    },
};

/// Creates, lists, fetches, updates and deletes records of kind `K`.
///
/// Every operation is a single SQL statement. The connection lock is held for
/// the duration of one operation and released when it returns, whether it
/// succeeded or not.
pub struct RecordStore<K> {
    connection: Arc<Mutex<Connection>>,
    kind: PhantomData<fn() -> K>,
}

impl<K: RecordKind> RecordStore<K> {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The table for `K` must already exist, see [initialize_db](crate::initialize_db).
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            connection,
            kind: PhantomData,
        }
    }

    /// Insert a new record and return it with its generated ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if the database rejected one of the values,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn create(&self, new_record: NewRecord<K::Category>) -> Result<Record<K::Category>, Error> {
        let connection = self.lock()?;

        let record = connection
            .prepare(&format!(
                "INSERT INTO {} (amount, description, category, date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {RECORD_COLUMNS}",
                K::TABLE
            ))?
            .query_row(
                (
                    new_record.amount,
                    new_record.description,
                    new_record.category.as_str(),
                    new_record.date,
                    OffsetDateTime::now_utc(),
                ),
                map_row::<K::Category>,
            )?;

        tracing::debug!("Created {} {}", K::NAME, record.id);

        Ok(record)
    }

    /// Retrieve at most `page.limit` records after skipping `page.offset`
    /// records, in the order they were created.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    pub fn list(&self, page: Page) -> Result<Vec<Record<K::Category>>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM {} ORDER BY id ASC LIMIT ?1 OFFSET ?2",
                K::TABLE
            ))?
            .query_map((page.limit, page.offset), map_row::<K::Category>)?
            .map(|maybe_record| maybe_record.map_err(Error::from))
            .collect()
    }

    /// Retrieve the record with the ID `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a stored record,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn get(&self, id: RecordId) -> Result<Record<K::Category>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM {} WHERE id = :id",
                K::TABLE
            ))?
            .query_row(&[(":id", &id)], map_row::<K::Category>)
            .optional()?
            .ok_or(Error::NotFound(K::NAME))
    }

    /// Overwrite the fields that are set in `update` and set the update time
    /// to now. Fields that are not set keep their stored value.
    ///
    /// The update time is always later than the record's previous update (or
    /// creation) time, even if the clock has not advanced since then.
    ///
    /// Returns the record as it is after the update.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a stored record,
    /// - [Error::Validation] if the database rejected one of the values,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn update(
        &self,
        id: RecordId,
        update: RecordUpdate<K::Category>,
    ) -> Result<Record<K::Category>, Error> {
        let connection = self.lock()?;
        let transaction = connection.unchecked_transaction()?;

        let last_changed_at: OffsetDateTime = transaction
            .prepare(&format!(
                "SELECT COALESCE(updated_at, created_at) FROM {} WHERE id = ?1",
                K::TABLE
            ))?
            .query_row([id], |row| row.get(0))
            .optional()?
            .ok_or(Error::NotFound(K::NAME))?;

        let record = transaction
            .prepare(&format!(
                "UPDATE {} SET \
                    amount = COALESCE(?1, amount), \
                    description = COALESCE(?2, description), \
                    category = COALESCE(?3, category), \
                    date = COALESCE(?4, date), \
                    updated_at = ?5 \
                WHERE id = ?6 \
                RETURNING {RECORD_COLUMNS}",
                K::TABLE
            ))?
            .query_row(
                (
                    update.amount,
                    update.description,
                    update.category.map(Category::as_str),
                    update.date,
                    next_update_time(last_changed_at, OffsetDateTime::now_utc()),
                    id,
                ),
                map_row::<K::Category>,
            )?;

        transaction.commit()?;

        tracing::debug!("Updated {} {id}", K::NAME);

        Ok(record)
    }

    /// Delete the record with the ID `id` and return it.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a stored record,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn delete(&self, id: RecordId) -> Result<Record<K::Category>, Error> {
        let connection = self.lock()?;

        let record = connection
            .prepare(&format!(
                "DELETE FROM {} WHERE id = ?1 RETURNING {RECORD_COLUMNS}",
                K::TABLE
            ))?
            .query_row([id], map_row::<K::Category>)
            .optional()?
            .ok_or(Error::NotFound(K::NAME))?;

        tracing::debug!("Deleted {} {id}", K::NAME);

        Ok(record)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

/// The time to record for an update made at `now` to a record last changed at
/// `last_changed_at`.
fn next_update_time(last_changed_at: OffsetDateTime, now: OffsetDateTime) -> OffsetDateTime {
    if now > last_changed_at {
        now
    } else {
        last_changed_at + Duration::NANOSECOND
    }
}

impl<K> Clone for RecordStore<K> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            kind: PhantomData,
        }
    }
}

impl<K: RecordKind> Debug for RecordStore<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("kind", &K::NAME)
            .finish_non_exhaustive()
    }
}

impl<K: RecordKind> FromRef<AppState> for RecordStore<K> {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.db_connection.clone())
    }
}
