//! Sets up the application database.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, Expense, Revenue, record::create_record_table};

/// Create the tables for every record kind if they do not exist yet.
///
/// # Errors
/// Returns an error if there is an SQL error, in which case no tables are created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_record_table::<Expense>(&transaction)?;
    create_record_table::<Revenue>(&transaction)?;

    transaction.commit()?;

    Ok(())
}
