use std::{
    error::Error,
    path::Path,
    process::exit,
    sync::{Arc, Mutex},
};

use clap::Parser;
use rusqlite::Connection;
use time::macros::datetime;

use finance_tracker::{
    Expense, ExpenseCategory, NewRecord, RecordStore, Revenue, RevenueCategory, initialize_db,
};

/// A utility for creating a test database for the REST API server of finance_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let conn = Arc::new(Mutex::new(conn));
    let expenses = RecordStore::<Expense>::new(conn.clone());
    let revenues = RecordStore::<Revenue>::new(conn);

    println!("Creating test expenses...");

    for (amount, description, category) in [
        (155.0, "IFOOD", ExpenseCategory::Entertainment),
        (44.0, "UBER", ExpenseCategory::Transportation),
        (3500.0, "aluguel", ExpenseCategory::Housing),
    ] {
        expenses.create(NewRecord {
            amount,
            description: description.to_owned(),
            category,
            date: datetime!(2024-09-24 00:00 UTC),
        })?;
    }

    println!("Creating test revenues...");

    revenues.create(NewRecord {
        amount: 5000.0,
        description: "Salary".to_owned(),
        category: RevenueCategory::Salary,
        date: datetime!(2024-09-30 00:00 UTC),
    })?;

    println!("Success!");

    Ok(())
}
