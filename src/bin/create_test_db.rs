use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use invoicer_rs::{InvoiceDraft, InvoiceStatus, ListCache, create_invoice, initialize_db};

/// A utility for creating a test database for the invoice management server.
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
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test invoices...");

    let cache = ListCache::new();
    let due_date = (OffsetDateTime::now_utc() + Duration::days(7)).date();

    for n in 1..=10 {
        let status = if n % 2 == 1 {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Pending
        };

        let draft = InvoiceDraft {
            name: format!("Invoice {n}"),
            invoice_number: format!("INV-{n:04}"),
            amount: 500.0 + 500.0 * n as f64,
            due_date,
            status,
        };

        create_invoice(draft, &conn, &cache)?;
    }

    println!("Success!");

    Ok(())
}
