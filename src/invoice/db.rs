//! Database operations for invoices.
//!
//! Mutations invalidate the shared [ListCache] so the next list read
//! reflects the write; list reads within the cache window reuse the
//! memoized result and skip the database entirely.

use rusqlite::{Connection, Row, params};
use time::OffsetDateTime;

use crate::Error;

use super::{
    cache::ListCache,
    domain::{Invoice, InvoiceDraft, InvoiceId, InvoiceStatus},
};

/// Create the invoice table and indexes.
pub fn create_invoice_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS invoice (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            invoice_number TEXT NOT NULL,
            amount REAL NOT NULL,
            due_date TEXT NOT NULL,
            status INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_invoice_name ON invoice(name);",
    )?;

    Ok(())
}

/// Insert a validated invoice and return it with its generated ID and
/// timestamps. Invalidates the list cache.
pub fn create_invoice(
    draft: InvoiceDraft,
    connection: &Connection,
    cache: &ListCache,
) -> Result<Invoice, Error> {
    let now = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO invoice (name, invoice_number, amount, due_date, status, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            draft.name,
            draft.invoice_number,
            draft.amount,
            draft.due_date,
            draft.status.as_i64(),
            now,
            now
        ],
    )?;

    let id = connection.last_insert_rowid();

    cache.invalidate();

    Ok(Invoice {
        id,
        name: draft.name,
        invoice_number: draft.invoice_number,
        amount: draft.amount,
        due_date: draft.due_date,
        status: draft.status,
        created_at: now,
        updated_at: now,
    })
}

/// Retrieve a single invoice by ID.
///
/// # Errors
/// Returns [Error::NotFound] if no invoice has the given ID.
pub fn get_invoice(invoice_id: InvoiceId, connection: &Connection) -> Result<Invoice, Error> {
    connection
        .prepare(
            "SELECT id, name, invoice_number, amount, due_date, status, created_at, updated_at
            FROM invoice WHERE id = :id",
        )?
        .query_row(&[(":id", &invoice_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve every invoice, newest first.
///
/// The result is memoized in `cache`: repeated calls within the cache
/// window issue at most one underlying query. Mutations invalidate the
/// cache, so a call after a write always hits the database.
pub fn get_all_invoices(connection: &Connection, cache: &ListCache) -> Result<Vec<Invoice>, Error> {
    if let Some(invoices) = cache.get() {
        return Ok(invoices);
    }

    let invoices: Vec<Invoice> = connection
        .prepare(
            "SELECT id, name, invoice_number, amount, due_date, status, created_at, updated_at
            FROM invoice ORDER BY id DESC",
        )?
        .query_map([], map_row)?
        .collect::<Result<_, _>>()?;

    cache.put(invoices.clone());

    Ok(invoices)
}

/// Update an invoice's user-editable fields and refresh its `updated_at`
/// timestamp. Invalidates the list cache on success.
///
/// # Errors
/// Returns [Error::UpdateMissingInvoice] if no invoice has the given ID.
pub fn update_invoice(
    invoice_id: InvoiceId,
    draft: InvoiceDraft,
    connection: &Connection,
    cache: &ListCache,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE invoice
        SET name = ?1, invoice_number = ?2, amount = ?3, due_date = ?4, status = ?5, updated_at = ?6
        WHERE id = ?7",
        params![
            draft.name,
            draft.invoice_number,
            draft.amount,
            draft.due_date,
            draft.status.as_i64(),
            OffsetDateTime::now_utc(),
            invoice_id
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingInvoice);
    }

    cache.invalidate();

    Ok(())
}

/// Delete an invoice by ID. Invalidates the list cache on success.
///
/// # Errors
/// Returns [Error::DeleteMissingInvoice] if no invoice has the given ID.
pub fn delete_invoice(
    invoice_id: InvoiceId,
    connection: &Connection,
    cache: &ListCache,
) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM invoice WHERE id = ?1", [invoice_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingInvoice);
    }

    cache.invalidate();

    Ok(())
}

fn map_row(row: &Row) -> Result<Invoice, rusqlite::Error> {
    let status_value: i64 = row.get(5)?;
    let status = InvoiceStatus::try_from(status_value).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            rusqlite::types::Type::Integer,
            Box::new(error),
        )
    })?;

    Ok(Invoice {
        id: row.get(0)?,
        name: row.get(1)?,
        invoice_number: row.get(2)?,
        amount: row.get(3)?,
        due_date: row.get(4)?,
        status,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
