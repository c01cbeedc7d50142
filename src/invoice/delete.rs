//! Endpoint for deleting an invoice.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{AppState, Error, alert::Alert};

use super::{cache::ListCache, db::delete_invoice, domain::InvoiceId};

/// The state needed for deleting an invoice.
#[derive(Debug, Clone)]
pub struct DeleteInvoiceEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub invoice_cache: ListCache,
}

impl FromRef<AppState> for DeleteInvoiceEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            invoice_cache: state.invoice_cache.clone(),
        }
    }
}

/// Delete the invoice with the ID in the URL.
///
/// On success, responds with an alert for the `#alert-container` and an
/// out-of-band swap that removes the invoice's table row.
pub async fn delete_invoice_endpoint(
    Path(invoice_id): Path<InvoiceId>,
    State(state): State<DeleteInvoiceEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_invoice(invoice_id, &connection, &state.invoice_cache) {
        Ok(()) => {
            tracing::info!("deleted invoice {invoice_id}");

            let alert = Alert::success("Done.", "Invoice deleted!").into_markup();
            let remove_row = html! {
                template {
                    tr id=(format!("invoice-row-{invoice_id}")) hx-swap-oob="delete" {}
                }
            };

            html! { (alert) (remove_row) }.into_response()
        }
        Err(error) => {
            tracing::error!("could not delete invoice {invoice_id}: {error}");
            error.into_alert_response()
        }
    }
}
