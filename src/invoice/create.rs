//! Invoice creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error};

use super::{
    cache::ListCache,
    db::create_invoice,
    domain::{InvoiceDraft, InvoiceFormData, InvoiceFormErrors},
    form::{FormBanner, FormMode, invoice_form_page, invoice_form_view},
};

/// The state needed for creating an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub invoice_cache: ListCache,
}

impl FromRef<AppState> for CreateInvoiceEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            invoice_cache: state.invoice_cache.clone(),
        }
    }
}

/// Render the invoice creation page.
pub async fn get_new_invoice_page() -> Response {
    invoice_form_page(
        FormMode::Create,
        &InvoiceFormData::default(),
        &InvoiceFormErrors::default(),
        &FormBanner::None,
    )
    .into_response()
}

/// Handle invoice creation form submission.
///
/// Validation failures re-render the form with field errors and the
/// submitted values preserved; success renders a fresh form with a
/// success banner.
pub async fn create_invoice_endpoint(
    State(state): State<CreateInvoiceEndpointState>,
    Form(form_data): Form<InvoiceFormData>,
) -> Response {
    let draft = match InvoiceDraft::parse(&form_data) {
        Ok(draft) => draft,
        Err(errors) => {
            return invoice_form_view(FormMode::Create, &form_data, &errors, &FormBanner::None)
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_invoice(draft, &connection, &state.invoice_cache) {
        Ok(invoice) => {
            tracing::info!("created invoice {} ({})", invoice.id, invoice.invoice_number);

            invoice_form_view(
                FormMode::Create,
                &InvoiceFormData::default(),
                &InvoiceFormErrors::default(),
                &FormBanner::Success("Invoice created successfully".to_owned()),
            )
            .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an invoice: {error}");

            invoice_form_view(
                FormMode::Create,
                &form_data,
                &InvoiceFormErrors::default(),
                &FormBanner::Error("An error occurred while submitting the form".to_owned()),
            )
            .into_response()
        }
    }
}
