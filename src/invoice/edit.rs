//! Invoice editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error};

use super::{
    cache::ListCache,
    db::{get_invoice, update_invoice},
    domain::{InvoiceDraft, InvoiceFormData, InvoiceFormErrors, InvoiceId},
    form::{FormBanner, FormMode, invoice_form_page, invoice_form_view},
};

/// The state needed for the edit invoice page.
#[derive(Debug, Clone)]
pub struct EditInvoicePageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditInvoicePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for updating an invoice.
#[derive(Debug, Clone)]
pub struct UpdateInvoiceEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub invoice_cache: ListCache,
}

impl FromRef<AppState> for UpdateInvoiceEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            invoice_cache: state.invoice_cache.clone(),
        }
    }
}

/// Render the invoice editing page with the invoice's current values.
pub async fn get_edit_invoice_page(
    Path(invoice_id): Path<InvoiceId>,
    State(state): State<EditInvoicePageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match get_invoice(invoice_id, &connection) {
        Ok(invoice) => Ok(invoice_form_page(
            FormMode::Edit(invoice_id),
            &InvoiceFormData::from_invoice(&invoice),
            &InvoiceFormErrors::default(),
            &FormBanner::None,
        )
        .into_response()),
        Err(error) => {
            let error_message = match error {
                Error::NotFound => "Invoice not found",
                _ => {
                    tracing::error!("Failed to retrieve invoice {invoice_id}: {error}");
                    "Failed to load invoice"
                }
            };

            Ok(invoice_form_page(
                FormMode::Edit(invoice_id),
                &InvoiceFormData::default(),
                &InvoiceFormErrors::default(),
                &FormBanner::Error(error_message.to_owned()),
            )
            .into_response())
        }
    }
}

/// Handle invoice update form submission.
pub async fn update_invoice_endpoint(
    Path(invoice_id): Path<InvoiceId>,
    State(state): State<UpdateInvoiceEndpointState>,
    Form(form_data): Form<InvoiceFormData>,
) -> Response {
    let draft = match InvoiceDraft::parse(&form_data) {
        Ok(draft) => draft,
        Err(errors) => {
            return invoice_form_view(
                FormMode::Edit(invoice_id),
                &form_data,
                &errors,
                &FormBanner::None,
            )
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

    match update_invoice(invoice_id, draft, &connection, &state.invoice_cache) {
        Ok(()) => {
            tracing::info!("updated invoice {invoice_id}");

            invoice_form_view(
                FormMode::Edit(invoice_id),
                &form_data,
                &InvoiceFormErrors::default(),
                &FormBanner::Success("Invoice updated!".to_owned()),
            )
            .into_response()
        }
        Err(Error::UpdateMissingInvoice) => invoice_form_view(
            FormMode::Edit(invoice_id),
            &form_data,
            &InvoiceFormErrors::default(),
            &FormBanner::Error(
                "The invoice could not be found. It may have been deleted.".to_owned(),
            ),
        )
        .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating invoice {invoice_id}: {error}"
            );

            invoice_form_view(
                FormMode::Edit(invoice_id),
                &form_data,
                &InvoiceFormErrors::default(),
                &FormBanner::Error("An error occurred while submitting the form".to_owned()),
            )
            .into_response()
        }
    }
}


#[cfg(test)]
mod update_invoice_endpoint_tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        invoice::{
            InvoiceDraft, InvoiceFormData, InvoiceStatus, ListCache, create_invoice,
            create_invoice_table, get_invoice,
        },
        test_utils::{
            assert_form_error_message, assert_valid_html, must_get_form, parse_html_fragment,
        },
    };

    use super::{UpdateInvoiceEndpointState, update_invoice_endpoint};

    fn get_update_invoice_state() -> UpdateInvoiceEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_invoice_table(&connection).expect("Could not create invoice table");

        UpdateInvoiceEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
            invoice_cache: ListCache::with_window(Duration::from_secs(60)),
        }
    }

    fn original_draft() -> InvoiceDraft {
        InvoiceDraft {
            name: "Original".to_owned(),
            invoice_number: "INV-0001".to_owned(),
            amount: 1000.0,
            due_date: date!(2025 - 11 - 30),
            status: InvoiceStatus::Unpaid,
        }
    }

    fn updated_form() -> InvoiceFormData {
        InvoiceFormData {
            name: "Updated".to_owned(),
            invoice_number: "INV-0002".to_owned(),
            amount: "2500".to_owned(),
            due_date: "2026-01-15".to_owned(),
            status: "2".to_owned(),
        }
    }

    #[tokio::test]
    async fn update_invoice_endpoint_succeeds() {
        let state = get_update_invoice_state();
        let invoice = create_invoice(
            original_draft(),
            &state.db_connection.lock().unwrap(),
            &state.invoice_cache,
        )
        .expect("Could not create test invoice");

        let response = update_invoice_endpoint(
            Path(invoice.id),
            State(state.clone()),
            Form(updated_form()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let banner_text: String = html
            .select(&Selector::parse("div[role='status']").unwrap())
            .next()
            .expect("No success banner found")
            .text()
            .collect();
        assert!(banner_text.contains("Invoice updated!"));

        let connection = state.db_connection.lock().unwrap();
        let updated = get_invoice(invoice.id, &connection).expect("Could not get invoice");
        assert_eq!(updated.name, "Updated");
        assert_eq!(updated.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn update_with_invalid_id_shows_not_found_banner() {
        let state = get_update_invoice_state();

        let response = update_invoice_endpoint(Path(999999), State(state), Form(updated_form()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let banner_text: String = html
            .select(&Selector::parse("div[role='alert']").unwrap())
            .next()
            .expect("No error banner found")
            .text()
            .collect();
        assert!(banner_text.contains("could not be found"));
    }

    #[tokio::test]
    async fn update_with_empty_name_shows_field_error_and_changes_nothing() {
        let state = get_update_invoice_state();
        let invoice = create_invoice(
            original_draft(),
            &state.db_connection.lock().unwrap(),
            &state.invoice_cache,
        )
        .expect("Could not create test invoice");

        let form = InvoiceFormData {
            name: String::new(),
            ..updated_form()
        };

        let response = update_invoice_endpoint(Path(invoice.id), State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Name is required");

        let connection = state.db_connection.lock().unwrap();
        let unchanged = get_invoice(invoice.id, &connection).expect("Could not get invoice");
        assert_eq!(unchanged.name, "Original");
    }
}
