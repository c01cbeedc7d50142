//! Invoices listing page with search and status filtering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
};

use super::{
    cache::ListCache,
    db::get_all_invoices,
    domain::{DATE_FORMAT, Invoice, InvoiceStatus},
};

/// The state needed for the invoices listing page.
#[derive(Debug, Clone)]
pub struct InvoicesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub invoice_cache: ListCache,
}

impl FromRef<AppState> for InvoicesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            invoice_cache: state.invoice_cache.clone(),
        }
    }
}

/// The query parameters accepted by the invoices listing page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    search: Option<String>,
    status: Option<String>,
}

/// The status filter selected on the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusFilter {
    All,
    Only(InvoiceStatus),
}

impl StatusFilter {
    /// Parse the filter from the raw `status` query parameter.
    ///
    /// Missing, empty, and unrecognized values all select `All` so that a
    /// stale or hand-edited URL still renders the full list.
    fn from_query(status: Option<&str>) -> Self {
        match status {
            None | Some("") | Some("all") => StatusFilter::All,
            Some(value) => value
                .parse::<i64>()
                .ok()
                .and_then(|raw| InvoiceStatus::try_from(raw).ok())
                .map_or(StatusFilter::All, StatusFilter::Only),
        }
    }

    fn matches(self, invoice: &Invoice) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => invoice.status == status,
        }
    }
}

/// Select the invoices matching the search text and status filter.
///
/// The search is a case-insensitive substring match against the invoice name,
/// combined with an exact status match.
fn filter_invoices<'a>(
    invoices: &'a [Invoice],
    search: &str,
    status_filter: StatusFilter,
) -> Vec<&'a Invoice> {
    let needle = search.to_lowercase();

    invoices
        .iter()
        .filter(|invoice| invoice.name.to_lowercase().contains(&needle))
        .filter(|invoice| status_filter.matches(invoice))
        .collect()
}

/// Render the invoices listing page.
///
/// Search and filter requests arrive via htmx and only swap the table, so
/// those get the bare table fragment instead of the whole page.
pub async fn get_invoices_page(
    HxRequest(is_htmx): HxRequest,
    Query(query): Query<ListQuery>,
    State(state): State<InvoicesPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let search = query.search.as_deref().unwrap_or_default();
    let status_filter = StatusFilter::from_query(query.status.as_deref());

    let table = match get_all_invoices(&connection, &state.invoice_cache) {
        Ok(invoices) => {
            let filtered = filter_invoices(&invoices, search, status_filter);

            invoice_table_view(&filtered)
        }
        Err(error) => {
            tracing::error!("Failed to retrieve invoices: {error}");

            html! {
                div
                    id="invoice-table"
                    role="alert"
                    class="p-4 rounded-lg text-red-800 bg-red-50
                        dark:bg-gray-800 dark:text-red-400"
                {
                    "Could not load invoices. Try refreshing the page."
                }
            }
        }
    };

    if is_htmx {
        return Ok(table.into_response());
    }

    Ok(invoices_view(search, status_filter, &table).into_response())
}

fn invoices_view(search: &str, status_filter: StatusFilter, table: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::INVOICES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Invoices" }

                    a href=(endpoints::NEW_INVOICE_VIEW) class=(LINK_STYLE)
                    {
                        "Create Invoice"
                    }
                }

                (filter_controls_view(search, status_filter))

                (table)
            }
        }
    };

    base("Invoices", &content)
}

fn filter_controls_view(search: &str, status_filter: StatusFilter) -> Markup {
    html! {
        form id="invoice-filters" class="flex flex-wrap gap-4"
        {
            input
                type="search"
                name="search"
                value=(search)
                placeholder="Search by name"
                aria-label="Search invoices by name"
                class=(FORM_TEXT_INPUT_STYLE)
                hx-get=(endpoints::INVOICES_VIEW)
                hx-trigger="input changed delay:300ms, search"
                hx-target="#invoice-table"
                hx-select="#invoice-table"
                hx-swap="outerHTML"
                hx-include="closest form";

            select
                name="status"
                aria-label="Filter invoices by status"
                class=(FORM_TEXT_INPUT_STYLE)
                hx-get=(endpoints::INVOICES_VIEW)
                hx-trigger="change"
                hx-target="#invoice-table"
                hx-select="#invoice-table"
                hx-swap="outerHTML"
                hx-include="closest form"
            {
                option value="all" selected[status_filter == StatusFilter::All] { "All" }

                @for status in InvoiceStatus::ALL {
                    option
                        value=(status.as_i64())
                        selected[status_filter == StatusFilter::Only(status)]
                    {
                        (status.label())
                    }
                }
            }
        }
    }
}

fn invoice_table_view(invoices: &[&Invoice]) -> Markup {
    let table_row = |invoice: &Invoice| {
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_INVOICE_VIEW, invoice.id);
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_INVOICE, invoice.id);
        let confirm_message = format!(
            "Are you sure you want to delete the invoice for '{}'?",
            invoice.name
        );
        let due_date = invoice
            .due_date
            .format(DATE_FORMAT)
            .unwrap_or_else(|_| invoice.due_date.to_string());

        html! {
            tr id=(format!("invoice-row-{}", invoice.id)) class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (invoice.invoice_number) }
                td class=(TABLE_CELL_STYLE) { (invoice.name) }
                td class=(TABLE_CELL_STYLE) { (format_currency(invoice.amount)) }
                td class=(TABLE_CELL_STYLE) { (due_date) }
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(invoice.status.badge_style()) { (invoice.status.label()) }
                }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                        button
                            type="button"
                            class=(BUTTON_DELETE_STYLE)
                            hx-delete=(delete_url)
                            hx-confirm=(confirm_message)
                            hx-target="#alert-container"
                            hx-swap="innerHTML"
                            hx-target-error="#alert-container"
                        {
                            "Delete"
                        }
                    }
                }
            }
        }
    };

    html! {
        section class="dark:bg-gray-800 lg:max-w-5xl lg:w-full lg:mx-auto"
        {
            table
                id="invoice-table"
                class="w-full text-sm text-left rtl:text-right
                    text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Invoice #" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Due Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for invoice in invoices {
                        (table_row(invoice))
                    }

                    @if invoices.is_empty() {
                        tr
                        {
                            td
                                colspan="6"
                                class="px-6 py-4 text-center
                                    text-gray-500 dark:text-gray-400"
                            {
                                "No invoices found"
                            }
                        }
                    }
                }
            }
        }
    }
}



#[cfg(test)]
mod invoices_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use axum_htmx::HxRequest;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        endpoints,
        invoice::{InvoiceDraft, InvoiceStatus, ListCache, create_invoice, create_invoice_table},
        test_utils::{assert_valid_html, parse_html_document, parse_html_fragment},
    };

    use super::{InvoicesPageState, ListQuery, get_invoices_page};

    fn get_invoices_page_state() -> InvoicesPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_invoice_table(&connection).expect("Could not create invoice table");

        InvoicesPageState {
            db_connection: Arc::new(Mutex::new(connection)),
            invoice_cache: ListCache::new(),
        }
    }

    fn insert_invoice(state: &InvoicesPageState, name: &str, status: InvoiceStatus) -> i64 {
        let draft = InvoiceDraft {
            name: name.to_owned(),
            invoice_number: format!("INV-{name}"),
            amount: 1000.0,
            due_date: date!(2025 - 11 - 30),
            status,
        };

        create_invoice(
            draft,
            &state.db_connection.lock().unwrap(),
            &state.invoice_cache,
        )
        .expect("Could not create test invoice")
        .id
    }

    #[tokio::test]
    async fn renders_table_with_invoice_rows() {
        let state = get_invoices_page_state();
        let invoice_id = insert_invoice(&state, "Acme", InvoiceStatus::Unpaid);

        let response = get_invoices_page(HxRequest(false), Query(ListQuery::default()), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let row_selector = Selector::parse(&format!("tr#invoice-row-{invoice_id}")).unwrap();
        let row = html.select(&row_selector).next().expect("No invoice row found");

        let row_text: String = row.text().collect();
        assert!(row_text.contains("Acme"));
        assert!(row_text.contains("$1,000.00"));
        assert!(row_text.contains("2025-11-30"));
        assert!(row_text.contains("Unpaid"));
    }

    #[tokio::test]
    async fn delete_button_requires_confirmation() {
        let state = get_invoices_page_state();
        let invoice_id = insert_invoice(&state, "Acme", InvoiceStatus::Unpaid);

        let response = get_invoices_page(HxRequest(false), Query(ListQuery::default()), State(state))
            .await
            .unwrap();
        let html = parse_html_document(response).await;

        let button_selector = Selector::parse("button[hx-delete]").unwrap();
        let button = html
            .select(&button_selector)
            .next()
            .expect("No delete button found");

        assert_eq!(
            button.value().attr("hx-delete"),
            Some(endpoints::format_endpoint(endpoints::DELETE_INVOICE, invoice_id).as_str())
        );
        assert!(
            button
                .value()
                .attr("hx-confirm")
                .is_some_and(|message| message.contains("Acme"))
        );
    }

    #[tokio::test]
    async fn edit_link_points_at_edit_page() {
        let state = get_invoices_page_state();
        let invoice_id = insert_invoice(&state, "Acme", InvoiceStatus::Unpaid);

        let response = get_invoices_page(HxRequest(false), Query(ListQuery::default()), State(state))
            .await
            .unwrap();
        let html = parse_html_document(response).await;

        let edit_url = endpoints::format_endpoint(endpoints::EDIT_INVOICE_VIEW, invoice_id);
        let link_selector = Selector::parse(&format!("a[href='{edit_url}']")).unwrap();
        assert!(html.select(&link_selector).next().is_some());
    }

    #[tokio::test]
    async fn search_query_narrows_the_table() {
        let state = get_invoices_page_state();
        insert_invoice(&state, "Acme", InvoiceStatus::Unpaid);
        insert_invoice(&state, "Beta", InvoiceStatus::Paid);

        let query = ListQuery {
            search: Some("AC".to_owned()),
            status: None,
        };
        let response = get_invoices_page(HxRequest(false), Query(query), State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        let row_selector = Selector::parse("tbody tr[id^='invoice-row-']").unwrap();
        let rows = html.select(&row_selector).collect::<Vec<_>>();

        assert_eq!(rows.len(), 1);
        let row_text: String = rows[0].text().collect();
        assert!(row_text.contains("Acme"));
    }

    #[tokio::test]
    async fn status_query_narrows_the_table() {
        let state = get_invoices_page_state();
        insert_invoice(&state, "Acme", InvoiceStatus::Unpaid);
        insert_invoice(&state, "Beta", InvoiceStatus::Paid);

        let query = ListQuery {
            search: None,
            status: Some("2".to_owned()),
        };
        let response = get_invoices_page(HxRequest(false), Query(query), State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        let row_selector = Selector::parse("tbody tr[id^='invoice-row-']").unwrap();
        let rows = html.select(&row_selector).collect::<Vec<_>>();

        assert_eq!(rows.len(), 1);
        let row_text: String = rows[0].text().collect();
        assert!(row_text.contains("Beta"));
    }

    #[tokio::test]
    async fn empty_table_shows_placeholder() {
        let state = get_invoices_page_state();

        let response = get_invoices_page(HxRequest(false), Query(ListQuery::default()), State(state))
            .await
            .unwrap();
        let html = parse_html_document(response).await;

        let table_text: String = html
            .select(&Selector::parse("table#invoice-table").unwrap())
            .next()
            .expect("No invoice table found")
            .text()
            .collect();
        assert!(table_text.contains("No invoices found"));
    }

    #[tokio::test]
    async fn htmx_request_gets_table_fragment_only() {
        let state = get_invoices_page_state();
        insert_invoice(&state, "Acme", InvoiceStatus::Unpaid);

        let response = get_invoices_page(HxRequest(true), Query(ListQuery::default()), State(state))
            .await
            .unwrap();
        let html = parse_html_fragment(response).await;

        assert!(
            html.select(&Selector::parse("table#invoice-table").unwrap())
                .next()
                .is_some(),
            "Fragment should contain the invoice table"
        );
        assert!(
            html.select(&Selector::parse("nav").unwrap()).next().is_none(),
            "Fragment should not contain the page chrome"
        );
    }

    #[tokio::test]
    async fn search_input_preserves_current_query() {
        let state = get_invoices_page_state();

        let query = ListQuery {
            search: Some("acme".to_owned()),
            status: Some("1".to_owned()),
        };
        let response = get_invoices_page(HxRequest(false), Query(query), State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        let input = html
            .select(&Selector::parse("input[name='search']").unwrap())
            .next()
            .expect("No search input found");
        assert_eq!(input.value().attr("value"), Some("acme"));

        let selected = html
            .select(&Selector::parse("select[name='status'] option[selected]").unwrap())
            .next()
            .expect("No selected status option found");
        assert_eq!(selected.value().attr("value"), Some("1"));
    }
}
