//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    invoice::{
        create_invoice_endpoint, delete_invoice_endpoint, get_edit_invoice_page,
        get_invoices_page, get_new_invoice_page, update_invoice_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::INVOICES_VIEW, get(get_invoices_page))
        .route(endpoints::NEW_INVOICE_VIEW, get(get_new_invoice_page))
        .route(endpoints::EDIT_INVOICE_VIEW, get(get_edit_invoice_page))
        .route(endpoints::POST_INVOICE, post(create_invoice_endpoint))
        .route(endpoints::PUT_INVOICE, put(update_invoice_endpoint))
        .route(endpoints::DELETE_INVOICE, delete(delete_invoice_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::INVOICES_VIEW)
}
