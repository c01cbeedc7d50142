//! Invoice management: domain types, storage, and the pages and endpoints
//! for listing, creating, editing, and deleting invoices.

mod cache;
mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list_page;

pub use cache::ListCache;
pub use create::{create_invoice_endpoint, get_new_invoice_page};
pub use db::{
    create_invoice, create_invoice_table, delete_invoice, get_all_invoices, get_invoice,
    update_invoice,
};
pub use delete::delete_invoice_endpoint;
pub use domain::{Invoice, InvoiceDraft, InvoiceFormData, InvoiceFormErrors, InvoiceId, InvoiceStatus};
pub use edit::{get_edit_invoice_page, update_invoice_endpoint};
pub use list_page::get_invoices_page;
