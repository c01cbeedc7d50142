//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/invoices/{invoice_id}/edit',
//! use [format_endpoint].

/// The root route which redirects to the invoice list.
pub const ROOT: &str = "/";
/// The page for listing all invoices.
pub const INVOICES_VIEW: &str = "/invoices";
/// The page for creating a new invoice.
pub const NEW_INVOICE_VIEW: &str = "/invoices/new";
/// The page for editing an existing invoice.
pub const EDIT_INVOICE_VIEW: &str = "/invoices/{invoice_id}/edit";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create an invoice.
pub const POST_INVOICE: &str = "/api/invoices";
/// The route to update an invoice.
pub const PUT_INVOICE: &str = "/api/invoices/{invoice_id}";
/// The route to delete an invoice.
pub const DELETE_INVOICE: &str = "/api/invoices/{invoice_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/invoices/{invoice_id}/edit',
/// '{invoice_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
