//! The shared invoice form view used by both the create and edit pages.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, base,
    },
    navigation::NavBar,
};

use super::domain::{InvoiceFormData, InvoiceFormErrors, InvoiceId, InvoiceStatus};

/// Whether the form creates a new invoice or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// The form submits to the create endpoint.
    Create,
    /// The form submits to the update endpoint for the given invoice.
    Edit(InvoiceId),
}

impl FormMode {
    fn submit_label(self) -> &'static str {
        match self {
            FormMode::Create => "Create Invoice",
            FormMode::Edit(_) => "Update Invoice",
        }
    }
}

/// A root-level notice shown above the form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormBanner {
    /// Nothing to report.
    None,
    /// The submission succeeded.
    Success(String),
    /// The submission failed for a reason that is not tied to one field.
    Error(String),
}

/// Render the full page containing the invoice form.
pub fn invoice_form_page(
    mode: FormMode,
    values: &InvoiceFormData,
    errors: &InvoiceFormErrors,
    banner: &FormBanner,
) -> Markup {
    let (title, active_endpoint) = match mode {
        FormMode::Create => ("Create Invoice".to_owned(), endpoints::NEW_INVOICE_VIEW),
        FormMode::Edit(_) => (
            format!("Editing \"{}\"", values.name),
            endpoints::INVOICES_VIEW,
        ),
    };
    let nav_bar = NavBar::new(active_endpoint).into_html();
    let form = invoice_form_view(mode, values, errors, banner);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold self-start my-4" { (title) }

            (form)
        }
    };

    base(&title, &content)
}

/// Render the invoice form fragment.
///
/// Submissions swap this fragment in place, so validation errors and
/// banners re-render without a full page load.
pub fn invoice_form_view(
    mode: FormMode,
    values: &InvoiceFormData,
    errors: &InvoiceFormErrors,
    banner: &FormBanner,
) -> Markup {
    let field_error = |message: &Option<String>| {
        html! {
            @if let Some(message) = message {
                p class={ "field-error " (FORM_ERROR_STYLE) } { (message) }
            }
        }
    };

    html! {
        form
            hx-post=[matches!(mode, FormMode::Create)
                .then_some(endpoints::POST_INVOICE)]
            hx-put=[match mode {
                FormMode::Edit(invoice_id) =>
                    Some(endpoints::format_endpoint(endpoints::PUT_INVOICE, invoice_id)),
                FormMode::Create => None,
            }]
            hx-target="this"
            hx-swap="outerHTML"
            hx-disabled-elt="find button[type='submit']"
            class="w-full space-y-4 md:space-y-6"
        {
            (banner_view(banner))

            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Name"
                    value=(values.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(&errors.name))
            }

            div
            {
                label for="invoice_number" class=(FORM_LABEL_STYLE) { "Invoice Number" }

                input
                    id="invoice_number"
                    type="text"
                    name="invoice_number"
                    placeholder="INV-0001"
                    value=(values.invoice_number)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(&errors.invoice_number))
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    value=(values.amount)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(&errors.amount))
            }

            div
            {
                label for="due_date" class=(FORM_LABEL_STYLE) { "Due Date" }

                input
                    id="due_date"
                    type="date"
                    name="due_date"
                    value=(values.due_date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(&errors.due_date))
            }

            div
            {
                label for="status" class=(FORM_LABEL_STYLE) { "Status" }

                select
                    id="status"
                    name="status"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for status in InvoiceStatus::ALL {
                        option
                            value=(status.as_i64())
                            selected[values.status == status.as_i64().to_string()]
                        {
                            (status.label())
                        }
                    }
                }

                (field_error(&errors.status))
            }

            div class="flex items-center gap-4"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (mode.submit_label()) }

                a href=(endpoints::INVOICES_VIEW) class=(LINK_STYLE) { "Back" }
            }
        }
    }
}

fn banner_view(banner: &FormBanner) -> Markup {
    html! {
        @match banner {
            FormBanner::None => {}
            FormBanner::Success(message) => {
                div
                    role="status"
                    class="p-4 rounded-lg text-green-800 bg-green-50
                        dark:bg-gray-800 dark:text-green-400"
                {
                    span class="font-medium" { "Success. " }
                    (message)
                }
            }
            FormBanner::Error(message) => {
                div
                    role="alert"
                    class="p-4 rounded-lg text-red-800 bg-red-50
                        dark:bg-gray-800 dark:text-red-400"
                {
                    span class="font-medium" { "Error. " }
                    (message)
                }
            }
        }
    }
}
