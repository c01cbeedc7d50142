//! Core invoice domain types and form validation.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, macros::format_description};

/// Database identifier for an invoice.
pub type InvoiceId = i64;

/// The format used for due dates in form input and display.
pub const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// The payment status of an invoice.
///
/// Statuses are stored as integers in the database and mapped to labels in
/// one place so that the form select, the list filter, and the status badge
/// all agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceStatus {
    /// The invoice has not been paid.
    Unpaid,
    /// Payment is in flight.
    Pending,
    /// The invoice has been paid in full.
    Paid,
}

/// The integer stored in the database did not map to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a valid invoice status")]
pub struct InvalidStatus(pub i64);

impl InvoiceStatus {
    /// Every status, in display order.
    pub const ALL: [InvoiceStatus; 3] = [
        InvoiceStatus::Unpaid,
        InvoiceStatus::Pending,
        InvoiceStatus::Paid,
    ];

    /// The human-readable label for the status.
    pub fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
        }
    }

    /// The integer representation stored in the database and form values.
    pub fn as_i64(self) -> i64 {
        match self {
            InvoiceStatus::Unpaid => 0,
            InvoiceStatus::Pending => 1,
            InvoiceStatus::Paid => 2,
        }
    }

    /// Tailwind classes for the status badge in the list view.
    pub fn badge_style(self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => {
                "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
                text-red-800 bg-red-100 rounded-full dark:bg-red-900 dark:text-red-300"
            }
            InvoiceStatus::Pending => {
                "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
                text-yellow-800 bg-yellow-100 rounded-full dark:bg-yellow-900 dark:text-yellow-300"
            }
            InvoiceStatus::Paid => {
                "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
                text-green-800 bg-green-100 rounded-full dark:bg-green-900 dark:text-green-300"
            }
        }
    }
}

impl TryFrom<i64> for InvoiceStatus {
    type Error = InvalidStatus;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(InvoiceStatus::Unpaid),
            1 => Ok(InvoiceStatus::Pending),
            2 => Ok(InvoiceStatus::Paid),
            other => Err(InvalidStatus(other)),
        }
    }
}

/// An invoice record.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    /// The id for the invoice. Immutable once assigned by the database.
    pub id: InvoiceId,
    /// Who or what the invoice is for.
    pub name: String,
    /// The external invoice number, e.g. "INV-0001".
    pub invoice_number: String,
    /// The invoiced amount in dollars.
    pub amount: f64,
    /// When payment is due.
    pub due_date: Date,
    /// The payment status.
    pub status: InvoiceStatus,
    /// When the record was created.
    pub created_at: OffsetDateTime,
    /// When the record was last modified.
    pub updated_at: OffsetDateTime,
}

/// The raw strings submitted from the invoice form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFormData {
    /// Who or what the invoice is for.
    pub name: String,
    /// The external invoice number.
    pub invoice_number: String,
    /// The invoiced amount as entered.
    pub amount: String,
    /// The due date as entered, expected as YYYY-MM-DD.
    pub due_date: String,
    /// The selected status as its integer value.
    pub status: String,
}

impl Default for InvoiceFormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            invoice_number: String::new(),
            amount: String::new(),
            due_date: String::new(),
            status: InvoiceStatus::Unpaid.as_i64().to_string(),
        }
    }
}

impl InvoiceFormData {
    /// The form values for editing an existing invoice.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let due_date = invoice
            .due_date
            .format(DATE_FORMAT)
            .unwrap_or_else(|_| invoice.due_date.to_string());

        Self {
            name: invoice.name.clone(),
            invoice_number: invoice.invoice_number.clone(),
            amount: invoice.amount.to_string(),
            due_date,
            status: invoice.status.as_i64().to_string(),
        }
    }
}

/// Field-keyed validation errors for the invoice form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvoiceFormErrors {
    /// Error for the name field, if any.
    pub name: Option<String>,
    /// Error for the invoice number field, if any.
    pub invoice_number: Option<String>,
    /// Error for the amount field, if any.
    pub amount: Option<String>,
    /// Error for the due date field, if any.
    pub due_date: Option<String>,
    /// Error for the status field, if any.
    pub status: Option<String>,
}

impl InvoiceFormErrors {
    /// Whether every field validated successfully.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.invoice_number.is_none()
            && self.amount.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

/// A validated, normalized invoice payload ready for the database.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    /// Who or what the invoice is for. Non-empty.
    pub name: String,
    /// The external invoice number. Non-empty.
    pub invoice_number: String,
    /// The invoiced amount. Finite and greater than zero.
    pub amount: f64,
    /// When payment is due.
    pub due_date: Date,
    /// The payment status.
    pub status: InvoiceStatus,
}

impl InvoiceDraft {
    /// Validate and coerce raw form input into a draft.
    ///
    /// This is a pure function of its input. On failure, every invalid
    /// field gets its own message so the form can surface them inline.
    pub fn parse(form: &InvoiceFormData) -> Result<Self, InvoiceFormErrors> {
        let mut errors = InvoiceFormErrors::default();

        let name = form.name.trim();
        if name.is_empty() {
            errors.name = Some("Name is required".to_owned());
        }

        let invoice_number = form.invoice_number.trim();
        if invoice_number.is_empty() {
            errors.invoice_number = Some("Invoice Number is required".to_owned());
        }

        let amount = match form.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => Some(amount),
            _ => {
                errors.amount = Some("Amount must be a positive number".to_owned());
                None
            }
        };

        let due_date_text = form.due_date.trim();
        let due_date = if due_date_text.is_empty() {
            errors.due_date = Some("Due Date is required".to_owned());
            None
        } else {
            match Date::parse(due_date_text, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.due_date = Some(
                        "Due Date must be a valid date in the format YYYY-MM-DD".to_owned(),
                    );
                    None
                }
            }
        };

        let status = match form.status.trim().parse::<i64>() {
            Ok(value) => match InvoiceStatus::try_from(value) {
                Ok(status) => Some(status),
                Err(_) => {
                    errors.status =
                        Some("Status should be either Unpaid, Pending, or Paid".to_owned());
                    None
                }
            },
            Err(_) => {
                errors.status =
                    Some("Status should be either Unpaid, Pending, or Paid".to_owned());
                None
            }
        };

        // A field is only None when an error was recorded for it.
        let (Some(amount), Some(due_date), Some(status)) = (amount, due_date, status) else {
            return Err(errors);
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: name.to_owned(),
            invoice_number: invoice_number.to_owned(),
            amount,
            due_date,
            status,
        })
    }
}
