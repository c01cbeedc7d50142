//! Alert fragments for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element of the base page. The static `app.js` script
//! reveals the container and dismisses the alert after a fixed delay.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// How long an alert stays on screen before `app.js` dismisses it.
pub const ALERT_DISMISS_MILLIS: u32 = 3_000;

const SUCCESS_STYLE: &str = "flex items-center p-4 mb-4 rounded-lg \
    text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400";
const ERROR_STYLE: &str = "flex items-center p-4 mb-4 rounded-lg \
    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400";

enum AlertKind {
    Success,
    Error,
}

/// A success or error notice.
pub struct Alert {
    status: StatusCode,
    kind: AlertKind,
    title: String,
    message: String,
}

impl Alert {
    /// Create a success alert.
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            status: StatusCode::OK,
            kind: AlertKind::Success,
            title: title.to_owned(),
            message: message.to_owned(),
        }
    }

    /// Create an error alert with the given HTTP status.
    pub fn error(status: StatusCode, title: &str, message: &str) -> Self {
        Self {
            status,
            kind: AlertKind::Error,
            title: title.to_owned(),
            message: message.to_owned(),
        }
    }

    /// Render the alert as a markup fragment.
    pub fn into_markup(self) -> Markup {
        let style = match self.kind {
            AlertKind::Success => SUCCESS_STYLE,
            AlertKind::Error => ERROR_STYLE,
        };

        html! {
            div
                role="alert"
                class=(style)
                data-auto-dismiss=(ALERT_DISMISS_MILLIS)
            {
                p
                {
                    span class="font-medium" { (self.title) " " }
                    (self.message)
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        let status = self.status;

        (status, self.into_markup()).into_response()
    }
}
