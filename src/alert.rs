//! Alert fragments for surfacing success and error notifications.
//!
//! Alerts are delivered as out-of-band swaps into the `#alert-container`
//! element that [crate::html::base] renders on every page, so any htmx
//! response can notify the user without disturbing its own swap target.

use axum::response::{IntoResponse, Response};
use axum_htmx::{HxReswap, SwapOption};
use maud::{Markup, html};

/// The ID of the fixed container that alerts are swapped into.
pub(crate) const ALERT_CONTAINER_ID: &str = "alert-container";

const SUCCESS_STYLE: &str = "p-4 mb-2 rounded border border-green-300 \
    bg-green-50 text-green-800 dark:bg-gray-800 dark:border-green-800 \
    dark:text-green-300 shadow";

const ERROR_STYLE: &str = "p-4 mb-2 rounded border border-red-300 \
    bg-red-50 text-red-800 dark:bg-gray-800 dark:border-red-800 \
    dark:text-red-300 shadow";

/// A success or error notification.
pub(crate) struct Alert<'a> {
    style: &'static str,
    message: &'a str,
    details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new success alert.
    pub(crate) fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            style: SUCCESS_STYLE,
            message,
            details,
        }
    }

    /// Create a new error alert.
    pub(crate) fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            style: ERROR_STYLE,
            message,
            details,
        }
    }

    /// Render the alert in place, for embedding directly in a page.
    pub(crate) fn into_inline_markup(self) -> Markup {
        html! {
            div role="alert" class=(self.style)
            {
                p class="font-semibold" { (self.message) }

                @if !self.details.is_empty() {
                    p class="text-sm" { (self.details) }
                }
            }
        }
    }

    /// Render the alert as an out-of-band fragment for inclusion in a larger
    /// response body.
    pub(crate) fn into_markup(self) -> Markup {
        html! {
            div hx-swap-oob={ "innerHTML:#" (ALERT_CONTAINER_ID) }
            {
                (self.into_inline_markup())
            }
        }
    }

    /// Render the alert as a whole response.
    ///
    /// The `HX-Reswap: none` header stops htmx from swapping the (otherwise
    /// empty) response body into the request's target, so the content already
    /// on the page stays as it was.
    pub(crate) fn into_response(self) -> Response {
        (HxReswap(SwapOption::None), self.into_markup()).into_response()
    }
}

/// Shorthand for an error alert response.
pub(crate) fn error_alert(message: &str, details: &str) -> Response {
    Alert::error(message, details).into_response()
}

#[cfg(test)]
mod alert_tests {
    use scraper::Selector;

    use crate::test_utils::parse_html_fragment;

    use super::{ALERT_CONTAINER_ID, Alert};

    #[test]
    fn alert_markup_targets_container_out_of_band() {
        let markup = Alert::success("Saved", "The record was saved.").into_markup();
        let html = parse_html_fragment(&markup.into_string());

        let oob_selector = Selector::parse("div[hx-swap-oob]").unwrap();
        let oob = html
            .select(&oob_selector)
            .next()
            .expect("alert should be wrapped in an out-of-band div");
        assert_eq!(
            oob.value().attr("hx-swap-oob"),
            Some(format!("innerHTML:#{ALERT_CONTAINER_ID}").as_str())
        );
    }

    #[test]
    fn alert_markup_contains_message_and_details() {
        let markup = Alert::error("Failed", "Something broke.").into_markup();
        let html = parse_html_fragment(&markup.into_string());

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Failed"), "alert should contain the message");
        assert!(
            text.contains("Something broke."),
            "alert should contain the details"
        );
    }

    #[test]
    fn alert_without_details_omits_details_paragraph() {
        let markup = Alert::success("Saved", "").into_markup();
        let html = parse_html_fragment(&markup.into_string());

        let p_selector = Selector::parse("p").unwrap();
        let paragraphs = html.select(&p_selector).count();
        assert_eq!(paragraphs, 1, "want 1 paragraph, got {paragraphs}");
    }

    #[tokio::test]
    async fn alert_response_suppresses_target_swap() {
        let response = Alert::error("Failed", "").into_response();

        let reswap = response
            .headers()
            .get("hx-reswap")
            .expect("alert response should set HX-Reswap");
        assert_eq!(reswap, "none");
    }
}
