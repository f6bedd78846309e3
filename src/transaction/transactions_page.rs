//! Defines the route handler for the page that records and reviews
//! transactions.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    alert::Alert,
    api::ApiClient,
    auth::Session,
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        base, loading_spinner,
    },
    navigation::NavBar,
    user::Role,
};

use super::{
    filters::TransactionFilters,
    form::{TransactionFormErrors, TransactionFormInput, transaction_form},
    models::{Category, PaymentType, Transaction, TransactionStatus},
    table::{FILTERS_FORM_ID, transactions_table},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The client for the finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Render the transactions page, or just the table fragment for htmx filter
/// and refresh requests.
///
/// Every fetch carries the full filter set; changing a single control
/// re-requests the whole filtered collection from the finance API. A failed
/// fragment fetch surfaces as an alert and leaves the table that is already
/// on the page alone.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Extension(session): Extension<Session>,
    HxRequest(is_fragment_request): HxRequest,
    Query(filters): Query<TransactionFilters>,
) -> Response {
    let result = state.api.list_transactions(&session.token, filters).await;

    if is_fragment_request {
        return match result {
            Ok(transactions) => {
                transactions_table(&transactions, session.profile.role).into_response()
            }
            Err(error) => {
                tracing::error!("could not fetch transactions: {error}");
                Error::from(error).into_alert_response()
            }
        };
    }

    let (transactions, fetch_failed) = match result {
        Ok(transactions) => (transactions, false),
        Err(error) => {
            tracing::error!("could not fetch transactions: {error}");
            (Vec::new(), true)
        }
    };

    let content = transactions_view(&transactions, filters, session.profile.role, fetch_failed);

    base("Transactions", &content).into_response()
}

fn transactions_view(
    transactions: &[Transaction],
    filters: TransactionFilters,
    viewer_role: Role,
    fetch_failed: bool,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW, viewer_role).into_html();

    html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between items-end mb-6"
            {
                h1 class="text-2xl font-bold" { "Finance Dashboard" }
            }

            details class="p-4 mb-6 bg-white rounded-lg shadow dark:bg-gray-800"
            {
                summary class={ "inline-block cursor-pointer " (BUTTON_SECONDARY_STYLE) }
                {
                    "New Transaction"
                }

                div class="mt-4"
                {
                    (transaction_form(&TransactionFormInput::default(), &TransactionFormErrors::default()))
                }
            }

            section class="p-4 mb-6 bg-white rounded-lg shadow dark:bg-gray-800"
            {
                (filter_controls(filters))
            }

            section class="p-4 bg-white rounded-lg shadow dark:bg-gray-800"
            {
                @if fetch_failed {
                    (Alert::error(
                        "Failed to fetch transactions",
                        "The finance API could not be reached. Reload the page to try again.",
                    ).into_inline_markup())
                } @else {
                    (transactions_table(transactions, viewer_role))
                }
            }
        }
    }
}

/// The filter controls for the transaction list.
///
/// Any change submits the whole form, so the fragment request (and the
/// upstream fetch it turns into) always carries every current filter value.
fn filter_controls(filters: TransactionFilters) -> Markup {
    html! {
        form
            id=(FILTERS_FORM_ID)
            hx-get=(endpoints::TRANSACTIONS_VIEW)
            hx-trigger="change"
            hx-target="#transactions-table"
            hx-swap="outerHTML"
            class="grid grid-cols-1 gap-4 md:grid-cols-2 lg:grid-cols-5"
        {
            div
            {
                label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category" id="filter-category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All Categories" }

                    @for category in [Category::Tithe, Category::Offering, Category::Building] {
                        option value=(category) selected[filters.category == Some(category)]
                        {
                            (category.label())
                        }
                    }
                }
            }

            div
            {
                label for="filter-payment-type" class=(FORM_LABEL_STYLE) { "Payment Type" }

                select name="paymentType" id="filter-payment-type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All Types" }

                    @for payment_type in [PaymentType::Cash, PaymentType::Mpesa] {
                        option
                            value=(payment_type)
                            selected[filters.payment_type == Some(payment_type)]
                        {
                            (payment_type.label())
                        }
                    }
                }
            }

            div
            {
                label for="filter-status" class=(FORM_LABEL_STYLE) { "Status" }

                select name="status" id="filter-status" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All Statuses" }

                    option
                        value=(TransactionStatus::Pending)
                        selected[filters.status == Some(TransactionStatus::Pending)]
                    {
                        "Pending"
                    }

                    option
                        value=(TransactionStatus::Completed)
                        selected[filters.status == Some(TransactionStatus::Completed)]
                    {
                        "Completed"
                    }
                }
            }

            div
            {
                label for="filter-date-from" class=(FORM_LABEL_STYLE) { "From" }

                input
                    type="date"
                    name="dateFrom"
                    id="filter-date-from"
                    value=[filters.date_from.map(|date| date.to_string())]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter-date-to" class=(FORM_LABEL_STYLE) { "To" }

                div class="flex items-center gap-2"
                {
                    input
                        type="date"
                        name="dateTo"
                        id="filter-date-to"
                        value=[filters.date_to.map(|date| date.to_string())]
                        class=(FORM_TEXT_INPUT_STYLE);

                    span class="htmx-indicator" { (loading_spinner()) }
                }
            }
        }
    }
}
