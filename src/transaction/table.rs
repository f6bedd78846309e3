//! HTML rendering for the transaction list.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, badge, format_currency,
        format_date, format_time,
    },
    user::Role,
};

use super::models::{Transaction, TransactionStatus};

/// The ID of the table wrapper that re-fetches itself on [REFRESH_EVENT].
pub(crate) const TRANSACTIONS_TABLE_ID: &str = "transactions-table";
/// The ID of the table body that freshly created rows are prepended to.
pub(crate) const TRANSACTIONS_BODY_ID: &str = "transactions-body";
/// The ID of the placeholder row shown while the list is empty.
pub(crate) const EMPTY_STATE_ROW_ID: &str = "transactions-empty-state";
/// The ID of the filter form whose values every list fetch carries.
pub(crate) const FILTERS_FORM_ID: &str = "transaction-filters";
/// The event a mutation fires to make the table re-fetch the filtered list.
pub(crate) const REFRESH_EVENT: &str = "transactions-changed";

const STATUS_PENDING_STYLE: &str = "bg-yellow-100 text-yellow-800";
const STATUS_COMPLETED_STYLE: &str = "bg-green-100 text-green-800";

fn status_badge(status: TransactionStatus) -> Markup {
    let style = match status {
        TransactionStatus::Pending => STATUS_PENDING_STYLE,
        TransactionStatus::Completed => STATUS_COMPLETED_STYLE,
    };

    badge(status.as_str(), style)
}

/// The table of transactions for the current filter view.
///
/// The wrapper re-fetches itself, carrying the full filter set, whenever a
/// completion fires [REFRESH_EVENT] on the body.
pub(crate) fn transactions_table(transactions: &[Transaction], viewer_role: Role) -> Markup {
    html! {
        div
            id=(TRANSACTIONS_TABLE_ID)
            hx-get=(endpoints::TRANSACTIONS_VIEW)
            hx-trigger={ (REFRESH_EVENT) " from:body" }
            hx-include={ "#" (FILTERS_FORM_ID) }
            hx-target="this"
            hx-swap="outerHTML"
            hx-indicator={ "#" (FILTERS_FORM_ID) }
            class="overflow-x-auto"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Member" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Actions" }
                    }
                }

                tbody id=(TRANSACTIONS_BODY_ID)
                {
                    @if transactions.is_empty() {
                        (empty_state_row())
                    }

                    @for transaction in transactions {
                        (transaction_row(transaction, viewer_role))
                    }
                }
            }
        }
    }
}

pub(crate) fn empty_state_row() -> Markup {
    html! {
        tr id=(EMPTY_STATE_ROW_ID)
        {
            td colspan="7" data-empty-state="true" class="py-12 text-center text-gray-500"
            {
                "No transactions found"
            }
        }
    }
}

/// A single transaction row.
///
/// The completion action is rendered only for a pending transaction viewed
/// by the treasurer.
pub(crate) fn transaction_row(transaction: &Transaction, viewer_role: Role) -> Markup {
    let can_complete =
        transaction.status == TransactionStatus::Pending && viewer_role == Role::Admin;
    let complete_url =
        format_endpoint(endpoints::COMPLETE_TRANSACTION, transaction.id.as_i64());

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE)
            {
                div class="text-sm font-medium text-gray-900 dark:text-white"
                {
                    (transaction.member_name)
                }

                @if let Some(phone_number) = &transaction.phone_number {
                    div class="text-sm text-gray-500" { (phone_number) }
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                (format_currency(transaction.amount))
            }

            td class=(TABLE_CELL_STYLE)
            {
                (transaction.category.label())
            }

            td class=(TABLE_CELL_STYLE)
            {
                (transaction.payment_type.label())
            }

            td class=(TABLE_CELL_STYLE)
            {
                div { (format_date(transaction.created_at)) }
                div class="text-gray-500" { (format_time(transaction.created_at)) }
            }

            td class=(TABLE_CELL_STYLE)
            {
                (status_badge(transaction.status))
            }

            td class={ (TABLE_CELL_STYLE) " text-right" }
            {
                @if can_complete {
                    button
                        hx-post=(complete_url)
                        hx-swap="none"
                        class="text-green-600 hover:text-green-900 underline bg-transparent
                            border-none cursor-pointer"
                    {
                        "Complete"
                    }
                }
            }
        }
    }
}
