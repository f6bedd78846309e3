//! HTML rendering for the account list.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, badge},
    user::{Role, User, UserId},
};

/// The ID of the table wrapper that re-fetches itself on [REFRESH_EVENT].
pub(crate) const USERS_TABLE_ID: &str = "users-table";
/// The event a mutation fires to make the account list re-fetch itself.
pub(crate) const REFRESH_EVENT: &str = "users-changed";

const ROLE_ADMIN_STYLE: &str = "bg-purple-100 text-purple-800";
const ROLE_FINANCE_STYLE: &str = "bg-blue-100 text-blue-800";
const ACTIVE_STYLE: &str = "bg-green-100 text-green-800";
const INACTIVE_STYLE: &str = "bg-red-100 text-red-800";

fn role_badge(role: Role) -> Markup {
    let style = match role {
        Role::Admin => ROLE_ADMIN_STYLE,
        Role::Finance => ROLE_FINANCE_STYLE,
    };

    badge(role.as_str(), style)
}

fn active_badge(is_active: bool) -> Markup {
    if is_active {
        badge("Active", ACTIVE_STYLE)
    } else {
        badge("Inactive", INACTIVE_STYLE)
    }
}

/// The table of finance-team accounts.
///
/// The wrapper re-fetches itself whenever a registration or role change
/// fires [REFRESH_EVENT] on the body: account mutations always re-read the
/// authoritative list rather than patching it locally.
pub(crate) fn users_table(users: &[User], viewer_id: UserId) -> Markup {
    html! {
        div
            id=(USERS_TABLE_ID)
            hx-get=(endpoints::ADMIN_VIEW)
            hx-trigger={ (REFRESH_EVENT) " from:body" }
            hx-target="this"
            hx-swap="outerHTML"
            class="overflow-x-auto"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Username" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Email" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Role" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Actions" }
                    }
                }

                tbody
                {
                    @if users.is_empty() {
                        tr
                        {
                            td colspan="5" data-empty-state="true" class="py-12 text-center text-gray-500"
                            {
                                "No users found"
                            }
                        }
                    }

                    @for user in users {
                        (user_row(user, viewer_id))
                    }
                }
            }
        }
    }
}

/// A single account row.
///
/// The role control is hidden on the caller's own row so the treasurer
/// cannot demote the account they are signed in with.
pub(crate) fn user_row(user: &User, viewer_id: UserId) -> Markup {
    let role_url = format_endpoint(endpoints::USER_ROLE, user.id.as_i64());

    html! {
        tr class=(TABLE_ROW_STYLE) data-user-row="true"
        {
            td class=(TABLE_CELL_STYLE)
            {
                div class="text-sm font-medium text-gray-900 dark:text-white"
                {
                    (user.username)
                }

                div class="text-sm text-gray-500" { (user.full_name()) }
            }

            td class=(TABLE_CELL_STYLE) { (user.email) }

            td class=(TABLE_CELL_STYLE) { (active_badge(user.is_active)) }

            td class=(TABLE_CELL_STYLE) { (role_badge(user.role)) }

            td class={ (TABLE_CELL_STYLE) " text-right" }
            {
                @if user.id != viewer_id {
                    select
                        name="role"
                        hx-patch=(role_url)
                        hx-swap="none"
                        class="text-sm border-gray-300 rounded dark:bg-gray-700 dark:text-white"
                    {
                        option value=(Role::Finance) selected[user.role == Role::Finance]
                        {
                            "Finance"
                        }

                        option value=(Role::Admin) selected[user.role == Role::Admin]
                        {
                            "Admin"
                        }
                    }
                }
            }
        }
    }
}
