//! Defines the route handler for the page that manages finance-team
//! accounts.

use axum::{
    Extension,
    extract::{FromRef, State},
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
    html::{BUTTON_SECONDARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    user::User,
};

use super::{
    user_form::{UserFormErrors, UserFormInput, user_form},
    user_table::users_table,
};

/// The state needed for the admin page.
#[derive(Debug, Clone)]
pub struct AdminViewState {
    /// The client for the finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for AdminViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Render the admin page, or just the account table fragment for htmx
/// refresh requests.
///
/// The page always works on the full unfiltered account list. A failed
/// fragment fetch surfaces as an alert and leaves the table already on the
/// page alone.
pub async fn get_admin_page(
    State(state): State<AdminViewState>,
    Extension(session): Extension<Session>,
    HxRequest(is_fragment_request): HxRequest,
) -> Response {
    let result = state.api.list_users(&session.token).await;

    if is_fragment_request {
        return match result {
            Ok(users) => users_table(&users, session.profile.id).into_response(),
            Err(error) => {
                tracing::error!("could not fetch users: {error}");
                Error::from(error).into_alert_response()
            }
        };
    }

    let (users, fetch_failed) = match result {
        Ok(users) => (users, false),
        Err(error) => {
            tracing::error!("could not fetch users: {error}");
            (Vec::new(), true)
        }
    };

    let content = admin_view(&users, &session, fetch_failed);

    base("Admin", &content).into_response()
}

fn admin_view(users: &[User], session: &Session, fetch_failed: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::ADMIN_VIEW, session.profile.role).into_html();
    let viewer_id = session.profile.id;

    html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between items-end mb-6"
            {
                h1 class="text-2xl font-bold" { "Admin Dashboard" }
            }

            details class="p-4 mb-6 bg-white rounded-lg shadow dark:bg-gray-800"
            {
                summary class={ "inline-block cursor-pointer " (BUTTON_SECONDARY_STYLE) }
                {
                    "New User"
                }

                div class="mt-4"
                {
                    (user_form(&UserFormInput::default(), &UserFormErrors::default()))
                }
            }

            section class="p-4 bg-white rounded-lg shadow dark:bg-gray-800"
            {
                @if fetch_failed {
                    (Alert::error(
                        "Failed to fetch users",
                        "The finance API could not be reached. Reload the page to try again.",
                    ).into_inline_markup())
                } @else {
                    (users_table(users, viewer_id))
                }
            }
        }
    }
}
