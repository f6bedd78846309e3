//! Managing finance-team accounts: the admin page, the registration form
//! and the role controls. Every route in here sits behind the admin guard.

mod create_user_endpoint;
mod role_endpoint;
mod user_form;
mod user_table;
mod users_page;

pub(crate) use create_user_endpoint::create_user_endpoint;
pub(crate) use role_endpoint::update_role_endpoint;
pub(crate) use users_page::get_admin_page;
