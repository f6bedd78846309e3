//! Session handling for the console: the token cookie, the per-request
//! session restore, the guards that wrap protected routes, and the log-in
//! and log-out handlers.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod session;
mod token;

pub(crate) use cookie::DEFAULT_COOKIE_DURATION;
pub(crate) use log_in::{get_log_in_page, post_log_in};
pub(crate) use log_out::get_log_out;
pub(crate) use middleware::{admin_guard, admin_guard_hx, auth_guard, auth_guard_hx};
pub(crate) use session::Session;
pub use token::AccessToken;

#[cfg(test)]
pub(crate) use cookie::{COOKIE_TOKEN, set_auth_cookie};

#[cfg(test)]
pub(crate) use middleware::AuthState;
