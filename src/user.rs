//! Account types shared by the session, the admin page and the API client.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The ID of an account on the finance API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Create a user ID from an integer.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The integer value of the user ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an account is allowed to do in the console.
///
/// The default matches the user form's initial selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Treasurer-level access: record transactions, complete them, and
    /// manage accounts.
    Admin,
    /// Transaction recording only.
    #[default]
    Finance,
}

impl Role {
    /// The wire value of the role, as the finance API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Finance => "FINANCE",
        }
    }

    /// The human-readable name of the role.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Church Treasurer",
            Role::Finance => "Finance Team",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account as the finance API reports it.
///
/// The list endpoint omits the name fields, so they default to empty
/// strings rather than failing the decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The ID of the account.
    pub id: UserId,
    /// The account's unique log-in name.
    pub username: String,
    /// The account's email address.
    pub email: String,
    /// The account holder's first name.
    #[serde(default)]
    pub first_name: String,
    /// The account holder's last name.
    #[serde(default)]
    pub last_name: String,
    /// What the account is allowed to do.
    pub role: Role,
    /// Whether the account can currently log in.
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl User {
    /// The account holder's full name, or an empty string when the API did
    /// not report one.
    pub fn full_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name, self.last_name);
        full_name.trim().to_owned()
    }
}

/// The payload for registering a new account with the finance API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    /// The account's unique log-in name.
    pub username: String,
    /// The account's email address.
    pub email: String,
    /// The account holder's first name.
    pub first_name: String,
    /// The account holder's last name.
    pub last_name: String,
    /// The account's password.
    pub password: String,
    /// The password typed a second time, forwarded so the API can apply its
    /// own confirmation check.
    pub password2: String,
    /// What the account will be allowed to do.
    pub role: Role,
}

/// The username and password entered on the log-in form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Username entered during log-in.
    pub username: String,
    /// Password entered during log-in.
    pub password: String,
}
