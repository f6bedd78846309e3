//! The form for registering a new finance-team account.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    api::FieldErrors,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        loading_spinner,
    },
    user::{NewUser, Role},
};

pub(crate) const USER_FORM_ID: &str = "user-form";

/// The raw values submitted from the user form.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct UserFormInput {
    #[serde(default)]
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) first_name: String,
    #[serde(default)]
    pub(crate) last_name: String,
    #[serde(default)]
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) password2: String,
    #[serde(default)]
    pub(crate) role: Role,
}

/// Per-field error messages for the user form, produced by local validation
/// or mapped from a finance API rejection.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct UserFormErrors {
    pub(crate) username: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) password2: Option<String>,
    pub(crate) role: Option<String>,
}

impl UserFormErrors {
    pub(crate) fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.password2.is_none()
            && self.role.is_none()
    }

    /// Map a field-keyed API rejection onto the form's error display.
    ///
    /// Returns `None` when the payload names no field this form renders, in
    /// which case the caller should fall back to a generic notification.
    pub(crate) fn from_field_errors(fields: &FieldErrors) -> Option<Self> {
        let errors = Self {
            username: fields.first("username").map(str::to_owned),
            email: fields.first("email").map(str::to_owned),
            password: fields.first("password").map(str::to_owned),
            password2: fields.first("password2").map(str::to_owned),
            role: fields.first("role").map(str::to_owned),
        };

        (!errors.is_empty()).then_some(errors)
    }
}

/// Validate the draft, returning the registration payload for the finance
/// API or the field errors to display.
///
/// A draft that fails validation must never reach the network.
pub(crate) fn validate(input: &UserFormInput) -> Result<NewUser, UserFormErrors> {
    let mut errors = UserFormErrors::default();

    if input.username.trim().is_empty() {
        errors.username = Some("Username is required".to_owned());
    }

    if input.email.trim().is_empty() {
        errors.email = Some("Email is required".to_owned());
    }

    if input.password.is_empty() {
        errors.password = Some("Password is required".to_owned());
    }

    if input.password != input.password2 {
        errors.password2 = Some("Passwords do not match".to_owned());
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewUser {
        username: input.username.trim().to_owned(),
        email: input.email.trim().to_owned(),
        first_name: input.first_name.trim().to_owned(),
        last_name: input.last_name.trim().to_owned(),
        password: input.password.clone(),
        password2: input.password2.clone(),
        role: input.role,
    })
}

fn field_error(message: &Option<String>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class=(FORM_ERROR_STYLE) { (message) }
        }
    }
}

fn text_field(
    label: &str,
    name: &str,
    input_type: &str,
    value: &str,
    error: &Option<String>,
) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                type=(input_type)
                name=(name)
                id=(name)
                value=[(input_type != "password").then_some(value)]
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(error))
        }
    }
}

/// Render the user form with the given draft values and field errors.
///
/// Passwords are never echoed back; everything else survives a rejected
/// submission so the operator can correct and retry.
pub(crate) fn user_form(input: &UserFormInput, errors: &UserFormErrors) -> Markup {
    html! {
        form
            id=(USER_FORM_ID)
            hx-post=(endpoints::USERS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-disabled-elt="find button[type='submit']"
            hx-indicator="#user-form-indicator"
            class="space-y-4"
        {
            div class="grid grid-cols-1 gap-6 md:grid-cols-2"
            {
                (text_field("Username *", "username", "text", &input.username, &errors.username))
                (text_field("Email *", "email", "email", &input.email, &errors.email))
                (text_field("First Name", "first_name", "text", &input.first_name, &None))
                (text_field("Last Name", "last_name", "text", &input.last_name, &None))
                (text_field("Password *", "password", "password", "", &errors.password))
                (text_field("Confirm Password *", "password2", "password", "", &errors.password2))

                div
                {
                    label for="role" class=(FORM_LABEL_STYLE) { "Role *" }

                    select name="role" id="role" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value=(Role::Finance) selected[input.role == Role::Finance]
                        {
                            (Role::Finance.label())
                        }

                        option value=(Role::Admin) selected[input.role == Role::Admin]
                        {
                            (Role::Admin.label())
                        }
                    }

                    (field_error(&errors.role))
                }
            }

            div class="flex justify-end mt-6"
            {
                button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" id="user-form-indicator"
                    {
                        (loading_spinner())
                    }
                    "Create User"
                }
            }
        }
    }
}
