//! The form for recording a new transaction: its draft state, the
//! validation that runs before the finance API is called, and its markup.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    api::FieldErrors,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
};

use super::models::{Category, NewTransaction, PaymentType};

pub(crate) const TRANSACTION_FORM_ID: &str = "transaction-form";

/// The raw values submitted from the transaction form.
///
/// The amount stays a string until validation so that a non-numeric entry
/// can be reported as a field error rather than failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TransactionFormInput {
    /// The name of the member the contribution was received from.
    #[serde(default)]
    pub(crate) member_name: String,
    /// The member's phone number, required when paying by M-Pesa.
    #[serde(default)]
    pub(crate) phone_number: String,
    /// The amount as typed.
    #[serde(default)]
    pub(crate) amount: String,
    /// What the contribution was given towards.
    #[serde(default)]
    pub(crate) category: Category,
    /// How the contribution was paid.
    #[serde(default)]
    pub(crate) payment_type: PaymentType,
}

/// Per-field error messages for the transaction form, produced by local
/// validation or mapped from a finance API rejection.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TransactionFormErrors {
    pub(crate) member_name: Option<String>,
    pub(crate) amount: Option<String>,
    pub(crate) phone_number: Option<String>,
}

impl TransactionFormErrors {
    pub(crate) fn is_empty(&self) -> bool {
        self.member_name.is_none() && self.amount.is_none() && self.phone_number.is_none()
    }

    /// Map a field-keyed API rejection onto the form's error display.
    ///
    /// Returns `None` when the payload names no field this form renders, in
    /// which case the caller should fall back to a generic notification.
    pub(crate) fn from_field_errors(fields: &FieldErrors) -> Option<Self> {
        let errors = Self {
            member_name: fields.first("member_name").map(str::to_owned),
            amount: fields.first("amount").map(str::to_owned),
            phone_number: fields.first("phone_number").map(str::to_owned),
        };

        (!errors.is_empty()).then_some(errors)
    }
}

/// Validate the draft, returning the payload for the finance API or the
/// field errors to display.
///
/// A draft that fails validation must never reach the network.
pub(crate) fn validate(input: &TransactionFormInput) -> Result<NewTransaction, TransactionFormErrors> {
    let mut errors = TransactionFormErrors::default();

    if input.member_name.trim().is_empty() {
        errors.member_name = Some("Member name is required".to_owned());
    }

    let amount = match input.amount.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Some(amount),
        _ => {
            errors.amount = Some("Valid amount is required".to_owned());
            None
        }
    };

    if input.payment_type == PaymentType::Mpesa && input.phone_number.trim().is_empty() {
        errors.phone_number = Some("Phone number is required for M-Pesa".to_owned());
    }

    match (amount, errors.is_empty()) {
        (Some(amount), true) => Ok(NewTransaction {
            member_name: input.member_name.trim().to_owned(),
            phone_number: input.phone_number.trim().to_owned(),
            amount,
            category: input.category,
            payment_type: input.payment_type,
        }),
        _ => Err(errors),
    }
}

fn field_error(message: &Option<String>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class=(FORM_ERROR_STYLE) { (message) }
        }
    }
}

/// Render the transaction form with the given draft values and field errors.
///
/// The form swaps itself on submission, so a rejected draft comes back with
/// the user's input intact and a successful one comes back cleared.
pub(crate) fn transaction_form(
    input: &TransactionFormInput,
    errors: &TransactionFormErrors,
) -> Markup {
    let is_cash = input.payment_type == PaymentType::Cash;

    html! {
        form
            id=(TRANSACTION_FORM_ID)
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-disabled-elt="find button[type='submit']"
            hx-indicator="#transaction-form-indicator"
            class="space-y-4"
        {
            div class="grid grid-cols-1 gap-6 md:grid-cols-2"
            {
                div
                {
                    label for="member_name" class=(FORM_LABEL_STYLE) { "Member Name *" }

                    input
                        type="text"
                        name="member_name"
                        id="member_name"
                        value=(input.member_name)
                        class=(FORM_TEXT_INPUT_STYLE);

                    (field_error(&errors.member_name))
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount (KSh) *" }

                    input
                        type="number"
                        name="amount"
                        id="amount"
                        min="0"
                        step="0.01"
                        value=(input.amount)
                        class=(FORM_TEXT_INPUT_STYLE);

                    (field_error(&errors.amount))
                }

                fieldset
                {
                    legend class=(FORM_LABEL_STYLE) { "Payment Type *" }

                    div class=(FORM_RADIO_GROUP_STYLE)
                    {
                        div class="flex items-center gap-2"
                        {
                            input
                                type="radio"
                                name="payment_type"
                                id="payment-type-cash"
                                value="CASH"
                                checked[is_cash]
                                class=(FORM_RADIO_INPUT_STYLE);

                            label for="payment-type-cash" class=(FORM_RADIO_LABEL_STYLE)
                            {
                                "Cash"
                            }
                        }

                        div class="flex items-center gap-2"
                        {
                            input
                                type="radio"
                                name="payment_type"
                                id="payment-type-mpesa"
                                value="MPESA"
                                checked[!is_cash]
                                class=(FORM_RADIO_INPUT_STYLE);

                            label for="payment-type-mpesa" class=(FORM_RADIO_LABEL_STYLE)
                            {
                                "M-Pesa"
                            }
                        }
                    }
                }

                div
                {
                    label for="phone_number" class=(FORM_LABEL_STYLE) { "Phone Number" }

                    input
                        type="tel"
                        name="phone_number"
                        id="phone_number"
                        value=(input.phone_number)
                        placeholder="e.g. 254712345678"
                        class=(FORM_TEXT_INPUT_STYLE);

                    (field_error(&errors.phone_number))
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category *" }

                    select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in [Category::Tithe, Category::Offering, Category::Building] {
                            option value=(category) selected[input.category == category]
                            {
                                (category.label())
                            }
                        }
                    }
                }
            }

            div class="flex justify-end mt-6"
            {
                button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" id="transaction-form-indicator"
                    {
                        (loading_spinner())
                    }
                    "Record Payment"
                }
            }
        }
    }
}
