//! The transaction record and its tagged fields, as the finance API reports
//! them.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The ID of a transaction on the finance API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    /// Create a transaction ID from an integer.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The integer value of the transaction ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a contribution was given towards.
///
/// The default matches the form's initial selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// A tithe.
    #[default]
    Tithe,
    /// A general offering.
    Offering,
    /// A contribution to the church building fund.
    Building,
}

impl Category {
    /// The wire value of the category, as the finance API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tithe => "TITHE",
            Category::Offering => "OFFERING",
            Category::Building => "BUILDING",
        }
    }

    /// The human-readable name of the category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Tithe => "Tithe",
            Category::Offering => "Offering",
            Category::Building => "Church Building",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a contribution was paid.
///
/// M-Pesa is only a tagged field on the record; the console performs no
/// gateway integration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// Cash handed in during the service.
    #[default]
    Cash,
    /// An M-Pesa mobile money payment.
    Mpesa,
}

impl PaymentType {
    /// The wire value of the payment type, as the finance API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "CASH",
            PaymentType::Mpesa => "MPESA",
        }
    }

    /// The human-readable name of the payment type.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::Mpesa => "M-Pesa",
        }
    }
}

impl Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a transaction is in its lifecycle.
///
/// The only transition is pending to completed, made by the treasurer
/// through the dedicated completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Recorded but not yet confirmed by the treasurer.
    Pending,
    /// Confirmed by the treasurer.
    Completed,
}

impl TransactionStatus {
    /// The wire value of the status, as the finance API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contribution record as the finance API reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The name of the member the contribution was received from.
    pub member_name: String,
    /// The member's phone number. Present on M-Pesa payments.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// The value of the contribution in Kenyan shillings.
    pub amount: f64,
    /// What the contribution was given towards.
    pub category: Category,
    /// How the contribution was paid.
    pub payment_type: PaymentType,
    /// Where the transaction is in its lifecycle.
    pub status: TransactionStatus,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The payload for recording a new transaction with the finance API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    /// The name of the member the contribution was received from.
    pub member_name: String,
    /// The member's phone number. Required when paying by M-Pesa.
    pub phone_number: String,
    /// The value of the contribution in Kenyan shillings.
    pub amount: f64,
    /// What the contribution was given towards.
    pub category: Category,
    /// How the contribution was paid.
    pub payment_type: PaymentType,
}
