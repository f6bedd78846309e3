//! Recording and reviewing contribution transactions.

mod complete_endpoint;
mod create_endpoint;
mod filters;
mod form;
mod models;
mod table;
mod transactions_page;

pub(crate) use complete_endpoint::complete_transaction_endpoint;
pub(crate) use create_endpoint::create_transaction_endpoint;
pub(crate) use transactions_page::get_transactions_page;

pub use filters::TransactionFilters;
pub use models::{
    Category, NewTransaction, PaymentType, Transaction, TransactionId, TransactionStatus,
};
