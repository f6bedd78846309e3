//! The filter set for the transactions page.
//!
//! Every fetch of the transaction list is keyed by the full filter set: the
//! filter controls submit the whole form on any change, and the handler
//! forwards every present filter to the finance API in one query.

use serde::{Deserialize, Deserializer, de::IntoDeserializer};
use time::Date;

use super::models::{Category, PaymentType, TransactionStatus};

/// The filters that scope the transaction list.
///
/// The field names match the query parameters the finance API expects, so
/// the same encoding serves both the console's own fragment requests and the
/// upstream list call. Absent and empty parameters mean "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct TransactionFilters {
    /// Only transactions for this category.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<Category>,

    /// Only transactions paid this way.
    #[serde(
        rename = "paymentType",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub payment_type: Option<PaymentType>,

    /// Only transactions in this lifecycle state.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<TransactionStatus>,

    /// Only transactions recorded on or after this date.
    #[serde(
        rename = "dateFrom",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub date_from: Option<Date>,

    /// Only transactions recorded on or before this date.
    #[serde(rename = "dateTo", default, deserialize_with = "empty_string_as_none")]
    pub date_to: Option<Date>,
}

impl TransactionFilters {
    /// Encode the present filters as query pairs for the finance API's list
    /// endpoint.
    pub(crate) fn to_query(self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }

        if let Some(payment_type) = self.payment_type {
            pairs.push(("paymentType", payment_type.to_string()));
        }

        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }

        if let Some(date_from) = self.date_from {
            pairs.push(("dateFrom", date_from.to_string()));
        }

        if let Some(date_to) = self.date_to {
            pairs.push(("dateTo", date_to.to_string()));
        }

        pairs
    }
}

/// Deserialize an optional field, treating the empty string a select submits
/// for "All" the same as an absent parameter.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<String>::deserialize(deserializer)?;

    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(text) => T::deserialize(text.into_deserializer())
            .map(Some)
            .map_err(|error: serde::de::value::Error| serde::de::Error::custom(error)),
    }
}

#[cfg(test)]
mod filters_tests {
    use time::macros::date;

    use crate::transaction::models::{Category, PaymentType, TransactionStatus};

    use super::TransactionFilters;

    #[test]
    fn deserialize_full_filter_set() {
        let query =
            "category=TITHE&paymentType=MPESA&status=PENDING&dateFrom=2026-01-01&dateTo=2026-01-31";

        let filters: TransactionFilters = serde_urlencoded::from_str(query).unwrap();

        assert_eq!(filters.category, Some(Category::Tithe));
        assert_eq!(filters.payment_type, Some(PaymentType::Mpesa));
        assert_eq!(filters.status, Some(TransactionStatus::Pending));
        assert_eq!(filters.date_from, Some(date!(2026 - 01 - 01)));
        assert_eq!(filters.date_to, Some(date!(2026 - 01 - 31)));
    }

    #[test]
    fn empty_values_mean_all() {
        let query = "category=&paymentType=&status=&dateFrom=&dateTo=";

        let filters: TransactionFilters = serde_urlencoded::from_str(query).unwrap();

        assert_eq!(filters, TransactionFilters::default());
    }

    #[test]
    fn missing_parameters_mean_all() {
        let filters: TransactionFilters = serde_urlencoded::from_str("").unwrap();

        assert_eq!(filters, TransactionFilters::default());
    }

    #[test]
    fn to_query_encodes_every_present_filter() {
        let filters = TransactionFilters {
            category: Some(Category::Building),
            payment_type: Some(PaymentType::Cash),
            status: Some(TransactionStatus::Completed),
            date_from: Some(date!(2026 - 02 - 01)),
            date_to: Some(date!(2026 - 02 - 28)),
        };

        let pairs = filters.to_query();

        assert_eq!(
            pairs,
            vec![
                ("category", "BUILDING".to_owned()),
                ("paymentType", "CASH".to_owned()),
                ("status", "COMPLETED".to_owned()),
                ("dateFrom", "2026-02-01".to_owned()),
                ("dateTo", "2026-02-28".to_owned()),
            ]
        );
    }

    #[test]
    fn to_query_omits_absent_filters() {
        let filters = TransactionFilters {
            status: Some(TransactionStatus::Pending),
            ..Default::default()
        };

        let pairs = filters.to_query();

        assert_eq!(pairs, vec![("status", "PENDING".to_owned())]);
    }

    #[test]
    fn invalid_category_is_rejected() {
        let result = serde_urlencoded::from_str::<TransactionFilters>("category=LUNCH");

        assert!(result.is_err(), "unknown category should fail to parse");
    }
}
