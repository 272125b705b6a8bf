//! Price-index series model.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Inflation adjustment errors.
#[derive(Error, Debug)]
pub enum InflationError {
    /// A wealth point predates the earliest index value; the index cannot
    /// be extrapolated backward.
    #[error("No index value on or before {requested} (index starts {earliest})")]
    IndexCoverage {
        requested: NaiveDate,
        earliest: NaiveDate,
    },

    #[error("Index series is empty")]
    EmptyIndex,

    #[error("Index value {value} on {date} is not positive")]
    NonPositiveValue { date: NaiveDate, value: Decimal },
}

/// Read-only price-index series (date, index value), typically lower
/// frequency than the wealth series. Used for lookup only; never mutated
/// by this system.
#[derive(Debug, Clone, PartialEq)]
pub struct InflationIndexSeries {
    values: BTreeMap<NaiveDate, Decimal>,
}

impl InflationIndexSeries {
    /// Builds an index series, rejecting empty input and non-positive
    /// values (a price index is a ratio scale; zero would divide).
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (NaiveDate, Decimal)>,
    ) -> Result<Self, InflationError> {
        let mut values = BTreeMap::new();
        for (date, value) in pairs {
            if value <= Decimal::ZERO {
                return Err(InflationError::NonPositiveValue { date, value });
            }
            values.insert(date, value);
        }
        if values.is_empty() {
            return Err(InflationError::EmptyIndex);
        }
        Ok(Self { values })
    }

    /// Nearest-available-prior lookup: the index value on or before `date`.
    ///
    /// Prior-only on purpose: deflating a valuation must not consult index
    /// prints from its future.
    pub fn value_at(&self, date: NaiveDate) -> Result<Decimal, InflationError> {
        self.values
            .range(..=date)
            .next_back()
            .map(|(_, value)| *value)
            .ok_or_else(|| InflationError::IndexCoverage {
                requested: date,
                earliest: self.earliest_date(),
            })
    }

    pub fn earliest_date(&self) -> NaiveDate {
        *self.values.keys().next().expect("non-empty by construction")
    }

    pub fn latest_date(&self) -> NaiveDate {
        *self
            .values
            .keys()
            .next_back()
            .expect("non-empty by construction")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
