use std::collections::BTreeMap;

use itertools::Itertools;
use rust_decimal::Decimal;

use super::{
    error::{Error, Result},
    record::SalesRecord,
};

/// Sales totals keyed along one dimension.
///
/// Entries iterate in ascending key order, so two groupings built from the
/// same records compare equal no matter how the records were ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    dimension: &'static str,
    totals: BTreeMap<String, Decimal>,
}

impl Grouping {
    /// Sum line totals per key with checked arithmetic.
    ///
    /// A line total or running sum that doesn't fit in a [`Decimal`] fails the
    /// whole grouping with [`Error::TotalOverflow`] for the first such key in
    /// ascending order.
    fn from_records<'a>(
        dimension: &'static str,
        records: impl IntoIterator<Item = &'a SalesRecord>,
        key: impl Fn(&'a SalesRecord) -> &'a str,
    ) -> Result<Self> {
        let sums: BTreeMap<&str, Option<Decimal>> = records
            .into_iter()
            .map(|record| (key(record), record.line_total()))
            .into_grouping_map()
            .fold(Some(Decimal::ZERO), |acc, _name, line_total| {
                acc.zip(line_total)
                    .and_then(|(acc, line_total)| acc.checked_add(line_total))
            })
            .into_iter()
            .collect();

        let totals: BTreeMap<String, Decimal> = sums
            .into_iter()
            .map(|(name, total)| {
                total
                    .map(|total| (name.to_owned(), total))
                    .ok_or_else(|| Error::TotalOverflow {
                        dimension,
                        key: name.to_owned(),
                    })
            })
            .collect::<Result<_>>()?;

        Ok(Self { dimension, totals })
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.totals.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.totals.iter().map(|(key, total)| (key.as_str(), *total))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.totals.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.totals.values().copied()
    }

    /// Sum of every entry, or `None` on overflow.
    pub fn total(&self) -> Option<Decimal> {
        self.values()
            .try_fold(Decimal::ZERO, |acc, total| acc.checked_add(total))
    }

    /// Entry with the highest total.
    ///
    /// Ties go to the first key in ascending order: a later entry only
    /// replaces the current best when it is strictly greater.
    pub fn top_entry(&self) -> Result<TopEntry> {
        self.iter()
            .fold(None::<(&str, Decimal)>, |best, (key, total)| match best {
                Some((_, best_total)) if total <= best_total => best,
                _ => Some((key, total)),
            })
            .map(|(key, total)| TopEntry {
                key: key.to_owned(),
                total,
            })
            .ok_or(Error::EmptyGrouping {
                dimension: self.dimension,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopEntry {
    pub key: String,
    pub total: Decimal,
}

pub fn totals_by_product<'a>(
    records: impl IntoIterator<Item = &'a SalesRecord>,
) -> Result<Grouping> {
    Grouping::from_records("product", records, |record| record.product_name.as_str())
}

pub fn totals_by_date<'a>(records: impl IntoIterator<Item = &'a SalesRecord>) -> Result<Grouping> {
    Grouping::from_records("date", records, |record| record.date.as_str())
}
