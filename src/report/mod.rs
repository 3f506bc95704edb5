use tracing::debug;

use crate::{
    csv::load,
    domain::{
        grouping::{totals_by_date, totals_by_product, Grouping, TopEntry},
        record::SalesRecord,
    },
    error::Result,
    fetch::FetchOptions,
};

/// Both groupings of a sales file together with their top entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesAnalysis {
    pub by_product: Grouping,
    pub by_date: Grouping,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub top_product: TopEntry,
    pub top_date: TopEntry,
}

impl Summary {
    pub fn top_product_line(&self) -> String {
        format!(
            "Product \"{}\" has the highest revenue: {}",
            self.top_product.key, self.top_product.total
        )
    }

    pub fn top_date_line(&self) -> String {
        format!(
            "\"{}\" is the day with the highest sales total: {}",
            self.top_date.key, self.top_date.total
        )
    }
}

impl SalesAnalysis {
    pub fn from_records(records: &[SalesRecord]) -> Result<Self> {
        let by_product = totals_by_product(records)?;
        let by_date = totals_by_date(records)?;
        debug!(
            products = by_product.len(),
            dates = by_date.len(),
            "aggregated sales totals"
        );

        let summary = Summary {
            top_product: by_product.top_entry()?,
            top_date: by_date.top_entry()?,
        };

        Ok(Self {
            by_product,
            by_date,
            summary,
        })
    }
}

/// Load the file at `location` and report on it.
pub fn analyze(location: &str, options: &FetchOptions) -> Result<SalesAnalysis> {
    let records = load(location, options)?;
    SalesAnalysis::from_records(&records)
}
