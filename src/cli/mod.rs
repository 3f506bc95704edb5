use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{chart::MIN_HEIGHT, fetch::FetchOptions};

pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/mybox-lab/de_test3/main/sales_data.csv";

/// Report the best-selling product and the best sales day of a CSV sales file
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// URL or path of the sales file (rows of `product,quantity,price,date`)
    #[arg(env = "SALES_SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Give up on a remote download after this many seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Only print the summary, skip the charts
    #[arg(long)]
    pub no_charts: bool,

    /// Terminal rows used for the two charts
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(MIN_HEIGHT as i64..))]
    pub chart_height: u16,

    /// Log filter, e.g. `info` or `sales_report=debug`
    #[arg(long, env = "SALES_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Args {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Install the global `tracing` subscriber, writing to stderr.
///
/// Falls back to `warn` if `log_level` isn't a valid filter directive.
pub fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry().with(filter).with(layer).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_published_sales_file() {
        let args = Args::try_parse_from(["sales-report"]).unwrap();

        assert_eq!(args.source, DEFAULT_SOURCE);
        assert_eq!(args.timeout_secs, 30);
        assert!(!args.no_charts);
        assert_eq!(args.chart_height, 40);
        assert_eq!(args.fetch_options().timeout, Duration::from_secs(30));
    }

    #[test]
    fn parses_explicit_options() {
        let args = Args::try_parse_from([
            "sales-report",
            "data/sales.csv",
            "--timeout-secs",
            "5",
            "--no-charts",
            "--chart-height",
            "24",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.source, "data/sales.csv");
        assert_eq!(args.fetch_options().timeout, Duration::from_secs(5));
        assert!(args.no_charts);
        assert_eq!(args.chart_height, 24);
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn rejects_tiny_chart_height() {
        assert!(Args::try_parse_from(["sales-report", "--chart-height", "3"]).is_err());
    }
}
