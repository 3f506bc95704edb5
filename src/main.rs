use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::Parser;
use sales_report::{
    chart::{self, ChartSpec},
    cli::{self, Args},
    error, report,
};

fn main() -> ExitCode {
    let args = Args::parse();
    cli::setup_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(source = %args.source, error = %err, "sales report failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> error::Result<()> {
    let analysis = report::analyze(&args.source, &args.fetch_options())?;

    println!("{}", analysis.summary.top_product_line());
    println!("{}\n", analysis.summary.top_date_line());

    if args.no_charts {
        return Ok(());
    }
    if !io::stdout().is_terminal() {
        tracing::info!("stdout is not a terminal, skipping charts");
        return Ok(());
    }

    chart::draw(
        &[
            ChartSpec::product_totals(&analysis.by_product),
            ChartSpec::date_totals(&analysis.by_date),
        ],
        args.chart_height,
    )?;

    Ok(())
}
