use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cashflow_sim::accounts::ChartOfAccounts;
use cashflow_sim::calendar::parse_mdy;
use cashflow_sim::config::Settings;
use cashflow_sim::decimal::Money;
use cashflow_sim::report;
use cashflow_sim::simulation::DailySim;

#[derive(Parser)]
#[command(name = "cashflow-sim", about = "Daily cash-flow simulator")]
struct Cli {
    /// settings file (YAML or JSON)
    config_path: PathBuf,

    /// write the result table to ./results/results.csv
    #[arg(long)]
    save_results: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = Settings::load(&cli.config_path)
        .with_context(|| format!("loading settings from {}", cli.config_path.display()))?;

    let mut sim = build_sim(&settings)?;
    let outcome = sim.simulate();

    // a halted run still saves whatever was recorded before the failure
    if cli.save_results {
        fs::create_dir_all("results")?;
        report::write_results_csv(sim.results(), "results/results.csv")?;
        info!(rows = sim.results().rows.len(), "saved results/results.csv");
    }

    if let Err(err) = outcome {
        error!(%err, "simulation halted");
        return Err(err.into());
    }

    report::print_summary(&sim);
    Ok(())
}

fn build_sim(settings: &Settings) -> anyhow::Result<DailySim> {
    let chart = ChartOfAccounts::from_csv_path(&settings.accounts)
        .with_context(|| format!("loading chart of accounts from {}", settings.accounts))?;

    let start = parse_mdy(&settings.start_date)?;
    let end = parse_mdy(&settings.end_date)?;
    let ceiling =
        Money::from_f64(settings.max_checking_balance).context("invalid max_checking_balance")?;

    let mut sim = DailySim::new(chart, start, end, settings.fast_payoff_enabled, ceiling);

    for payment in settings.payments.values() {
        let amount =
            Money::from_f64(payment.amount).context("invalid scheduled payment amount")?;
        sim.schedule_payment(&payment.from, &payment.to, amount, parse_mdy(&payment.date)?);
    }
    for purchase in settings.purchases.values() {
        let amount =
            Money::from_f64(purchase.amount).context("invalid scheduled expense amount")?;
        sim.schedule_expense(amount, parse_mdy(&purchase.date)?);
    }

    Ok(sim)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cashflow_sim=info,cashflow-sim=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
