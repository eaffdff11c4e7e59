use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use market_data::{
    io::{CsvBarSink, DataSink},
    models::{
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::TimeFrame,
    },
    preprocess::preprocess,
    providers::{
        DataProvider, alpha_vantage::AlphaVantageProvider, retry::{RetryPolicy, with_retry},
        yahoo_chart::YahooChartProvider,
    },
};
use strategy_eval::{
    config::{BacktestConfig, CrossoverParams, MetricsParams, load_config_path},
    metrics::{max_drawdown, sharpe_ratio},
    runner::{CrossoverBacktester, StrategyRunner},
};
use tracing::info;

#[derive(Parser)]
#[command(version, about = "SMA crossover backtest over downloaded daily bars")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProviderKind {
    Yahoo,
    Alphavantage,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch bars, run the crossover strategy, and report metrics
    Run {
        /// Ticker symbol (e.g. "AAPL")
        #[arg(long)]
        symbol: String,

        /// Start date, ISO 8601 (e.g. "2020-01-01"), inclusive
        #[arg(long)]
        start: String,

        /// End date, ISO 8601 (e.g. "2021-01-01"), exclusive
        #[arg(long)]
        end: String,

        /// Data provider to fetch from
        #[arg(long, value_enum, default_value_t = ProviderKind::Yahoo)]
        provider: ProviderKind,

        /// Short SMA window, in periods (overrides config file)
        #[arg(long)]
        short: Option<usize>,

        /// Long SMA window, in periods (overrides config file)
        #[arg(long)]
        long: Option<usize>,

        /// Per-period risk-free rate (overrides config file)
        #[arg(long)]
        risk_free_rate: Option<f64>,

        /// Write the preprocessed series to this CSV path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to a TOML config file with [signal] and [metrics] sections
        #[arg(long)]
        config: Option<PathBuf>,

        /// Maximum number of retries for transient fetch failures
        #[arg(long, default_value = "3")]
        max_retries: u32,

        #[arg(long, default_value = "1000")]
        base_delay_ms: u64,
    },
}

fn parse_day(s: &str) -> Result<chrono::DateTime<Utc>> {
    let day = s
        .parse::<NaiveDate>()
        .with_context(|| format!("invalid ISO 8601 date {s:?}"))?;
    Ok(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).expect("midnight is valid")))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let Commands::Run {
        symbol,
        start,
        end,
        provider,
        short,
        long,
        risk_free_rate,
        output,
        config,
        max_retries,
        base_delay_ms,
    } = cli.command;

    let mut cfg = match &config {
        Some(path) => load_config_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BacktestConfig::default(),
    };
    if let Some(short) = short {
        cfg.signal.short_window = short;
    }
    if let Some(long) = long {
        cfg.signal.long_window = long;
    }
    if let Some(rate) = risk_free_rate {
        cfg.metrics.risk_free_rate = rate;
    }

    let start = parse_day(&start)?;
    let end = parse_day(&end)?;
    let params = BarsRequestParams {
        symbols: vec![symbol.clone()],
        timeframe: TimeFrame::day(),
        start,
        end,
        provider_specific: ProviderParams::None,
    };

    let provider: Box<dyn DataProvider> = match provider {
        ProviderKind::Yahoo => Box::new(YahooChartProvider::new()?),
        ProviderKind::Alphavantage => Box::new(AlphaVantageProvider::new()?),
    };

    let policy = RetryPolicy::new(max_retries, base_delay_ms);
    let tables = with_retry(policy, || provider.fetch_bars(params.clone()))
        .await
        .with_context(|| format!("fetching bars for {symbol} {start}..{end}"))?;
    let table = tables
        .into_iter()
        .next()
        .with_context(|| format!("provider returned no data for {symbol}"))?;

    let series = preprocess(table)
        .with_context(|| format!("normalizing fetched bars for {symbol}"))?
        .trim_leading_gaps();
    info!(symbol, bars = series.len(), "normalized series ready");

    if let Some(path) = &output {
        let sink = CsvBarSink::to_file(path.clone());
        sink.write(std::slice::from_ref(&series))
            .await
            .with_context(|| format!("writing CSV to {}", path.display()))?;
        println!("Data saved to {}", path.display());
    }

    let returns = run_strategy(&cfg.signal, &series)
        .with_context(|| format!("running crossover strategy on {symbol}"))?;
    let (sharpe, drawdown) = evaluate(&returns, &cfg.metrics)
        .with_context(|| format!("evaluating strategy returns for {symbol}"))?;

    println!(
        "{symbol} {} -> {}  (short={}, long={})",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
        cfg.signal.short_window,
        cfg.signal.long_window
    );
    println!("Sharpe ratio:     {sharpe:.4}");
    println!("Maximum drawdown: {:.2}%", drawdown * 100.0);

    Ok(())
}

fn run_strategy(
    params: &CrossoverParams,
    series: &market_data::models::bar_series::BarSeries,
) -> Result<Vec<f64>> {
    Ok(CrossoverBacktester.run(params, series)?)
}

fn evaluate(returns: &[f64], params: &MetricsParams) -> Result<(f64, f64)> {
    let sharpe = sharpe_ratio(returns, params)?;
    let drawdown = max_drawdown(returns)?;
    Ok((sharpe, drawdown))
}
