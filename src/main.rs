use anyhow::Context;
use api_client::{CachedMarketData, MarketData, Quote, YahooClient};
use clap::Parser;
use indicatif::ProgressBar;
use metrics::{MetricsEngine, MetricsRecord};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod export;
mod report;

/// Print a compact risk report for a ticker.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ticker symbol to analyze (e.g. AAPL).
    ticker: String,

    /// History window to download (e.g. 1mo,3mo,6mo,1y,2y,5y,10y,ytd,max).
    #[arg(long)]
    range: Option<String>,

    /// Bar interval (e.g. 1d).
    #[arg(long)]
    interval: Option<String>,

    /// Benchmark ticker for beta/alpha/R^2; pass "none" to skip the regression.
    #[arg(long)]
    benchmark: Option<String>,

    /// Annual risk-free rate. Accepts a decimal or a percentage:
    /// 0.03, 3% and 3 all mean three percent.
    #[arg(long)]
    rf: Option<String>,

    /// Optional path to export the metrics as .json or .csv.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Also analyze a second history window and print both reports.
    #[arg(long)]
    compare: bool,

    /// Second history window used when --compare is set.
    #[arg(long, default_value = "3y")]
    compare_range: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("riskscope=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = configuration::load_config().context("loading configuration")?;

    let range = cli.range.unwrap_or_else(|| config.defaults.range.clone());
    let interval = cli.interval.unwrap_or_else(|| config.defaults.interval.clone());
    let benchmark = cli
        .benchmark
        .unwrap_or_else(|| config.defaults.benchmark.clone());
    let benchmark = match benchmark.trim() {
        "" => None,
        s if s.eq_ignore_ascii_case("none") => None,
        s => Some(s.to_owned()),
    };
    let rf = match &cli.rf {
        Some(raw) => parse_risk_free(raw)?,
        None => config.defaults.risk_free_rate,
    };

    let client = YahooClient::new(&config.fetch)?;
    let market = CachedMarketData::new(client, Duration::from_secs(config.fetch.cache_ttl_secs));
    let engine = MetricsEngine::new();

    let benchmark_label = benchmark.as_deref().unwrap_or("-");

    let (asset, record) = match analyze(
        &market,
        &engine,
        &cli.ticker,
        benchmark.as_deref(),
        &range,
        &interval,
        rf,
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(code) => return Ok(code),
    };

    report::print_report(&cli.ticker, &asset, &range, benchmark_label, &record);

    if cli.compare {
        match analyze(
            &market,
            &engine,
            &cli.ticker,
            benchmark.as_deref(),
            &cli.compare_range,
            &interval,
            rf,
        )
        .await
        {
            Ok((compare_asset, compare_record)) => {
                report::print_report(
                    &cli.ticker,
                    &compare_asset,
                    &cli.compare_range,
                    benchmark_label,
                    &compare_record,
                );
            }
            Err(code) => return Ok(code),
        }
    }

    if let Some(path) = &cli.export {
        export::export_record(path, &cli.ticker, &range, benchmark_label, &record)?;
        println!("Exported metrics to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

/// Fetches one window of history and computes its metrics record.
///
/// Failures are reported to the user here; the returned error is the
/// process exit code (2 for fetch, 3 for compute). A benchmark failure is
/// not fatal: the report simply loses its regression fields.
async fn analyze<M: MarketData>(
    market: &M,
    engine: &MetricsEngine,
    ticker: &str,
    benchmark: Option<&str>,
    range: &str,
    interval: &str,
    rf: f64,
) -> Result<(Quote, MetricsRecord), ExitCode> {
    let spinner = ProgressBar::new_spinner().with_message(format!("Fetching {ticker} ({range})..."));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let (asset_result, bench) = futures::join!(
        market.fetch_history(ticker, range, interval),
        fetch_benchmark(market, benchmark, range, interval)
    );
    spinner.finish_and_clear();

    let asset = match asset_result {
        Ok(quote) => quote,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(ExitCode::from(2));
        }
    };

    match engine.compute(&asset.series, bench.as_ref().map(|q| &q.series), rf) {
        Ok(record) => Ok((asset, record)),
        Err(e) => {
            eprintln!("error: {e}");
            Err(ExitCode::from(3))
        }
    }
}

async fn fetch_benchmark<M: MarketData>(
    market: &M,
    symbol: Option<&str>,
    range: &str,
    interval: &str,
) -> Option<Quote> {
    let symbol = symbol?;
    match market.fetch_history(symbol, range, interval).await {
        Ok(quote) => Some(quote),
        Err(e) => {
            tracing::warn!(%symbol, error = %e, "benchmark fetch failed; continuing without regression");
            None
        }
    }
}

/// Normalizes a user-supplied risk-free rate to a decimal fraction.
///
/// "0.03" stays 0.03; "3%" becomes 0.03; a bare value above 1.0 is assumed
/// to be a percentage, so "3" also becomes 0.03.
fn parse_risk_free(raw: &str) -> anyhow::Result<f64> {
    let s = raw.trim();
    let value = if let Some(stripped) = s.strip_suffix('%') {
        stripped
            .trim()
            .parse::<f64>()
            .with_context(|| format!("invalid risk-free rate '{raw}'"))?
            / 100.0
    } else {
        let v = s
            .parse::<f64>()
            .with_context(|| format!("invalid risk-free rate '{raw}'"))?;
        if v > 1.0 { v / 100.0 } else { v }
    };

    if value <= -1.0 {
        anyhow::bail!("risk-free rate '{raw}' is below -100%");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_free_accepts_decimals_percents_and_bare_numbers() {
        assert_eq!(parse_risk_free("0.03").unwrap(), 0.03);
        assert_eq!(parse_risk_free("3%").unwrap(), 0.03);
        assert_eq!(parse_risk_free("3").unwrap(), 0.03);
        assert_eq!(parse_risk_free(" 4.5% ").unwrap(), 0.045);
        assert_eq!(parse_risk_free("0").unwrap(), 0.0);
        assert_eq!(parse_risk_free("1.0").unwrap(), 1.0);
    }

    #[test]
    fn risk_free_rejects_garbage() {
        assert!(parse_risk_free("three").is_err());
        assert!(parse_risk_free("%").is_err());
        assert!(parse_risk_free("-200").is_err());
    }

    #[test]
    fn cli_parses_a_full_invocation() {
        let cli = Cli::parse_from([
            "riskscope",
            "AAPL",
            "--range",
            "2y",
            "--benchmark",
            "^IXIC",
            "--rf",
            "3%",
            "--compare",
            "--compare-range",
            "5y",
        ]);
        assert_eq!(cli.ticker, "AAPL");
        assert_eq!(cli.range.as_deref(), Some("2y"));
        assert_eq!(cli.benchmark.as_deref(), Some("^IXIC"));
        assert!(cli.compare);
        assert_eq!(cli.compare_range, "5y");
    }
}
