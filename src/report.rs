//! Terminal rendering of a risk report: a summary block, the metrics table,
//! and a coarse risk grade.

use api_client::Quote;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use metrics::MetricsRecord;

const SPARK_WIDTH: usize = 32;

pub fn print_report(
    ticker: &str,
    quote: &Quote,
    range: &str,
    benchmark: &str,
    record: &MetricsRecord,
) {
    let meta = &quote.meta;
    let name = meta.name.as_deref().unwrap_or(ticker);
    let currency = meta.currency.as_deref().unwrap_or("");
    let closes = quote.series.closes();

    let mut summary = Table::new();
    summary
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![format!("{ticker} ({name})"), String::new()]);
    summary.add_row(vec![
        "Last".to_string(),
        match meta.last_price.or_else(|| closes.last().copied()) {
            Some(price) => format!("{price:.2} {currency}").trim_end().to_string(),
            None => "—".to_string(),
        },
    ]);
    if let Some(exchange) = meta.exchange.as_deref() {
        summary.add_row(vec!["Exchange".to_string(), exchange.to_string()]);
    }
    summary.add_row(vec![
        "Window".to_string(),
        format!("{range} vs {benchmark}"),
    ]);
    summary.add_row(vec!["Points".to_string(), quote.series.len().to_string()]);
    summary.add_row(vec![
        "Spark".to_string(),
        sparkline(&closes, SPARK_WIDTH),
    ]);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);

    let traded = format!(
        "{} {currency}",
        human_number(record.avg_daily_dollar_vol)
    );
    let rows = [
        ("Annual Return", fmt_pct(record.annual_return)),
        ("Annual Vol", fmt_pct(record.annual_vol)),
        ("Sharpe", fmt_ratio(record.sharpe)),
        ("Sortino", fmt_ratio(record.sortino)),
        ("Max Drawdown", fmt_pct(Some(record.max_drawdown))),
        ("Calmar", fmt_ratio(record.calmar)),
        ("VaR(95%)", fmt_pct(record.var_95)),
        ("CVaR(95%)", fmt_pct(record.cvar_95)),
        ("Tail Ratio", fmt_ratio(record.tail_ratio)),
        ("Skew", fmt_ratio(record.skew)),
        ("Excess Kurtosis", fmt_ratio(record.excess_kurtosis)),
        ("Beta", fmt_ratio(record.beta)),
        ("Alpha (annual)", fmt_pct(record.alpha)),
        ("R^2", fmt_pct(record.r2)),
        ("Avg Daily Value Traded", traded.trim_end().to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }

    let (grade, color) = risk_grade(record);
    table.add_row(vec![
        Cell::new("Risk Grade"),
        Cell::new(grade).fg(color),
    ]);

    println!("{summary}");
    println!("{table}");
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => "—".to_string(),
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.3}"),
        _ => "—".to_string(),
    }
}

/// Compact magnitude formatting: 1234567 becomes "1.23M".
fn human_number(value: f64) -> String {
    let mut x = value;
    for unit in ["", "K", "M", "B", "T"] {
        if x.abs() < 1000.0 {
            return format!("{x:.2}{unit}");
        }
        x /= 1000.0;
    }
    format!("{x:.2}P")
}

/// A unicode sparkline over the last `width` values.
fn sparkline(values: &[f64], width: usize) -> String {
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    let start = values.len().saturating_sub(width);
    let window = &values[start..];
    if window.is_empty() {
        return String::new();
    }

    let min = window.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max - min == 0.0 {
        return BLOCKS[0].to_string().repeat(window.len());
    }

    window
        .iter()
        .map(|v| {
            let level = ((v - min) / (max - min) * (BLOCKS.len() - 1) as f64).round() as usize;
            BLOCKS[level.min(BLOCKS.len() - 1)]
        })
        .collect()
}

/// A coarse Low/Medium/High grade from volatility, drawdown magnitude, and
/// the one-day VaR.
fn risk_grade(record: &MetricsRecord) -> (&'static str, Color) {
    let mut score = 0;

    match record.annual_vol {
        Some(vol) if vol > 0.5 => score += 2,
        Some(vol) if vol > 0.25 => score += 1,
        _ => {}
    }

    if record.max_drawdown > 0.5 {
        score += 2;
    } else if record.max_drawdown > 0.25 {
        score += 1;
    }

    match record.var_95 {
        Some(var) if var < -0.05 => score += 2,
        Some(var) if var < -0.02 => score += 1,
        _ => {}
    }

    if score >= 4 {
        ("High", Color::Red)
    } else if score >= 2 {
        ("Medium", Color::Yellow)
    } else {
        ("Low", Color::Green)
    }
}
