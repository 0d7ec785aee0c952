//! Export of a metrics record to JSON or CSV, keyed exactly as the flat
//! record mapping plus the run context (ticker, range, benchmark).

use anyhow::{Context, bail};
use metrics::MetricsRecord;
use std::path::Path;

pub fn export_record(
    path: &Path,
    ticker: &str,
    range: &str,
    benchmark: &str,
    record: &MetricsRecord,
) -> anyhow::Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => write_json(path, ticker, range, benchmark, record),
        Some("csv") => write_csv(path, ticker, range, benchmark, record),
        _ => bail!(
            "unknown export format for '{}': use .json or .csv",
            path.display()
        ),
    }
}

fn write_json(
    path: &Path,
    ticker: &str,
    range: &str,
    benchmark: &str,
    record: &MetricsRecord,
) -> anyhow::Result<()> {
    let serde_json::Value::Object(mut map) = serde_json::to_value(record)? else {
        bail!("metrics record did not serialize to an object");
    };
    map.insert("ticker".to_string(), ticker.into());
    map.insert("range".to_string(), range.into());
    map.insert("benchmark".to_string(), benchmark.into());

    let body = serde_json::to_string_pretty(&serde_json::Value::Object(map))?;
    std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn write_csv(
    path: &Path,
    ticker: &str,
    range: &str,
    benchmark: &str,
    record: &MetricsRecord,
) -> anyhow::Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("writing {}", path.display()))?;

    for (key, value) in record.key_values() {
        let cell = value.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([key, cell.as_str()])?;
    }
    writer.write_record(["ticker", ticker])?;
    writer.write_record(["range", range])?;
    writer.write_record(["benchmark", benchmark])?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record() -> MetricsRecord {
        MetricsRecord {
            annual_return: Some(0.12),
            annual_vol: Some(0.18),
            sharpe: Some(0.55),
            sortino: None,
            max_drawdown: 0.10,
            calmar: Some(1.2),
            var_95: None,
            cvar_95: None,
            tail_ratio: Some(1.05),
            skew: Some(-0.3),
            excess_kurtosis: Some(2.1),
            beta: None,
            alpha: None,
            r2: None,
            avg_daily_dollar_vol: 2_300_000.0,
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("riskscope-{}-{name}", std::process::id()))
    }

    #[test]
    fn json_export_carries_every_key_and_nulls() {
        let path = scratch_path("export.json");
        export_record(&path, "AAPL", "1y", "^GSPC", &record()).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["ticker"], "AAPL");
        assert_eq!(value["range"], "1y");
        assert_eq!(value["benchmark"], "^GSPC");
        assert_eq!(value["annual_return"].as_f64().unwrap(), 0.12);
        assert!(value["sortino"].is_null());
        assert!(value["var_95"].is_null());

        for (key, _) in record().key_values() {
            assert!(value.get(key).is_some(), "missing key {key}");
        }

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn csv_export_writes_one_row_per_key() {
        let path = scratch_path("export.csv");
        export_record(&path, "AAPL", "1y", "^GSPC", &record()).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        // 15 metric rows plus ticker/range/benchmark.
        assert_eq!(lines.len(), 18);
        assert!(lines.contains(&"sortino,"));
        assert!(lines.contains(&"max_drawdown,0.1"));
        assert!(lines.contains(&"ticker,AAPL"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let path = scratch_path("export.xlsx");
        assert!(export_record(&path, "AAPL", "1y", "^GSPC", &record()).is_err());
        assert!(!path.exists());
    }
}
