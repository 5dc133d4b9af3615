use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use trade_compass::config::Config;
use trade_compass::report::DashboardReport;
use trade_compass::source::{JsonFileSource, TradeQuery, TradeSource};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    cfg.validate().context("risk settings rejected")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // Parse CLI args or use defaults
    let args: Vec<String> = std::env::args().collect();
    let journal_file = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| cfg.journal_file.clone());
    let account_id = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| cfg.account_id.clone());

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║             TRADE COMPASS — JOURNAL REPORT               ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  Journal:    {:<44}║", journal_file);
    println!("║  Account:    {:<44}║", account_id);
    println!("║  Timezone:   {:<44}║", cfg.timezone.to_string());
    println!("╚══════════════════════════════════════════════════════════╝");

    let source = JsonFileSource::new(&journal_file, cfg.timezone);
    let query = TradeQuery {
        account_id,
        ..TradeQuery::default()
    };
    let trades = source
        .fetch_trades(&query)
        .await
        .with_context(|| format!("loading journal from {}", journal_file))?;
    info!("Loaded {} trades", trades.len());

    let report = DashboardReport::build(&trades, &cfg, Utc::now());
    report.print_summary();

    let report_file = format!("compass_{}.json", report.generated_at.format("%Y%m%d"));
    save_report_to_file(&report, &report_file)?;
    println!("\nReport saved to: {}", report_file);

    Ok(())
}

fn save_report_to_file(report: &DashboardReport, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("writing report to {}", path))?;
    Ok(())
}
