//! AdLens CLI: load a raw ads export, normalize it, and print or export
//! campaign, ad-set, and daily performance summaries.

use adlens_analytics::{
    aggregate_by, daily_trend, metric_stats, overview, sort_by_cost_per_result, RecordFilter,
};
use adlens_core::types::{GroupSummary, KpiOverview, RawRecord, SummaryDimension};
use adlens_core::AppConfig;
use adlens_export::ExportFormat;
use adlens_ingest::{LoadedReport, ReportLoader};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "adlens")]
#[command(about = "Ad report analytics - normalize a raw ads export and derive performance summaries")]
#[command(version)]
struct Cli {
    /// Path to the raw ads report (default: configured report_path)
    #[arg(short, long, env = "ADLENS__REPORT")]
    report: Option<PathBuf>,

    /// Only include records from this campaign (repeatable)
    #[arg(long = "campaign", env = "ADLENS__CAMPAIGN")]
    campaigns: Vec<String>,

    /// Only include records from this ad set (repeatable)
    #[arg(long = "adset", env = "ADLENS__ADSET")]
    ad_sets: Vec<String>,

    /// Re-parse the report even when a cached parse exists
    #[arg(long, env = "ADLENS__NO_CACHE", default_value_t = false)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dataset KPIs and per-metric distribution stats
    Overview,

    /// Campaign summary table
    Campaigns {
        /// Order by cost per result ascending instead of by name
        #[arg(long, default_value_t = false)]
        by_cost: bool,
    },

    /// Ad-set summary table, cheapest cost per result first
    Adsets,

    /// Daily results and spend trend
    Daily,

    /// Resolved source schema: canonical columns, renames, extras
    Columns,

    /// Export a summary table as CSV or JSON
    Export {
        /// Table to export: campaigns, adsets, daily, overview
        #[arg(short, long)]
        table: String,

        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file; a bare -o derives <table>.<format> in the
        /// configured export directory (default: stdout)
        #[arg(short, long)]
        output: Option<Option<PathBuf>>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adlens=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    let report_path = cli
        .report
        .unwrap_or_else(|| PathBuf::from(&config.report_path));

    let loader = ReportLoader::new(config.cache.enabled && !cli.no_cache);
    let report = loader
        .load(&report_path)
        .with_context(|| format!("failed to load report '{}'", report_path.display()))?;

    info!(
        path = %report_path.display(),
        records = report.records.len(),
        "report loaded"
    );

    let filter = RecordFilter::new(cli.campaigns, cli.ad_sets);
    let records = filter.apply(&report.records);
    if !filter.is_empty() {
        info!(
            kept = records.len(),
            total = report.records.len(),
            "allow-list filter applied"
        );
    }

    match cli.command {
        Commands::Overview => cmd_overview(&records, &config),
        Commands::Campaigns { by_cost } => cmd_campaigns(&records, by_cost, &config),
        Commands::Adsets => cmd_adsets(&records, &config),
        Commands::Daily => cmd_daily(&records, &config),
        Commands::Columns => cmd_columns(&report),
        Commands::Export {
            table,
            format,
            output,
        } => cmd_export(&records, &table, &format, output, &config)?,
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Table commands
// ---------------------------------------------------------------------------

fn cmd_overview(records: &[RawRecord], config: &AppConfig) {
    let kpis = overview(records);
    let stats = metric_stats(records);

    println!("=== Ads Performance Overview ===");
    println!();
    println!("  Records:        {}", format_count(kpis.records as f64));
    println!("  Date range:     {}", format_date_range(&kpis));
    println!(
        "  Total spend:    {} {}",
        format_amount(kpis.total_spend),
        config.currency
    );
    println!("  Total results:  {}", format_count(kpis.total_results));
    let avg_ctr = match kpis.avg_ctr {
        Some(value) => format!("{value:.2}%"),
        None => "n/a".to_string(),
    };
    println!("  Avg CTR:        {avg_ctr}");

    println!();
    println!(
        "  {:<16} {:>7} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Metric", "Count", "Mean", "Std dev", "Min", "25%", "Median", "75%", "Max"
    );
    println!("  {}", "-".repeat(115));
    for stat in &stats {
        println!(
            "  {:<16} {:>7} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            stat.field,
            stat.count,
            format_metric(stat.mean, 2),
            format_metric(stat.std_dev, 2),
            format_metric(stat.min, 2),
            format_metric(stat.p25, 2),
            format_metric(stat.median, 2),
            format_metric(stat.p75, 2),
            format_metric(stat.max, 2),
        );
    }
}

fn cmd_campaigns(records: &[RawRecord], by_cost: bool, config: &AppConfig) {
    let mut rows = aggregate_by(records, SummaryDimension::Campaign);
    if by_cost {
        sort_by_cost_per_result(&mut rows);
    }
    print_summary_table("Campaign Performance", "Campaign", &rows, config);
}

fn cmd_adsets(records: &[RawRecord], config: &AppConfig) {
    let mut rows = aggregate_by(records, SummaryDimension::AdSet);
    sort_by_cost_per_result(&mut rows);
    print_summary_table("Ad Set Performance", "Ad set", &rows, config);
}

fn print_summary_table(title: &str, key_label: &str, rows: &[GroupSummary], config: &AppConfig) {
    println!("=== {title} ===");
    println!();
    println!(
        "  {:<32} {:>14} {:>9} {:>13} {:>11} {:>12} {:>8} {:>12} {:>8}",
        key_label,
        format!("Spend ({})", config.currency),
        "Results",
        "Impressions",
        "Reach",
        "Link clicks",
        "CTR %",
        "Cost/result",
        "Records"
    );
    println!("  {}", "-".repeat(127));

    for row in rows {
        println!(
            "  {:<32} {:>14} {:>9} {:>13} {:>11} {:>12} {:>8} {:>12} {:>8}",
            truncate(row.key.as_deref().unwrap_or("(none)"), 30),
            format_amount(row.amount_spent),
            format_count(row.results),
            format_count(row.impressions),
            format_count(row.reach),
            format_count(row.link_clicks),
            format_metric(row.ctr_percent, 2),
            format_metric(row.cost_per_result, 2),
            row.records,
        );
    }
    println!();
    println!("  Total: {} groups", rows.len());
}

fn cmd_daily(records: &[RawRecord], config: &AppConfig) {
    let trend = daily_trend(records);

    println!("=== Daily Trend ===");
    println!();
    println!(
        "  {:<12} {:>9} {:>14} {:>9}",
        "Day",
        "Results",
        format!("Spend ({})", config.currency),
        "Records"
    );
    println!("  {}", "-".repeat(47));
    for point in &trend {
        println!(
            "  {:<12} {:>9} {:>14} {:>9}",
            point.day.to_string(),
            format_count(point.results),
            format_amount(point.amount_spent),
            point.records,
        );
    }
    println!();
    println!("  Total: {} days", trend.len());
}

fn cmd_columns(report: &LoadedReport) {
    let schema = &report.schema;

    println!("=== Source Schema ===");
    println!();
    println!("  Columns ({}):", schema.columns.len());
    for column in &schema.columns {
        if schema.extra.contains(column) {
            println!("    {column:<28} (extra)");
        } else {
            println!("    {column}");
        }
    }

    if !schema.renamed.is_empty() {
        println!();
        println!("  Renamed:");
        for (source, target) in &schema.renamed {
            println!("    {source} -> {target}");
        }
    }

    println!();
    println!(
        "  Leading artifact row: {}",
        if schema.artifact_row_dropped {
            "dropped"
        } else {
            "none detected"
        }
    );
    println!("  Data rows: {}", report.records.len());
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

fn cmd_export(
    records: &[RawRecord],
    table: &str,
    format: &str,
    output: Option<Option<PathBuf>>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let format: ExportFormat = format.parse()?;
    let document = render_table(records, table, format)?;

    match output {
        Some(path) => {
            let target = resolve_output(path, table, format, config);
            adlens_export::write_file(&target, &document)?;
            println!("Export written to: {}", target.display());
        }
        None => print!("{document}"),
    }
    Ok(())
}

fn render_table(
    records: &[RawRecord],
    table: &str,
    format: ExportFormat,
) -> anyhow::Result<String> {
    let document = match table.to_lowercase().as_str() {
        "campaigns" => {
            let rows = aggregate_by(records, SummaryDimension::Campaign);
            match format {
                ExportFormat::Csv => adlens_export::summary_csv(&rows, SummaryDimension::Campaign)?,
                ExportFormat::Json => {
                    adlens_export::summary_json(&rows, SummaryDimension::Campaign)?
                }
            }
        }
        "adsets" => {
            let mut rows = aggregate_by(records, SummaryDimension::AdSet);
            sort_by_cost_per_result(&mut rows);
            match format {
                ExportFormat::Csv => adlens_export::summary_csv(&rows, SummaryDimension::AdSet)?,
                ExportFormat::Json => adlens_export::summary_json(&rows, SummaryDimension::AdSet)?,
            }
        }
        "daily" => {
            let trend = daily_trend(records);
            match format {
                ExportFormat::Csv => adlens_export::trend_csv(&trend)?,
                ExportFormat::Json => adlens_export::trend_json(&trend)?,
            }
        }
        "overview" => {
            let kpis = overview(records);
            match format {
                ExportFormat::Csv => adlens_export::overview_csv(&kpis)?,
                ExportFormat::Json => adlens_export::overview_json(&kpis)?,
            }
        }
        other => bail!("unknown table '{other}', expected campaigns, adsets, daily, or overview"),
    };
    Ok(document)
}

fn resolve_output(
    path: Option<PathBuf>,
    table: &str,
    format: ExportFormat,
    config: &AppConfig,
) -> PathBuf {
    let path = path.unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", table.to_lowercase(), format.extension()))
    });
    if path.is_absolute() {
        path
    } else {
        Path::new(&config.export.output_dir).join(path)
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn format_amount(value: f64) -> String {
    let formatted = format!("{value:.2}");
    match formatted.split_once('.') {
        Some((integral, fraction)) => format!("{}.{fraction}", group_thousands(integral)),
        None => group_thousands(&formatted),
    }
}

fn format_count(value: f64) -> String {
    group_thousands(&format!("{value:.0}"))
}

fn format_metric(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) => format!("{value:.decimals$}"),
        None => "n/a".to_string(),
    }
}

fn format_date_range(kpis: &KpiOverview) -> String {
    match (kpis.first_day, kpis.last_day) {
        (Some(first), Some(last)) => format!("{first} .. {last}"),
        _ => "n/a".to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, body) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(body.len() + body.len() / 3);
    let len = body.len();
    for (i, ch) in body.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

fn truncate(s: &str, max: usize) -> String {
    if max < 3 {
        return s.chars().take(max).collect();
    }
    let char_count = s.chars().count();
    if char_count > max {
        let truncated: String = s.chars().take(max - 2).collect();
        format!("{truncated}..")
    } else {
        s.to_string()
    }
}
