//! Play Report CLI
//!
//! 리포트 JSON 픽스처 → 카탈로그 규칙 실행 → 표시 문자열 확인 도구

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use pr_core::{catalog, AppMeta, FormattedValue};
#[cfg(feature = "cli")]
use pr_cli::{load_report, resolve_report_path, summarize_report};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "pr_cli")]
#[command(about = "Run play report fixtures against the rule catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Format a report fixture through the catalog rules
    Format {
        /// Application id (lowercase hex title id)
        #[arg(long)]
        app_id: String,

        /// Report JSON file (falls back to PR_REPORT_PATH)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Application title shown in logs (defaults to the id)
        #[arg(long)]
        title: Option<String>,

        /// Application version string
        #[arg(long)]
        version: Option<String>,
    },

    /// List catalog rules for one application
    Rules {
        /// Application id (lowercase hex title id)
        #[arg(long)]
        app_id: String,
    },

    /// List every application id the catalog covers
    Apps,

    /// Summarize a report fixture without running rules
    Inspect {
        /// Report JSON file (falls back to PR_REPORT_PATH)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write the summary as JSON to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Format {
            app_id,
            report,
            title,
            version,
        } => {
            let report_path = resolve_report_path(report)?;
            println!("🔨 Formatting report...");
            println!("   App:    {}", app_id);
            println!("   Report: {}", report_path.display());

            let report = load_report(&report_path)?;
            let title = title.unwrap_or_else(|| app_id.clone());
            let mut app = AppMeta::new(app_id, title);
            if let Some(version) = version {
                app = app.with_version(version);
            }

            print_outcome(&catalog::analyzer().format(&app, &report));
        }

        Commands::Rules { app_id } => {
            println!("🔍 Catalog rules for {}", app_id);
            print_rules(&app_id)?;
        }

        Commands::Apps => {
            println!("🔍 Applications covered by the catalog:");
            for app_id in catalog::analyzer().app_ids() {
                println!("   {}", app_id);
            }
        }

        Commands::Inspect {
            report,
            summary,
        } => {
            let report_path = resolve_report_path(report)?;
            println!("🔍 Inspecting report: {}", report_path.display());

            let report = load_report(&report_path)?;
            let report_summary = summarize_report(&report_path.display().to_string(), &report);

            println!("   Entries: {}", report_summary.entry_count);
            for entry in &report_summary.entries {
                println!("   {:<24} {:<6} {}", entry.key, entry.kind, entry.preview);
            }

            if let Some(summary_path) = summary {
                save_summary(&summary_path, &report_summary)?;
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_outcome(outcome: &FormattedValue) {
    match outcome {
        FormattedValue::Text(text) => println!("\n✅ Presence: {}", text),
        FormattedValue::ForceReset => println!("\n✅ Presence reset requested"),
        FormattedValue::Unhandled => println!("\n❌ No rule handled this report"),
    }
}

#[cfg(feature = "cli")]
fn print_rules(app_id: &str) -> Result<()> {
    let Some(set) = catalog::analyzer().rule_set_for(app_id) else {
        anyhow::bail!("❌ No catalog rules registered for {}", app_id);
    };

    let mut rules: Vec<_> = set.rules().iter().collect();
    rules.sort_by_key(|rule| std::cmp::Reverse(rule.priority));

    for rule in rules {
        println!(
            "   [{:>4}] {:<12} {}",
            rule.priority,
            rule.kind().label(),
            rule.keys().join(", ")
        );
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn save_summary(path: &PathBuf, summary: &pr_cli::ReportSummary) -> Result<()> {
    let summary_json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, summary_json)?;
    println!("\n📄 Summary saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("pr_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
