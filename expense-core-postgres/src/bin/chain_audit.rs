//! Validates the financial record chain of a database and prints the report.
//!
//! Exit status: 0 when the chain is secure, 2 when tampering was found, 1 on
//! any other failure.

use anyhow::Context;
use clap::Parser;
use expense_core_api::domain::{ChainReport, IssueReason};
use expense_core_api::service::FinancialRecordService;
use expense_core_db::FinancialRecordServiceImpl;
use expense_core_postgres::{PostgresConfig, PostgresRepositories};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "chain-audit", version, about = "Validate the financial record hash chain")]
struct Cli {
    /// Overrides DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Apply pending migrations before validating
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expense_core_db=info,expense_core_postgres=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = PostgresConfig::from_env().context("invalid database configuration")?;
    if let Some(url) = cli.database_url {
        config = config.with_database_url(url);
    }
    let pool = config.connect().await.context("failed to connect to database")?;
    if cli.migrate {
        sqlx::migrate!().run(&pool).await.context("failed to apply migrations")?;
    }

    let service = FinancialRecordServiceImpl::new(PostgresRepositories::new(Arc::new(pool)));
    let report = service.validate_chain().await.context("chain validation failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.is_secure() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn print_report(report: &ChainReport) {
    println!("status:          {}", report.overall_status);
    println!("records checked: {}", report.records_checked);
    if let Some(tail) = &report.tail_hash {
        println!("tail hash:       {tail}");
    }
    if report.issues.is_empty() {
        return;
    }

    let count = |kind: fn(&IssueReason) -> bool| {
        report.issues.iter().filter(|issue| kind(&issue.reason)).count()
    };
    println!("broken links:    {}", count(IssueReason::is_link_failure));
    println!("hash mismatches: {}", count(IssueReason::is_hash_failure));
    println!("unreadable:      {}", count(|reason| *reason == IssueReason::Unencodable));
    for issue in &report.issues {
        println!("  #{:<8} {}  {}", issue.sequence, issue.record_id, issue.reason);
    }
}
