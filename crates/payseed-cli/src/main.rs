mod config;
mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use payseed_core::{EntityKind, build_dependency_report, record_json_schema};
use payseed_eval::{EvalError, EvaluateOptions, EvaluationEngine};
use payseed_generate::{GenerationEngine, GenerationError};
use thiserror::Error;

use config::{CountOverrides, PayseedConfig};
use logging::{LOG_FILE_NAME, init_logging};

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "payseed",
    version,
    about = "Deterministic payroll and vendor dataset generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every table and write it as JSON.
    Generate(GenerateArgs),
    /// Check a written dataset for integrity violations.
    Check(CheckArgs),
    /// Print the JSON Schema of table records.
    Schema(SchemaArgs),
    /// Print the entity dependency order.
    Graph,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Optional TOML config with `out_dir` and a `[counts]` table.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Onboarding requests to create.
    #[arg(long, value_name = "N")]
    onboarding_requests: Option<u32>,
    /// Payroll runs to create.
    #[arg(long, value_name = "N")]
    payroll_runs: Option<u32>,
    /// Orders to attempt.
    #[arg(long, value_name = "N")]
    orders: Option<u32>,
    /// Output directory; created when missing.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Directory a generation run wrote to.
    #[arg(long, value_name = "DIR")]
    dir: PathBuf,
    /// Violations listed in report.md.
    #[arg(long, default_value_t = 20)]
    max_examples: usize,
    /// Also write violations.json with every violation.
    #[arg(long, default_value_t = false)]
    write_violations: bool,
    /// Report violations without failing.
    #[arg(long, default_value_t = false)]
    lenient: bool,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Table name, e.g. `employee_pays`; all tables when omitted.
    #[arg(long, value_name = "NAME")]
    table: Option<String>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Check(args) => run_check(args),
        Command::Schema(args) => run_schema(args),
        Command::Graph => run_graph(),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => PayseedConfig::load(path)?,
        None => PayseedConfig::default(),
    };
    let flags = CountOverrides {
        onboarding_requests: args.onboarding_requests,
        payroll_runs: args.payroll_runs,
        orders: args.orders,
    };
    let params = config.resolve_params(&flags);
    let out_dir = config.resolve_out_dir(args.out);

    std::fs::create_dir_all(&out_dir)?;
    init_logging(Some(&out_dir.join(LOG_FILE_NAME)))?;
    tracing::info!(out_dir = %out_dir.display(), "output directory ready");

    let result = GenerationEngine::new(params).run(&out_dir)?;

    println!("out_dir={}", result.out_dir.display());
    println!("report_path={}", result.report_path.display());
    for table in &result.report.tables {
        println!("{}={}", table.table, table.rows);
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), CliError> {
    init_logging(None)?;

    let options = EvaluateOptions {
        strict: !args.lenient,
        max_examples: args.max_examples,
        write_violations: args.write_violations,
        out_dir: None,
    };
    let result = EvaluationEngine::new(options).run(&args.dir)?;

    println!("metrics_path={}", result.metrics_path.display());
    println!("report_path={}", result.report_path.display());
    if let Some(path) = result.violations_path {
        println!("violations_path={}", path.display());
    }
    println!("violations={}", result.violations.len());
    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<(), CliError> {
    let output = match args.table {
        Some(name) => {
            let kind = EntityKind::from_table_name(&name)
                .ok_or_else(|| CliError::InvalidConfig(format!("unknown table '{name}'")))?;
            serde_json::to_value(record_json_schema(kind))?
        }
        None => {
            let mut schemas = serde_json::Map::new();
            for kind in EntityKind::ALL {
                schemas.insert(
                    kind.table_name().to_string(),
                    serde_json::to_value(record_json_schema(kind))?,
                );
            }
            serde_json::Value::Object(schemas)
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_graph() -> Result<(), CliError> {
    let report = build_dependency_report();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
