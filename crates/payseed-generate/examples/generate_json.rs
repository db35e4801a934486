use std::env;
use std::path::PathBuf;

use payseed_generate::{GenerateParams, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut out_dir: Option<PathBuf> = None;
    let mut params = GenerateParams::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out_dir = args.next().map(PathBuf::from),
            "--onboarding-requests" => {
                params.onboarding_requests = args.next().ok_or("missing count")?.parse()?
            }
            "--payroll-runs" => params.payroll_runs = args.next().ok_or("missing count")?.parse()?,
            "--orders" => params.orders = args.next().ok_or("missing count")?.parse()?,
            _ => return Err(format!("unexpected argument: {arg}").into()),
        }
    }

    let out_dir = out_dir.unwrap_or_else(|| PathBuf::from("out"));
    std::fs::create_dir_all(&out_dir)?;

    let result = GenerationEngine::new(params).run(&out_dir)?;
    println!("report_path={}", result.report_path.display());
    for table in &result.report.tables {
        println!("{} rows={} sha256={}", table.table, table.rows, table.sha256);
    }
    Ok(())
}
