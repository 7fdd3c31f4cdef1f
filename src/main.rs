use clap::Parser;
use medreport::{ReportAssembler, ReportConfig, ReportDataset, ReportError};
use std::path::PathBuf;

/// Generates a paginated PDF diagnostic report from a JSON dataset.
#[derive(Parser, Debug)]
#[command(name = "medreport", version, about)]
struct Args {
    /// Path to the patient dataset (JSON)
    dataset: PathBuf,

    /// Output directory (overrides the configured one)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Configuration file (TOML); defaults to ./medreport.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the advisory service and use the built-in precautions
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<(), ReportError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = ReportConfig::load(args.config.as_deref())?;
    if args.offline {
        config.advisory.enabled = false;
    }
    let output_dir = args.out.unwrap_or_else(|| config.output_dir.clone());

    let dataset = ReportDataset::from_file(&args.dataset)?;
    let assembler = ReportAssembler::from_config(&config);
    let (path, outline) = assembler.generate_report_file(&dataset, &output_dir).await?;

    println!(
        "Wrote {} ({} page(s), {:?} report)",
        path.display(),
        outline.page_count,
        outline.branch
    );
    Ok(())
}
