use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rigscan::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// One-shot hardware and OS scanner for gaming PCs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Where to write the snapshot JSON
    #[arg(short, long, default_value = "system_scan.json")]
    output: PathBuf,

    /// POST the snapshot to the collection endpoint after the scan
    #[arg(long)]
    upload: bool,

    /// Collection endpoint for --upload
    #[arg(long, default_value = "http://localhost:3000/api/scan")]
    upload_url: String,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the console summary
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let mut app_config = config::AppConfig::load(cli.config.as_deref())?;
    if cli.upload_url != config::UploadConfig::default().url {
        app_config.upload.url = cli.upload_url;
    }

    let snapshot = scanner::scan(&app_config).await;

    let saved = output::save_snapshot(&snapshot, &cli.output);
    match &saved {
        Ok(path) => println!("Scan saved to: {}", path.display()),
        Err(e) => tracing::error!(error = %e, "failed to save snapshot"),
    }

    if !cli.quiet {
        report::print_summary(&snapshot);
    }

    if cli.upload {
        if let Err(e) =
            upload::upload_snapshot(&snapshot, &app_config.upload.url, app_config.upload.timeout_secs)
                .await
        {
            tracing::error!(error = %e, "upload failed");
        }
    }

    saved.map(|_| ())
}
