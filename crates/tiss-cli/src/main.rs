//! TISS CLI: command-line client for the TISS storage gateway.
//!
//! Set TISS_API_BASE and TISS_BUCKET_NAME (defaults target production).

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tiss_api_client::{ApiClient, Dashboard, LocalFile};
use tiss_cli::{init_tracing, render_progress, render_rows_table, render_stats};
use tiss_core::models::{Category, FileType, UploadTask};
use tiss_core::{
    AppError, ClientConfig, ErrorMetadata, FilterState, LogLevel, Settings, UploadDialog,
};

#[derive(Parser)]
#[command(name = "tiss", about = "Browse, download and upload files in the TISS bucket")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List files with optional filters
    List {
        /// Case-insensitive substring of the file name
        #[arg(long)]
        search: Option<String>,
        /// Filter by category: processed, received, other
        #[arg(long)]
        category: Option<Category>,
        /// Filter by type: zip, xlsx, xml, pdf, other
        #[arg(long)]
        r#type: Option<FileType>,
        /// Follow pagination and list every page
        #[arg(long)]
        all: bool,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Show file counts and total size
    Stats {
        /// Follow pagination and count every page
        #[arg(long)]
        all: bool,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Download a file by key
    Download {
        /// Object key
        key: String,
        /// Output path (defaults to the file name in the current directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the download URL for a key
    Link {
        /// Object key
        key: String,
    },
    /// Upload one or more files via presigned URLs
    Upload {
        /// Files to upload (.xlsx, .xls, .zip, .xml, .pdf)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show or change the dark mode preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current value
    Show,
    /// Flip the current value
    Toggle,
    /// Enable dark mode
    On,
    /// Disable dark mode
    Off,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Log a failed action at its level and turn it into a user-facing error.
fn notify(err: AppError) -> anyhow::Error {
    let message = err.client_message();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %err, code = err.error_code(), "Action failed"),
        LogLevel::Warn => tracing::warn!(error = %err, code = err.error_code(), "Action failed"),
        LogLevel::Error => tracing::error!(error = %err, code = err.error_code(), "Action failed"),
    }
    anyhow::Error::from(err).context(message)
}

fn print_progress(task: &UploadTask) {
    eprint!("\r{}", render_progress(task));
    if task.is_finished() {
        eprintln!();
    }
}

async fn load_dashboard(
    client: ApiClient,
    config: &ClientConfig,
    all: bool,
) -> anyhow::Result<Dashboard> {
    let mut dashboard =
        Dashboard::new(client, config).with_follow_pagination(all || config.follow_pagination);
    dashboard.refresh().await.map_err(notify)?;
    Ok(dashboard)
}

async fn upload_files(
    client: ApiClient,
    config: &ClientConfig,
    paths: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let mut dialog = UploadDialog::new(config.upload_policy());
    let mut files = Vec::new();
    let mut rejected = 0;

    for path in paths {
        let file = match LocalFile::from_path(&path, dialog.policy()).await {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Skipping {}: {}", path.display(), e.client_message());
                rejected += 1;
                continue;
            }
        };
        match dialog.select(file.selected()) {
            Ok(()) => files.push(file),
            Err(e) => {
                eprintln!("Skipping {}: {}", path.display(), e.client_message());
                rejected += 1;
            }
        }
    }

    if dialog.is_empty() {
        anyhow::bail!("No valid files to upload");
    }

    let mut dashboard = Dashboard::new(client, config);
    let summary = dashboard
        .upload_pending(&mut dialog, &files, print_progress)
        .await;

    for (name, err) in &summary.failed {
        eprintln!("{}: {}", name, err.client_message());
    }
    println!(
        "Uploaded {} file(s), {} failed, {} rejected",
        summary.succeeded.len(),
        summary.failed.len(),
        rejected
    );
    if !summary.succeeded.is_empty() {
        println!("{} files now in bucket", dashboard.stats().total_files);
    }

    dialog.close().map_err(notify)?;

    if !summary.is_success() {
        anyhow::bail!("{} upload(s) failed", summary.failed.len());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context(
        "Failed to load configuration. Check TISS_API_BASE and TISS_BUCKET_NAME",
    )?;
    let client = ApiClient::new(&config).context("Failed to create API client")?;

    match cli.command {
        Commands::List {
            search,
            category,
            r#type,
            all,
            format,
        } => {
            let mut dashboard = load_dashboard(client, &config, all).await?;
            dashboard.set_filter(FilterState {
                search_term: search.unwrap_or_default(),
                category,
                file_type: r#type,
            });

            let visible = dashboard.visible_rows();
            match format {
                OutputFormat::Json => print_json(&visible)?,
                OutputFormat::Table => print!(
                    "{}",
                    render_rows_table(&visible, dashboard.rows().len(), dashboard.is_truncated())
                ),
            }
        }
        Commands::Stats { all, format } => {
            let dashboard = load_dashboard(client, &config, all).await?;
            match format {
                OutputFormat::Json => print_json(dashboard.stats())?,
                OutputFormat::Table => print!("{}", render_stats(dashboard.stats())),
            }
        }
        Commands::Download { key, output } => {
            let data = client.download_file(&key).await.map_err(notify)?;
            let output =
                output.unwrap_or_else(|| PathBuf::from(tiss_core::parse_key(&key).file_name));
            tokio::fs::write(&output, &data)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Downloaded {} ({} bytes)", output.display(), data.len());
        }
        Commands::Link { key } => {
            println!("{}", client.download_url(&key));
        }
        Commands::Upload { files } => {
            upload_files(client, &config, files).await?;
        }
        Commands::Theme { action } => {
            let mut settings = Settings::load(config.settings_path.clone());
            match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => {}
                ThemeAction::Toggle => {
                    settings.toggle_dark_mode().map_err(notify)?;
                }
                ThemeAction::On => settings.set_dark_mode(true).map_err(notify)?,
                ThemeAction::Off => settings.set_dark_mode(false).map_err(notify)?,
            }
            println!(
                "Dark mode: {}",
                if settings.dark_mode() { "on" } else { "off" }
            );
        }
    }

    Ok(())
}
