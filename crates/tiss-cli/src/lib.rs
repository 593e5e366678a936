use tiss_core::models::{UploadStatus, UploadTask};
use tiss_core::{DashboardStats, DisplayRow};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn render_rows_table(rows: &[&DisplayRow], total: usize, truncated: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nShowing {} of {} files\n", rows.len(), total));

    if rows.is_empty() {
        out.push_str("\nNo files found.\n");
        return out;
    }

    out.push_str(&format!(
        "\n{:<40} {:<10} {:<6} {:<11} {:>10} {:<18}\n",
        "File", "Category", "Type", "Date", "Size", "Modified"
    ));
    out.push_str(&"-".repeat(100));
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{:<40} {:<10} {:<6} {:<11} {:>10} {:<18}\n",
            truncate_string(&row.file_name, 40),
            row.category.as_str(),
            row.file_type.as_str(),
            row.extracted_date.as_deref().unwrap_or("-"),
            row.formatted_size,
            row.formatted_date,
        ));
    }

    if truncated {
        out.push_str("\n... (bucket listing truncated, use --all to fetch every page)\n");
    }

    out
}

pub fn render_stats(stats: &DashboardStats) -> String {
    format!(
        "\n=== Bucket Statistics ===\n\nTotal files:    {}\nProcessed:      {}\nReceived:       {}\nTotal size:     {}\n",
        stats.total_files, stats.processed_files, stats.received_files, stats.total_size_formatted
    )
}

/// One progress line for an upload task, without line terminator.
pub fn render_progress(task: &UploadTask) -> String {
    const WIDTH: usize = 20;
    let filled = WIDTH * task.progress_percent.min(100) as usize / 100;
    let status = match task.status {
        UploadStatus::Idle => "waiting",
        UploadStatus::Uploading => "uploading",
        UploadStatus::Success => "done",
        UploadStatus::Error => "failed",
    };

    format!(
        "{:<40} [{}{}] {:>3}% {:<9}",
        truncate_string(&task.file_name, 40),
        "#".repeat(filled),
        " ".repeat(WIDTH - filled),
        task.progress_percent,
        status
    )
}
