use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::cli::ReportFormat;
use crate::commands::common::open_service;
use crate::error::CliError;
use gearlog_core::report::{render_csv_report, render_json_report};

pub async fn run_report(
    format: ReportFormat,
    output: Option<PathBuf>,
    db_path: &Path,
) -> Result<(), CliError> {
    let service = open_service(db_path)?;
    let rows = service.compliance_report().await?;

    let rendered = match format {
        ReportFormat::Json => render_json_report(&rows)?,
        ReportFormat::Csv => render_csv_report(&rows),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            eprintln!("Wrote {} row(s) to {}", rows.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}
