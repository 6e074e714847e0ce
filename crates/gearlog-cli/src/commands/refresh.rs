use std::path::Path;

use crate::commands::common::open_service;
use crate::error::CliError;
use gearlog_core::config::BackendConfig;
use gearlog_core::remote::InspectionsApiClient;

pub async fn run_refresh(db_path: &Path) -> Result<(), CliError> {
    let config = BackendConfig::from_env()?.ok_or(CliError::SyncNotConfigured)?;
    let client = InspectionsApiClient::new(&config)?;

    let service = open_service(db_path)?;
    let count = service.refresh_catalog(&client).await?;
    println!("Refreshed {count} equipment record(s) from the backend");
    Ok(())
}
