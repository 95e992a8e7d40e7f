//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::provider::Provider;
use leasehold_documents::DocumentReader;
use leasehold_extractor::{BatchDriver, DocumentProcessor};
use leasehold_store::SqliteStore;
use std::path::Path;
use tracing::debug;

/// Execute the process command.
///
/// Returns `Ok(false)` when the batch ran but some documents failed.
pub async fn execute_process(
    args: ProcessArgs,
    config: &Config,
    database: &Path,
    formatter: &Formatter,
) -> Result<bool> {
    let source_dir = args
        .source_dir
        .unwrap_or_else(|| config.settings.source_dir.clone());

    let extractor_config = config.settings.extractor_config(args.fail_fast);
    extractor_config.validate().map_err(CliError::Config)?;

    let profile = config.get_active_profile()?;
    let provider = Provider::from_profile(profile, extractor_config.request_timeout())?;

    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    debug!("Opening store at {}", database.display());
    let store = SqliteStore::new(database)?;

    if formatter.format() == OutputFormat::Table {
        eprintln!(
            "{}",
            formatter.info(&format!(
                "Processing {} with profile '{}' ({} via {})",
                source_dir.display(),
                config.active_profile,
                profile.model,
                profile.provider.as_str()
            ))
        );
    }

    let processor = DocumentProcessor::new(
        DocumentReader::new(),
        provider,
        store,
        extractor_config,
    );
    let report = BatchDriver::new(processor).run(&source_dir).await?;

    println!("{}", formatter.format_report(&report)?);
    Ok(report.is_success())
}
