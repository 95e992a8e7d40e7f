//! Forget command implementation.

use crate::cli::ForgetArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use leasehold_domain::traits::RecordStore;
use leasehold_store::SqliteStore;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Execute the forget command.
pub fn execute_forget(
    args: ForgetArgs,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let mut ids = args.ids.clone();

    if let Some(file_path) = &args.file {
        ids.extend(read_ids_from_file(file_path)?);
    }

    if ids.is_empty() {
        return Err(CliError::InvalidInput("No agreement IDs provided".to_string()));
    }

    // Confirm deletion unless --yes is specified
    if !args.yes {
        println!("About to delete {} agreement(s):", ids.len());
        for id in &ids {
            println!("  - {}", id);
        }
        print!("Continue? [y/N] ");
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    let deleted = delete_records(store, &ids)?;

    if deleted == ids.len() {
        println!("{}", formatter.bulk_result("Deleted", deleted));
    } else {
        println!(
            "{}",
            formatter.warning(&format!(
                "Deleted {} of {} agreement(s); the rest were not stored",
                deleted,
                ids.len()
            ))
        );
    }

    Ok(())
}

/// Delete each ID, returning how many records existed.
fn delete_records(store: &mut SqliteStore, ids: &[String]) -> Result<usize> {
    let mut deleted = 0;
    for id in ids {
        if store.delete_record(id)? {
            deleted += 1;
        }
    }
    Ok(deleted)
}

/// Read IDs from a file (one per line).
fn read_ids_from_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use leasehold_domain::{AgreementRecord, RentalTerms};
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_ids_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "/agreements/a.pdf").unwrap();
        writeln!(file, "/agreements/b.docx").unwrap();
        writeln!(file).unwrap(); // Empty line should be ignored
        writeln!(file, "  /agreements/c.pdf  ").unwrap(); // Whitespace should be trimmed

        let ids = read_ids_from_file(file.path()).unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[2], "/agreements/c.pdf");
    }

    #[test]
    fn test_delete_records_counts_existing() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .upsert_record(AgreementRecord::new("a.pdf", RentalTerms::default()))
            .unwrap();

        let ids = vec!["a.pdf".to_string(), "missing.pdf".to_string()];
        assert_eq!(delete_records(&mut store, &ids).unwrap(), 1);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_forget_without_ids() {
        let mut store = SqliteStore::in_memory().unwrap();
        let formatter = Formatter::new(crate::config::OutputFormat::Table, false);
        let args = ForgetArgs {
            ids: Vec::new(),
            file: None,
            yes: true,
        };
        assert!(matches!(
            execute_forget(args, &mut store, &formatter),
            Err(CliError::InvalidInput(_))
        ));
    }
}
