//! Show and list command implementations.

use crate::cli::ShowArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use leasehold_domain::traits::RecordStore;
use leasehold_store::SqliteStore;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let record = store
        .get_record(&args.agreement_id)?
        .ok_or(CliError::NotFound(args.agreement_id))?;
    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

/// Execute the list command.
pub fn execute_list(store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let records = store.list_records()?;
    println!("{}", formatter.format_records(&records)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use leasehold_domain::{AgreementRecord, RentalTerms};

    #[test]
    fn test_show_missing_record() {
        let store = SqliteStore::in_memory().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = execute_show(
            ShowArgs {
                agreement_id: "/agreements/none.pdf".to_string(),
            },
            &store,
            &formatter,
        );
        assert!(matches!(result, Err(CliError::NotFound(id)) if id == "/agreements/none.pdf"));
    }

    #[test]
    fn test_show_and_list_existing_record() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .upsert_record(AgreementRecord::new("lease.pdf", RentalTerms::default()))
            .unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_show(
            ShowArgs {
                agreement_id: "lease.pdf".to_string(),
            },
            &store,
            &formatter,
        )
        .unwrap();
        execute_list(&store, &formatter).unwrap();
    }
}
