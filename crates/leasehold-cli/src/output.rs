//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use leasehold_domain::{AgreementRecord, TermField};
use leasehold_extractor::{BatchReport, DocumentStatus};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Columns shown by `list` in table mode
const LIST_COLUMNS: [TermField; 5] = [
    TermField::Title,
    TermField::OwnerName,
    TermField::TenantName,
    TermField::TenancyStartDate,
    TermField::MonthlyRent,
];

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a list of records.
    pub fn format_records(&self, records: &[AgreementRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = records.iter().map(record_json).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| r.agreement_id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a single record with all of its fields.
    pub fn format_record(&self, record: &AgreementRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&record_json(record))?),
            OutputFormat::Quiet => Ok(record.agreement_id.clone()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Agreement ID", record.agreement_id.as_str()]);
                for (field, value) in record.terms.iter() {
                    builder.push_record([field.json_key(), value]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    fn format_records_table(&self, records: &[AgreementRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No agreements found.", "yellow");
        }

        let mut builder = Builder::default();
        let mut header = vec!["Agreement ID"];
        header.extend(LIST_COLUMNS.iter().map(|f| f.json_key()));
        builder.push_record(header);

        for record in records {
            let mut row = vec![record.agreement_id.as_str()];
            row.extend(LIST_COLUMNS.iter().map(|f| record.terms.get(*f)));
            builder.push_record(row);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format the result of a batch run.
    pub fn format_report(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&report_json(report))?),
            OutputFormat::Quiet => Ok(report
                .documents
                .iter()
                .filter(|d| d.is_stored())
                .map(|d| d.path.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(self.format_report_table(report)),
        }
    }

    fn format_report_table(&self, report: &BatchReport) -> String {
        let mut out = String::new();

        if report.documents.is_empty() {
            out.push_str(&self.colorize("No documents found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Document", "Status", "Elapsed", "Detail"]);
            for doc in &report.documents {
                let (status, detail) = match &doc.status {
                    DocumentStatus::Stored(outcome) => {
                        ("stored".to_string(), outcome.record.terms.agreement_title.clone())
                    }
                    DocumentStatus::Failed { kind, message } => {
                        (format!("failed ({})", kind), message.clone())
                    }
                };
                builder.push_record([
                    doc.path.display().to_string(),
                    status,
                    format_elapsed(doc.elapsed),
                    detail,
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            out.push_str(&table.to_string());
        }
        out.push('\n');

        let summary = format!(
            "{} stored, {} failed, {} skipped in {}",
            report.stored_count(),
            report.failure_count(),
            report.skipped.len(),
            format_elapsed(report.elapsed)
        );
        if report.is_success() {
            out.push_str(&self.success(&summary));
        } else {
            out.push_str(&self.error(&summary));
            if report.halted {
                out.push('\n');
                out.push_str(&self.warning("Stopped at the first failure (--fail-fast)"));
            }
        }
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize) -> String {
        self.success(&format!("{} {} agreement(s)", operation, count))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn record_json(record: &AgreementRecord) -> Value {
    let mut object = Map::new();
    object.insert("agreement_id".to_string(), json!(record.agreement_id));
    for (field, value) in record.terms.iter() {
        object.insert(field.attribute().to_string(), json!(value));
    }
    Value::Object(object)
}

fn report_json(report: &BatchReport) -> Value {
    let documents: Vec<Value> = report
        .documents
        .iter()
        .map(|doc| {
            let mut entry = json!({
                "path": doc.path.display().to_string(),
                "elapsed_ms": doc.elapsed.as_millis() as u64,
            });
            match &doc.status {
                DocumentStatus::Stored(outcome) => {
                    entry["status"] = json!("stored");
                    entry["record"] = record_json(&outcome.record);
                }
                DocumentStatus::Failed { kind, message } => {
                    entry["status"] = json!("failed");
                    entry["kind"] = json!(kind.as_str());
                    entry["message"] = json!(message);
                }
            }
            entry
        })
        .collect();

    json!({
        "source_dir": report.source_dir.display().to_string(),
        "started_at": report.started_at.to_rfc3339(),
        "elapsed_ms": report.elapsed.as_millis() as u64,
        "stored": report.stored_count(),
        "failed": report.failure_count(),
        "skipped": report
            .skipped
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
        "halted": report.halted,
        "documents": documents,
    })
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2?}", elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leasehold_domain::{DocumentFormat, RentalTerms};
    use leasehold_extractor::{DocumentReport, FailureKind, ProcessOutcome};
    use std::path::PathBuf;

    fn create_test_record() -> AgreementRecord {
        let mut terms = RentalTerms::default();
        for field in TermField::ALL {
            terms.set(field, format!("{} value", field.attribute()));
        }
        terms.agreement_title = "Residential Lease".to_string();
        AgreementRecord::new("/agreements/lease.pdf", terms)
    }

    fn create_test_report() -> BatchReport {
        let record = create_test_record();
        BatchReport {
            source_dir: PathBuf::from("/agreements"),
            started_at: chrono::Local::now(),
            elapsed: Duration::from_millis(1500),
            documents: vec![
                DocumentReport {
                    path: PathBuf::from("/agreements/lease.pdf"),
                    elapsed: Duration::from_millis(1200),
                    status: DocumentStatus::Stored(ProcessOutcome {
                        record,
                        format: DocumentFormat::Pdf,
                        reasoning: String::new(),
                        text_length: 42,
                        model_name: "mock-model".to_string(),
                    }),
                },
                DocumentReport {
                    path: PathBuf::from("/agreements/notes.txt"),
                    elapsed: Duration::from_millis(1),
                    status: DocumentStatus::Failed {
                        kind: FailureKind::Unsupported,
                        message: "Unsupported document: /agreements/notes.txt".to_string(),
                    },
                },
            ],
            skipped: vec![PathBuf::from("/agreements/.DS_Store")],
            halted: false,
        }
    }

    #[test]
    fn test_json_record() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_record(&create_test_record()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["agreement_id"], "/agreements/lease.pdf");
        assert_eq!(value["agreement_title"], "Residential Lease");
        assert_eq!(value["property_tax_and_hoa"], "property_tax_and_hoa value");
    }

    #[test]
    fn test_table_record_shows_every_field() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_record(&create_test_record()).unwrap();
        for field in TermField::ALL {
            assert!(output.contains(field.json_key()));
        }
    }

    #[test]
    fn test_quiet_records() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_records(&[create_test_record()]).unwrap();
        assert_eq!(output, "/agreements/lease.pdf");
    }

    #[test]
    fn test_empty_records() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_records(&[]).unwrap();
        assert!(output.contains("No agreements found"));
    }

    #[test]
    fn test_report_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        assert!(output.contains("Residential Lease"));
        assert!(output.contains("failed (unsupported)"));
        assert!(output.contains("✗ 1 stored, 1 failed, 1 skipped"));
    }

    #[test]
    fn test_report_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["stored"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["documents"][0]["status"], "stored");
        assert_eq!(value["documents"][0]["elapsed_ms"], 1200);
        assert_eq!(value["documents"][1]["kind"], "unsupported");
        assert_eq!(value["skipped"][0], "/agreements/.DS_Store");
    }

    #[test]
    fn test_report_quiet_lists_stored_paths() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        assert_eq!(output, "/agreements/lease.pdf");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
