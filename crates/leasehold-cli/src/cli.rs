//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Leasehold - Extract the key terms of rental agreements with an LLM.
#[derive(Debug, Parser)]
#[command(name = "leasehold")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Credential profile to use
    #[arg(short, long, global = true, env = "LEASEHOLD_PROFILE")]
    pub profile: Option<String>,

    /// Database file holding the extracted records
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (paths only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract and store the terms of every agreement in a directory
    Process(ProcessArgs),

    /// Show the stored terms of one agreement
    Show(ShowArgs),

    /// List stored agreements
    List,

    /// Delete stored agreements
    Forget(ForgetArgs),

    /// Manage credential profiles
    Profile(ProfileArgs),
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Directory containing .pdf and .docx agreements
    #[arg(short, long, env = "LEASEHOLD_SOURCE_DIR")]
    pub source_dir: Option<PathBuf>,

    /// Stop at the first document that fails
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Agreement ID (the document path it was extracted from)
    pub agreement_id: String,
}

/// Arguments for the forget command.
#[derive(Debug, Parser)]
pub struct ForgetArgs {
    /// Agreement IDs to delete
    pub ids: Vec<String>,

    /// Read IDs from file (one per line)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Provider kind
        #[arg(long, value_enum, default_value = "messages")]
        provider: ProviderArg,
        /// API base URL
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Model identifier
        #[arg(short, long)]
        model: String,
        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Provider argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    /// Hosted Messages-style API
    Messages,
    /// Local Ollama server
    Ollama,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ProviderArg> for crate::config::ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Messages => crate::config::ProviderKind::Messages,
            ProviderArg::Ollama => crate::config::ProviderKind::Ollama,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    #[test]
    fn test_process_command() {
        let cli = Cli::parse_from([
            "leasehold",
            "process",
            "--source-dir",
            "/data/agreements",
            "--fail-fast",
        ]);
        match cli.command {
            Command::Process(args) => {
                assert_eq!(args.source_dir, Some(PathBuf::from("/data/agreements")));
                assert!(args.fail_fast);
            }
            _ => panic!("Expected Process command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "leasehold",
            "list",
            "--database",
            "records.db",
            "--format",
            "json",
            "--no-color",
        ]);
        assert!(matches!(cli.command, Command::List));
        assert_eq!(cli.database, Some(PathBuf::from("records.db")));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
    }

    #[test]
    fn test_show_command() {
        let cli = Cli::parse_from(["leasehold", "show", "/agreements/lease.pdf"]);
        match cli.command {
            Command::Show(args) => assert_eq!(args.agreement_id, "/agreements/lease.pdf"),
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_profile_set_command() {
        let cli = Cli::parse_from([
            "leasehold",
            "profile",
            "set",
            "local",
            "--provider",
            "ollama",
            "--model",
            "llama3",
        ]);
        match cli.command {
            Command::Profile(ProfileArgs {
                action:
                    ProfileAction::Set {
                        name,
                        provider,
                        endpoint,
                        model,
                        ..
                    },
            }) => {
                assert_eq!(name, "local");
                assert_eq!(ProviderKind::from(provider), ProviderKind::Ollama);
                assert!(endpoint.is_none());
                assert_eq!(model, "llama3");
            }
            _ => panic!("Expected Profile Set command"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["leasehold"]).is_err());
    }
}
