use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, SyncArgs};

/// Top-level CLI parser for the `cascade` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cascade",
    version,
    about = "Cascade - propagate ancestor field values through a GitHub project"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load environment variables from this file instead of ./.env
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            env_file: self.env_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sync_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "cascade",
            "sync",
            "--project-url",
            "https://github.com/orgs/acme/projects/7",
            "--fields",
            "Initiative,Team",
            "--dry-run",
        ])
        .expect("cli should parse");

        let Commands::Sync(args) = cli.command else {
            panic!("expected sync");
        };
        let overrides = args.overrides();
        assert_eq!(
            overrides.project_url.as_deref(),
            Some("https://github.com/orgs/acme/projects/7")
        );
        assert_eq!(overrides.fields.as_deref(), Some("Initiative,Team"));
        assert_eq!(overrides.ancestor_type, None);
        assert_eq!(overrides.dry_run, Some(true));
    }

    #[test]
    fn absent_dry_run_leaves_config_in_charge() {
        let cli = Cli::try_parse_from(["cascade", "sync"]).expect("cli should parse");
        let Commands::Sync(args) = cli.command else {
            panic!("expected sync");
        };
        assert_eq!(args.overrides().dry_run, None);
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["cascade", "--format", "table", "--verbose", "schema"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["cascade", "config", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Config(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["cascade", "--format", "xml", "schema"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn env_file_is_global() {
        let cli = Cli::try_parse_from(["cascade", "sync", "--env-file", "ci.env"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert_eq!(
            flags.env_file.as_deref(),
            Some(std::path::Path::new("ci.env"))
        );
    }
}
