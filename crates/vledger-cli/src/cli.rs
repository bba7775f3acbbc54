use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vledger",
    about = "Versioned key-value ledger: record, transfer and trace assets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Journal file backing the ledger
    #[arg(long, global = true, default_value = "ledger.journal")]
    pub journal: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Invoke a ledger operation by name
    Invoke(InvokeArgs),
    /// List every asset in key order
    Assets,
    /// Show every recorded version of one asset
    History(HistoryArgs),
    /// List the registered operations
    Operations,
    /// Serve the ledger over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct InvokeArgs {
    /// Operation name, e.g. `recordAsset`
    pub function: String,
    /// Positional string arguments passed through unchanged
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct HistoryArgs {
    pub key: String,
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML server configuration; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Seed the sample assets before serving
    #[arg(long)]
    pub seed: bool,
    /// Keep the ledger in memory instead of the journal
    #[arg(long)]
    pub memory: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_invoke() {
        let cli = Cli::try_parse_from(["vledger", "invoke", "changeHolder", "1", "Ada", "tx", "t", "Transfer", "-1.5", "2"])
            .unwrap();
        if let Command::Invoke(args) = cli.command {
            assert_eq!(args.function, "changeHolder");
            assert_eq!(args.args.len(), 6);
            assert_eq!(args.args[4], "-1.5");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_invoke_without_args() {
        let cli = Cli::try_parse_from(["vledger", "invoke", "initLedger"]).unwrap();
        if let Command::Invoke(args) = cli.command {
            assert!(args.args.is_empty());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_history() {
        let cli = Cli::try_parse_from(["vledger", "history", "2"]).unwrap();
        if let Command::History(args) = cli.command {
            assert_eq!(args.key, "2");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn default_journal_path() {
        let cli = Cli::try_parse_from(["vledger", "assets"]).unwrap();
        assert_eq!(cli.journal, PathBuf::from("ledger.journal"));
    }

    #[test]
    fn parse_global_journal_after_command() {
        let cli = Cli::try_parse_from(["vledger", "operations", "--journal", "/tmp/x.journal"]).unwrap();
        assert_eq!(cli.journal, PathBuf::from("/tmp/x.journal"));
        assert!(matches!(cli.command, Command::Operations));
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["vledger", "serve", "--bind", "0.0.0.0:8080", "--seed"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert!(args.seed);
            assert!(!args.memory);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["vledger", "--verbose", "assets"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["vledger", "--format", "json", "assets"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
