use bankline::domain::ports::LedgerStoreBox;
use bankline::infrastructure::file::FileLedgerStore;
use bankline::interfaces::shell::Shell;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the ledger file holding all accounts
    #[arg(long, default_value = "accounts.txt")]
    ledger: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let store: LedgerStoreBox = Box::new(FileLedgerStore::new(cli.ledger));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock());
    shell.run(store.as_ref()).await.into_diagnostic()?;

    Ok(())
}

/// Logging goes to stderr, configurable via RUST_LOG, so the interactive
/// prompts on stdout stay clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
