/// LBER command-line tool — inspect and validate raw LDAP PDU files.
///
/// # Command overview
///
/// ```text
/// lber <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print a human-readable summary of the PDUs in a file
///   validate   Check a PDU file for structural correctness
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Enable grammar trace logging on stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid PDU, etc.)  |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_inspect;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The LBER command-line tool.
///
/// Decodes files containing raw BER-encoded LDAPMessage PDUs, as
/// captured off the wire or produced by directory tooling.
#[derive(Parser)]
#[command(name = "lber", version, about = "LDAP BER codec CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable grammar trace logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print a human-readable summary of every PDU in the file.
    Inspect(InspectArgs),
    /// Check a PDU file for structural correctness.
    Validate(ValidateArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `lber inspect`.
///
/// Decodes every PDU in the file and prints one summary per message:
/// message id, operation, filter rendering for search requests,
/// attributes, result details, and controls.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the raw PDU file to inspect.
    pub file: PathBuf,

    /// Show a 16-byte-per-line hex dump of each PDU before its summary.
    #[arg(long)]
    pub show_hex: bool,

    /// Treat this attribute as binary (repeatable).
    #[arg(long = "binary-attr")]
    pub binary_attrs: Vec<String>,
}

/// Arguments for `lber validate`.
///
/// Runs a strict decode over the whole file and reports either a set of
/// success checkmarks or the first diagnostic. Exit code 0 on a valid
/// file, 1 on any structural problem.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the raw PDU file to validate.
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
