/// MMKV command-line tool. Reads the data files an MMKV store leaves on
/// disk without needing the app that wrote them.
///
/// # Command overview
///
/// ```text
/// mmkv <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print every decoded key/value entry
///   validate   Check that the whole declared payload decodes
///   export     Write the decoded entries as JSON
///   stats      Print entry counts and byte totals per detected type
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decoder diagnostics to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                          |
/// |------|--------------------------------------------------|
/// | 0    | Success                                          |
/// | 1    | Error (missing file, short header, invalid scan) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use mmkv_types::TypeHint;

mod cmd_export;
mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;
mod logging;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Decode MMKV key/value data files.
#[derive(Parser)]
#[command(name = "mmkv", version, about = "MMKV data file reader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder diagnostics (header clamping, early stops) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print every decoded key/value entry.
    Inspect(InspectArgs),
    /// Check that the whole declared payload decodes.
    Validate(ValidateArgs),
    /// Write the decoded entries as JSON.
    Export(ExportArgs),
    /// Print entry counts and byte totals per detected type.
    Stats(StatsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Input options shared by every command.
///
/// ```text
/// ┌──────────┬──────────────────────────────────────────────────────────┐
/// │ Flag     │ Effect                                                   │
/// ├──────────┼──────────────────────────────────────────────────────────┤
/// │ --crc    │ Companion checksum file (accepted, not verified)         │
/// │ --type   │ auto (default) | string | int32 | int64 | float |        │
/// │          │ double | bool | bytes                                    │
/// └──────────┴──────────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InputArgs {
    /// Path to the MMKV data file.
    pub file: PathBuf,

    /// Path to the companion `.crc` file.
    #[arg(long)]
    pub crc: Option<PathBuf>,

    /// Render every value as this type instead of auto-detecting.
    #[arg(long = "type", default_value_t = TypeHint::Auto)]
    pub type_hint: TypeHint,
}

/// Arguments for `mmkv inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Show only the entry at this zero-based index.
    #[arg(long)]
    pub entry: Option<usize>,

    /// Show which auto-detection rule claimed each value (`--type auto` only).
    #[arg(long)]
    pub show_rule: bool,
}

/// Arguments for `mmkv validate`.
///
/// Succeeds only when the scan reaches the end of the declared payload.
/// Values that fall back to hex do not count as failures.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the MMKV data file.
    pub file: PathBuf,

    /// Path to the companion `.crc` file.
    #[arg(long)]
    pub crc: Option<PathBuf>,
}

/// Arguments for `mmkv export`.
#[derive(clap::Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `mmkv stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Export(args) => cmd_export::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
