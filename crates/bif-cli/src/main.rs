/// BI format command-line tool: decode, validate, inspect, encode, and
/// watch `.bif` buffers.
///
/// # Command overview
///
/// ```text
/// bif <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Decode a buffer and print its fields
///   validate   Check a buffer for structural correctness
///   inspect    Step through a parse one field at a time
///   encode     Create a buffer from a JSON manifest
///   watch      Run the incremental driver and print every status change
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Raise log level (-v debug, -vv trace); logs go to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                   |
/// |------|-------------------------------------------|
/// | 0    | Success                                   |
/// | 1    | Error (I/O failure, malformed input, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::io;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;
mod cmd_validate;
mod cmd_watch;
mod input;
mod manifest;

use input::InputArgs;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The BI format command-line tool.
#[derive(Parser)]
#[command(name = "bif", version, about = "BI format CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise the log level. Repeat for more detail.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode a buffer and print its fields.
    Decode(DecodeArgs),
    /// Check a buffer for structural correctness.
    Validate(ValidateArgs),
    /// Step through a parse one field at a time.
    Inspect(InspectArgs),
    /// Create a buffer from a JSON manifest.
    Encode(EncodeArgs),
    /// Run the incremental driver and print every status change.
    Watch(WatchArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `bif decode`.
///
/// ```text
/// ┌───────────────┬───────────────────────────────────────────────────────┐
/// │ Flag          │ Values / default                                      │
/// ├───────────────┼───────────────────────────────────────────────────────┤
/// │ --mode        │ complete | cooperative | incremental (default)        │
/// │ --tick-ms     │ incremental tick period in ms (0 = yield, default)    │
/// │ --json        │ print the record as a JSON object                     │
/// │ -o / --output │ write to file instead of stdout                       │
/// └───────────────┴───────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Driver: `complete`, `cooperative`, or `incremental`.
    #[arg(long, default_value = "incremental")]
    pub mode: String,

    /// Milliseconds between incremental steps. 0 yields between steps
    /// instead of sleeping.
    #[arg(long, default_value_t = 0)]
    pub tick_ms: u64,

    /// Print the record as JSON instead of `name: value` lines.
    #[arg(long)]
    pub json: bool,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `bif validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for `bif inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Include a 16-byte-per-line hex dump of each blob body.
    #[arg(long)]
    pub show_hex: bool,
}

/// Arguments for `bif encode`.
///
/// See [`cmd_encode`] for the manifest format.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Path to the JSON manifest describing the fields to encode.
    pub input: PathBuf,

    /// Output file path.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for `bif watch`.
#[derive(clap::Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Milliseconds between steps. 0 yields between steps instead.
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    /// Cancel the parse after this many steps.
    #[arg(long)]
    pub cancel_after: Option<usize>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Watch(args) => cmd_watch::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Single-threaded runtime for the async drivers.
fn runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
