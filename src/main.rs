//! Variant JSON CLI.
//!
//! Reads a JSON document from stdin and either reformats it or checks it.

use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use variant_json::json::options::DEFAULT_MAX_NESTING_DEPTH;
use variant_json::json::{parse_json_with, to_json_with, try_parse_json, ParseOptions, Style};

#[derive(Parser)]
#[command(name = "varjson")]
#[command(about = "Reformat and check JSON through Variant trees", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Parse stdin leniently and write it back as JSON
    Fmt {
        /// Tab-indented multi-line output
        #[arg(long)]
        pretty: bool,

        /// Accept // and /* */ comments
        #[arg(long)]
        comments: bool,
    },

    /// Parse stdin strictly and report the first problem
    Check {
        /// Accept // and /* */ comments
        #[arg(long)]
        comments: bool,

        /// Maximum object/array nesting
        #[arg(long, default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
        max_depth: u64,
    },
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn read_stdin() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

/// Read stdin and hand it to `run`, exiting with 2 when stdin is unreadable.
fn with_stdin(run: impl FnOnce(&str) -> ExitCode) -> ExitCode {
    match read_stdin() {
        Ok(input) => run(&input),
        Err(e) => {
            eprintln!("failed to read stdin: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run_fmt(input: &str, pretty: bool, comments: bool) -> ExitCode {
    let options = ParseOptions {
        allow_comments: comments,
        ..ParseOptions::standard()
    };
    let root = parse_json_with(input, &options);
    let style = if pretty { Style::Pretty } else { Style::Compact };
    println!("{}", to_json_with(&root, style));
    ExitCode::SUCCESS
}

fn run_check(input: &str, comments: bool, max_depth: u64) -> ExitCode {
    let options = ParseOptions {
        allow_comments: comments,
        max_nesting_depth: max_depth,
    };
    match try_parse_json(input, &options) {
        Ok(root) => {
            debug!("root object has {} keys", root.len());
            println!("ok");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("error {} {}: {}", e.code(), e.name(), e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Version) => {
            println!("varjson v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(Commands::Fmt { pretty, comments }) => {
            with_stdin(|input| run_fmt(input, pretty, comments))
        }
        Some(Commands::Check {
            comments,
            max_depth,
        }) => with_stdin(|input| run_check(input, comments, max_depth)),
        None => {
            println!("varjson v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}
