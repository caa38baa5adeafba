use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use elcon_core::{
    FrameEncoding, FrameError, REFERENCE_FRAME, ValidationError, build_report,
    decode_and_validate, format_packet, layout, read_frame, render_dump,
};
use glob::glob;
use log::{LevelFilter, debug, info, warn};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("ELCON_BUILD_COMMIT"),
    ", ",
    env!("ELCON_BUILD_DATE"),
    ")"
);

/// Exit status for failures of the tool itself (unreadable input, wrong size).
const EXIT_TOOL_ERROR: u8 = 5;

const EXAMPLES: &str = "Examples:\n  elcon dump frame.bin\n  elcon dump capture.hex --json --pretty\n  elcon dump --reference";

#[derive(Parser, Debug)]
#[command(name = "elcon")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode and validate Elcon/TCCH charger Listen packets.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode, validate and dump one Listen packet.
    ///
    /// Exit status: 0 valid, 1 bad start marker, 2 bad type, 3 bad length,
    /// 4 bad checksum, 5 unreadable or wrongly sized input.
    #[command(after_help = EXAMPLES)]
    Dump {
        /// Frame file: raw bytes, or hex text for .hex/.txt files
        #[arg(required_unless_present = "reference")]
        input: Option<PathBuf>,

        /// Dump the built-in reference packet instead of reading a file
        #[arg(long, conflicts_with = "input")]
        reference: bool,

        /// Read the input as hex text regardless of its extension
        #[arg(long, conflicts_with = "binary")]
        hex: bool,

        /// Read the input as raw bytes regardless of its extension
        #[arg(long)]
        binary: bool,

        /// Print a JSON report instead of the text dump
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,

        /// Print nothing; report the result through the exit status only
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Dump {
            input,
            reference,
            hex,
            binary,
            json,
            pretty,
            quiet,
        } => cmd_dump(DumpOptions {
            input,
            reference,
            encoding: forced_encoding(hex, binary),
            json,
            pretty,
            quiet,
        }),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(EXIT_TOOL_ERROR)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

struct DumpOptions {
    input: Option<PathBuf>,
    reference: bool,
    encoding: Option<FrameEncoding>,
    json: bool,
    pretty: bool,
    quiet: bool,
}

fn forced_encoding(hex: bool, binary: bool) -> Option<FrameEncoding> {
    match (hex, binary) {
        (true, _) => Some(FrameEncoding::Hex),
        (_, true) => Some(FrameEncoding::Binary),
        _ => None,
    }
}

fn cmd_dump(opts: DumpOptions) -> Result<u8, CliError> {
    let (label, raw) = if opts.reference {
        ("<reference>".to_string(), REFERENCE_FRAME.to_vec())
    } else {
        let input = opts.input.ok_or_else(|| {
            CliError::new(
                "missing input path",
                Some("pass a frame file or use --reference".to_string()),
            )
        })?;
        let resolved = resolve_input_path(&input)?;
        validate_input_file(&resolved)?;
        let encoding = opts
            .encoding
            .unwrap_or_else(|| FrameEncoding::from_path(&resolved));
        let raw = read_frame(&resolved, encoding)
            .with_context(|| format!("Failed to read frame: {}", resolved.display()))?;
        (resolved.display().to_string(), raw)
    };
    info!("loaded {} bytes from {}", raw.len(), label);

    let outcome = decode_and_validate(&raw);
    if let Err(FrameError::Invalid(ValidationError::InvalidType { actual, .. })) = &outcome {
        if *actual == layout::MASTER_TYPE {
            warn!("type 0x{:02X} is a Master packet; only Listen packets are decoded", actual);
        }
    }

    if opts.json {
        let report = build_report(&label, &raw);
        let json = report
            .to_json(opts.pretty)
            .context("JSON serialization failed")?;
        if !opts.quiet {
            println!("{}", json);
        }
        return Ok(exit_code(&outcome));
    }

    match outcome {
        Ok(packet) => {
            debug!("valid packet: {:?}", packet);
            if !opts.quiet {
                print!("{}", render_dump(&format_packet(&packet)));
            }
            Ok(0)
        }
        Err(FrameError::Invalid(err)) => {
            debug!("validation failed: {:?}", err);
            if !opts.quiet {
                println!("{}", err);
            }
            Ok(validation_exit_code(&err))
        }
        Err(FrameError::Malformed(err)) => Err(CliError::new(
            err.to_string(),
            Some(format!(
                "a Listen packet is exactly {} bytes; use --hex for hex text input",
                layout::FRAME_LEN
            )),
        )),
    }
}

fn exit_code<T>(outcome: &Result<T, FrameError>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(FrameError::Invalid(err)) => validation_exit_code(err),
        Err(FrameError::Malformed(_)) => EXIT_TOOL_ERROR,
    }
}

fn validation_exit_code(err: &ValidationError) -> u8 {
    match err {
        ValidationError::InvalidStartMarker { .. } => 1,
        ValidationError::InvalidType { .. } => 2,
        ValidationError::InvalidLength { .. } => 3,
        ValidationError::InvalidChecksum { .. } => 4,
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a captured frame file, or --reference".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a captured frame file, or --reference".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("each run decodes a single packet; run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
