//! gamma-cut - CLI tool to convert cutting lists to GAMMA command files.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use gamma_core::config::{FAULT_LOG_FILE, INPUT_FILE_NAME, OUTPUT_EXTENSION, SHEET_NAME};
use gamma_core::pipeline::build_record;
use gamma_core::report::{fault_notice, render_banner, saved_message};
use gamma_core::{
    load_worksheet, validate_collection, write_command_file, CutListError, EncoderOptions,
    FixedWidthEncoder, LineEnding, PieceRecord, PieceRow, Pipeline, PrefixPlacement,
    RowCollection, RowFault, SheetLayout, Summary,
};

/// Convert cutting lists to command files for GAMMA angle-cutting machines.
#[derive(Parser, Debug)]
#[command(name = "gamma-cut")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file base name (".txt" is appended); prompted for when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Cutting-list workbook [default: CUTTING_LIST_FOR_GAMMA.xlsx next to the executable]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Worksheet holding the cutting list
    #[arg(long, default_value = SHEET_NAME)]
    sheet: String,

    /// Write field prefixes ahead of the padded field instead of inside its width
    #[arg(long)]
    legacy_prefixes: bool,

    /// Terminate lines with CRLF
    #[arg(long)]
    crlf: bool,

    /// Validate only, don't generate output
    #[arg(long)]
    validate: bool,

    /// Output extracted rows and records as JSON
    #[arg(long)]
    debug: bool,

    /// Exit without waiting for Enter
    #[arg(long)]
    no_pause: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn encoder_options(&self) -> EncoderOptions {
        EncoderOptions {
            prefix_placement: if self.legacy_prefixes {
                PrefixPlacement::BeforeField
            } else {
                PrefixPlacement::WithinWidth
            },
            line_ending: if self.crlf {
                LineEnding::CrLf
            } else {
                LineEnding::Lf
            },
        }
    }
}

/// Rows and records dumped by `--debug`.
#[derive(Serialize)]
struct DebugDump<'a> {
    rows: &'a [PieceRow],
    records: Vec<PieceRecord>,
    faults: Vec<RowFault>,
}

impl<'a> DebugDump<'a> {
    /// Build every extracted row; rows that fail join the extraction faults.
    fn new(collection: &'a RowCollection) -> Self {
        let mut records = Vec::with_capacity(collection.rows.len());
        let mut faults = collection.faults.clone();

        for row in &collection.rows {
            match build_record(row) {
                Ok(record) => records.push(record),
                Err(err) => faults.push(RowFault::new(row.column_group, row.row, &err)),
            }
        }

        Self {
            rows: &collection.rows,
            records,
            faults,
        }
    }
}

/// Fault log file, created on the first write.
struct LazyFile {
    path: PathBuf,
    file: Option<File>,
}

impl LazyFile {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }
}

impl Write for LazyFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let file = match self.file.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?,
        };
        self.file.insert(file).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.file {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose);

    print!("{}", render_banner(80));

    let code = match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("An error occurred: {:?}", err);
            println!("{}", user_message(&err));
            ExitCode::FAILURE
        }
    };

    if !args.no_pause {
        pause();
    }

    code
}

/// Console logging on stderr plus the persistent fault log.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(filter);

    let fault_log = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(LazyFile::new(FAULT_LOG_FILE)))
        .with_filter(LevelFilter::ERROR);

    tracing_subscriber::registry()
        .with(console)
        .with(fault_log)
        .init();
}

fn run(args: &Args) -> Result<ExitCode> {
    let input = match &args.input {
        Some(path) => path.clone(),
        None => default_input_path()?,
    };
    let pipeline = Pipeline::new(
        SheetLayout::default(),
        FixedWidthEncoder::new(args.encoder_options()),
    );

    if args.debug || args.validate {
        let grid = load_worksheet(&input, &args.sheet)?;
        let collection = pipeline.collect_rows(&grid)?;

        if args.debug {
            let dump = DebugDump::new(&collection);
            println!("{}", serde_json::to_string_pretty(&dump)?);
            return Ok(ExitCode::SUCCESS);
        }

        let validation = validate_collection(&collection, pipeline.encoder());
        for warning in &validation.warnings {
            warn!("{}", warning);
        }
        for err in &validation.errors {
            error!("{}", err);
        }

        if !validation.passed {
            error!("Validation failed");
            return Ok(ExitCode::FAILURE);
        }
        info!("Validation passed");
        return Ok(ExitCode::SUCCESS);
    }

    let base_name = match &args.output {
        Some(name) => name.clone(),
        None => prompt("Save file as: ")?,
    };
    if base_name.trim().is_empty() {
        anyhow::bail!("No output file name given");
    }
    let file_name = output_file_name(&base_name);

    info!("Processing: {}", input.display());

    let grid = load_worksheet(&input, &args.sheet)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let output = pipeline.run(&grid)?;

    // Faults are already in the log at this point
    for _ in &output.faults {
        println!("{}", fault_notice());
    }

    print!("{}", Summary::from(&output).render());

    write_command_file(Path::new(&file_name), &output.output)
        .with_context(|| format!("Failed to write {}", file_name))?;

    println!("{}", saved_message(&file_name));
    info!("Generated: {} ({} line(s))", file_name, output.line_count);

    Ok(ExitCode::SUCCESS)
}

/// Cutting list expected next to the running executable.
fn default_input_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Cannot locate the running executable")?;
    let dir = exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(dir.join(INPUT_FILE_NAME))
}

fn output_file_name(base_name: &str) -> String {
    format!("{}.{}", base_name, OUTPUT_EXTENSION)
}

/// Message shown to the operator for a run-level failure.
fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<CutListError>() {
        Some(CutListError::MissingInput { path }) => {
            format!("File not found: {}", path.display())
        }
        Some(e @ (CutListError::Workbook { .. } | CutListError::EmptyCutList)) => {
            format!("Value error: {}", e)
        }
        _ => "An unexpected error occurred.".to_string(),
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn pause() {
    print!("Press Enter to exit");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
