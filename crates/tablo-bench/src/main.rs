use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use tablo_core::{
    add_constraints, add_variables_from_frame, read_var_attr, AttrSpec, ConstrSense, ModelSink,
    VarAttr, VarSpec,
};
use tablo_data::{Frame, Index};
use tablo_mem::MemModel;

const DEFAULT_CASES: [usize; 4] = [100, 1_000, 10_000, 100_000];
const SCHEMA_VERSION: u32 = 1;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Tablo benchmark runner and reporting interface"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute benchmark cases and save JSONL artifacts
    Run(RunArgs),
    /// Render benchmark artifact summaries
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Comma-separated list of row counts
    #[arg(long, value_delimiter = ',')]
    cases: Option<Vec<usize>>,

    /// Number of repetitions per case
    #[arg(long, default_value_t = 1)]
    repetitions: u32,

    /// JSONL output artifact path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Input JSONL benchmark artifact
    #[arg(long)]
    input: PathBuf,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CaseRecord {
    schema_version: u32,
    timestamp_s: u64,
    rows: usize,
    repetition: u32,
    build_ms: f64,
    create_ms: f64,
    read_ms: f64,
    total_ms: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run_command(args),
        Command::Report(args) => report_command(args),
    }
}

fn run_command(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.repetitions == 0 {
        return Err(boxed_input_error("repetitions must be greater than zero"));
    }

    let cases = args.cases.unwrap_or_else(|| DEFAULT_CASES.to_vec());
    let mut records = Vec::new();

    for rows in cases {
        for repetition in 0..args.repetitions {
            let record = run_case(rows, repetition)?;
            records.push(record);
        }
    }

    if let Some(path) = &args.output {
        write_jsonl(path, &records)?;
    }
    render(&records, args.format)?;
    Ok(())
}

/// One benchmark case: build a frame, create one variable and one
/// constraint per row through the bridge, commit, and read bounds back.
fn run_case(rows: usize, repetition: u32) -> Result<CaseRecord, Box<dyn std::error::Error>> {
    let total_started = Instant::now();

    let started = Instant::now();
    let index = Index::range(rows);
    let lo: Vec<f64> = (0..rows).map(|i| i as f64).collect();
    let hi: Vec<f64> = (0..rows).map(|i| (i + rows) as f64).collect();
    let frame = Frame::new(index.clone())
        .with_column("lo", lo)?
        .with_column("hi", hi)?;
    let build_ms = started.elapsed().as_secs_f64() * 1000.0;

    let started = Instant::now();
    let mut model = MemModel::new();
    let spec = VarSpec::named("x")
        .with_lb(AttrSpec::column("lo"))
        .with_ub(AttrSpec::column("hi"));
    let result = add_variables_from_frame(&mut model, &frame, &spec)?;
    let lhs = frame.column("lo")?;
    add_constraints(
        &mut model,
        &lhs.into(),
        &ConstrSense::LessEqual.into(),
        &(rows as f64).into(),
        Some("cap"),
    )?;
    model.commit();
    let create_ms = started.elapsed().as_secs_f64() * 1000.0;

    let started = Instant::now();
    let handles = result.column("x")?;
    let lb = read_var_attr(&model, &handles, VarAttr::LowerBound)?;
    if lb.len() != rows {
        return Err(boxed_input_error("bound read returned a short series"));
    }
    let read_ms = started.elapsed().as_secs_f64() * 1000.0;

    let record = CaseRecord {
        schema_version: SCHEMA_VERSION,
        timestamp_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
        rows,
        repetition,
        build_ms,
        create_ms,
        read_ms,
        total_ms: total_started.elapsed().as_secs_f64() * 1000.0,
    };
    tracing::debug!(
        component = "bench",
        operation = "run_case",
        status = "success",
        rows = rows,
        total_ms = record.total_ms,
        "Completed benchmark case"
    );
    Ok(record)
}

fn write_jsonl(path: &Path, records: &[CaseRecord]) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn read_jsonl(path: &Path) -> Result<Vec<CaseRecord>, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str::<CaseRecord>(&line)?);
    }
    Ok(records)
}

fn report_command(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let records = read_jsonl(&args.input)?;
    render(&records, args.format)?;
    Ok(())
}

fn render(records: &[CaseRecord], format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            for record in records {
                println!("{}", serde_json::to_string(record)?);
            }
        }
        OutputFormat::Table => {
            println!(
                "{:>10} {:>5} {:>12} {:>12} {:>12} {:>12}",
                "rows", "rep", "build_ms", "create_ms", "read_ms", "total_ms"
            );
            for r in records {
                println!(
                    "{:>10} {:>5} {:>12.3} {:>12.3} {:>12.3} {:>12.3}",
                    r.rows, r.repetition, r.build_ms, r.create_ms, r.read_ms, r.total_ms
                );
            }
        }
    }
    Ok(())
}

fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}
