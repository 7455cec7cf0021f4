//! Vantage: inventory view toolkit
//!
//! Usage: vantage <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use serde_json::Value;
use vantage_inventory::column::ColumnSchema;
use vantage_inventory::encode::{encode, RenderFormat};
use vantage_inventory::generate::{RecordGenerator, RecordKind};
use vantage_inventory::range;
use vantage_inventory::record::{self, Record, RecordError};
use vantage_inventory::view::{SortDirection, SortDirective, TableView};

#[derive(Parser)]
#[command(name = "vantage")]
#[command(version)]
#[command(about = "Vantage: inventory view toolkit - type-aware table views, YAML rendering, and CPU-range allocation", long_about = None)]
struct Cli {
    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort a JSON record collection
    View {
        /// Input JSON file with an array of records (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Case-insensitive substring filter
        #[arg(short, long)]
        query: Option<String>,

        /// Column index to sort by
        #[arg(short = 'c', long)]
        sort_col: Option<usize>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Built-in column schema (compute-units or servers)
        #[arg(long, default_value = "compute-units")]
        schema: String,

        /// Column schema JSON file (overrides --schema)
        #[arg(long)]
        columns: Option<PathBuf>,

        /// Output format (json or yaml)
        #[arg(short = 'f', long, default_value = "json")]
        format: String,

        /// Print view statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Render a JSON document for human inspection
    Encode {
        /// Input JSON file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format (yaml or json)
        #[arg(short = 'f', long, default_value = "yaml")]
        format: String,
    },

    /// Partition [0, end] into fixed-size CPU ranges
    Chunk {
        /// Highest id in the range (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        end: i64,

        /// Ids per chunk
        #[arg(long, allow_negative_numbers = true)]
        step: i64,
    },

    /// Expand range tokens into a sorted id set
    Expand {
        /// Range tokens of the form start-end
        tokens: Vec<String>,
    },

    /// Generate synthetic inventory records
    Generate {
        /// Number of records
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// RNG seed for reproducibility
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Record kind (compute-units or servers)
        #[arg(long, default_value = "compute-units")]
        kind: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Configure thread pool if --threads specified
    if let Some(n) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .expect("Failed to initialize thread pool");
    }

    let result = match cli.command {
        Commands::View {
            input,
            query,
            sort_col,
            desc,
            schema,
            columns,
            format,
            stats,
        } => run_view(input, query, sort_col, desc, schema, columns, format, stats),

        Commands::Encode { input, format } => run_encode(input, format),

        Commands::Chunk { end, step } => run_chunk(end, step),

        Commands::Expand { tokens } => run_expand(tokens),

        Commands::Generate { count, seed, kind } => run_generate(count, seed, kind),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Read records from a file path, or stdin for `-`/no input.
fn load_records(input: Option<PathBuf>) -> Result<Vec<Record>, RecordError> {
    match input {
        Some(path) if path.as_os_str() != "-" => record::read_records(path),
        _ => record::read_records_from(io::stdin().lock()),
    }
}

fn load_value(input: Option<PathBuf>) -> Result<Value, RecordError> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let file = std::fs::File::open(path)?;
            Ok(serde_json::from_reader(io::BufReader::new(file))?)
        }
        _ => Ok(serde_json::from_reader(io::stdin().lock())?),
    }
}

fn parse_format(name: &str) -> Result<RenderFormat, RecordError> {
    RenderFormat::from_str(name).ok_or_else(|| {
        RecordError::InvalidFormat(format!("Invalid format '{}'. Use: yaml, json", name))
    })
}

fn builtin_schema(name: &str) -> Result<ColumnSchema, RecordError> {
    match name {
        "compute-units" | "compute_units" => Ok(ColumnSchema::compute_units()),
        "servers" => Ok(ColumnSchema::servers()),
        _ => Err(RecordError::InvalidFormat(format!(
            "Unknown schema '{}'. Use: compute-units, servers",
            name
        ))),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_view(
    input: Option<PathBuf>,
    query: Option<String>,
    sort_col: Option<usize>,
    desc: bool,
    schema: String,
    columns: Option<PathBuf>,
    format: String,
    stats: bool,
) -> Result<(), RecordError> {
    let format = parse_format(&format)?;
    let schema = match columns {
        Some(path) => ColumnSchema::from_file(path)?,
        None => builtin_schema(&schema)?,
    };

    let records = load_records(input)?;

    let mut sort = SortDirective::none();
    if let Some(column) = sort_col {
        sort.column = Some(column);
        sort.direction = if desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
    }

    let view = TableView::new()
        .with_query(query.unwrap_or_default())
        .with_sort(sort);

    let started = Instant::now();
    let rows = view.apply(&records, &schema);
    if stats {
        eprintln!(
            "View stats: {} of {} records in {:.2?}",
            rows.len(),
            records.len(),
            started.elapsed()
        );
    }

    let document = Value::Array(rows.into_iter().map(Value::Object).collect());
    println!("{}", encode(&document, format));
    Ok(())
}

fn run_encode(input: Option<PathBuf>, format: String) -> Result<(), RecordError> {
    let format = parse_format(&format)?;
    let value = load_value(input)?;
    println!("{}", encode(&value, format));
    Ok(())
}

fn run_chunk(end: i64, step: i64) -> Result<(), RecordError> {
    let tokens =
        range::chunk(end, step).map_err(|e| RecordError::InvalidFormat(e.to_string()))?;
    println!(
        "{}",
        serde_json::to_string(&tokens).expect("JSON string serialization does not fail")
    );
    Ok(())
}

fn run_expand(tokens: Vec<String>) -> Result<(), RecordError> {
    let ids = range::expand(&tokens);
    let rendered: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    println!("{}", rendered.join(", "));
    eprintln!("count: {}", ids.len());
    Ok(())
}

fn run_generate(count: usize, seed: u64, kind: String) -> Result<(), RecordError> {
    let kind = RecordKind::from_str(&kind).ok_or_else(|| {
        RecordError::InvalidFormat(format!(
            "Invalid kind '{}'. Use: compute-units, servers",
            kind
        ))
    })?;

    let mut generator = RecordGenerator::from_seed(seed);
    let records = generator.records(kind, count);
    let document = Value::Array(records.into_iter().map(Value::Object).collect());
    println!("{}", encode(&document, RenderFormat::Json));
    Ok(())
}
