use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;

use jsonquery::config::Config;
use jsonquery::document::Value;
use jsonquery::file::loader::load_document;
use jsonquery::filter::filter_selection;
use jsonquery::output::{format_output, OutputFormat};
use jsonquery::search::search;
use jsonquery::stats::compute_stats;
use jsonquery::{evaluate_path, parse_filter, parse_path};

const EXAMPLES: &str = "\
Examples:
  # Query path
  jsonquery data.json users[0].name
  jsonquery data.json 'items[*].price'

  # Filter
  jsonquery data.json users --filter 'age > 25'
  jsonquery data.json items --filter 'active == true'

  # Search
  jsonquery data.json --search '@example.com'

  # Statistics
  jsonquery data.json 'items[*].price' --stats

  # Output formats
  jsonquery data.json users --format csv
  jsonquery data.json data --format keys

  # From stdin
  cat data.json | jsonquery - users[0]

  # Version (-v raises log verbosity)
  jsonquery --version";

/// JSONQuery - query JSON and YAML documents
#[derive(Parser)]
#[command(name = "jsonquery")]
#[command(version)]
#[command(about = "Query JSON and YAML documents with a compact path syntax", long_about = None)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// JSON/YAML file, or - for stdin
    file: String,

    /// Query path (e.g. users[0].name); empty selects the whole document
    #[arg(default_value = "")]
    query: String,

    /// Filter expression (e.g. 'age > 25')
    #[arg(short, long)]
    filter: Option<String>,

    /// Search string values with a regex and print their paths
    #[arg(short, long)]
    search: Option<String>,

    /// Case-sensitive search
    #[arg(long)]
    case_sensitive: bool,

    /// Print count/sum/avg/min/max of the numbers in the result
    #[arg(long)]
    stats: bool,

    /// Output format (default: json, or the config file's choice)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Disable pretty printing
    #[arg(long)]
    no_pretty: bool,

    /// Parse input as YAML regardless of file name
    #[arg(long)]
    yaml: bool,

    /// Increase log verbosity (-v, -vv, -vvv); the version is -V/--version
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new().filter_level(log_level).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = Config::load();
    let format = cli.format.unwrap_or(config.format);
    let pretty = config.pretty && !cli.no_pretty;
    let case_sensitive = cli.case_sensitive || config.case_sensitive_search;

    let doc = load_document(&cli.file, cli.yaml)?;

    let path = parse_path(&cli.query).context("Query error")?;
    let mut selection = evaluate_path(&doc, &path).context("Query error")?;
    if selection.is_empty() {
        eprintln!("No results found");
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(expression) = &cli.filter {
        let predicate = parse_filter(expression).context("Filter error")?;
        match filter_selection(&selection, &predicate) {
            Some(kept) if !kept.is_empty() => selection = kept,
            _ => {
                eprintln!("No results match filter");
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let result = selection.to_value();
    let mut stdout = io::stdout().lock();

    if let Some(pattern) = &cli.search {
        let hits = search(&result, pattern, case_sensitive).context("Search error")?;
        if hits.is_empty() {
            eprintln!("No matches found");
            return Ok(ExitCode::SUCCESS);
        }
        for hit in hits {
            writeln!(stdout, "{}: {}", hit.path, hit.text)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    if cli.stats {
        let report = match compute_stats(&result) {
            Some(stats) => stats.to_value(),
            None => {
                let mut entries = indexmap::IndexMap::new();
                entries.insert(
                    "error".to_string(),
                    Value::from("No numeric values found"),
                );
                Value::Object(entries)
            }
        };
        writeln!(stdout, "{}", format_output(&report, OutputFormat::Json, pretty))?;
        return Ok(ExitCode::SUCCESS);
    }

    writeln!(stdout, "{}", format_output(&result, format, pretty))?;
    Ok(ExitCode::SUCCESS)
}
