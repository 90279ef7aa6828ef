mod debug_report;

use liftparse::catalog::load_json_file;
use liftparse::table::render_tsv;
use liftparse::{InterpretError, Keying, MatchConfig, Options, Response, Scorer, interpret_verbose_with};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Table,
    Report,
}

struct CliConfig {
    input: String,
    catalog: PathBuf,
    format: Format,
    options: Options,
    color: bool,
}

fn main() {
    init_tracing();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let catalog = match load_json_file(&config.catalog) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("error: {}: {err}", config.catalog.display());
            std::process::exit(2);
        }
    };

    let result = interpret_verbose_with(&config.input, &catalog, &config.options);
    let exit_code = match &result {
        Ok(_) => 0,
        Err(InterpretError::Internal) => 1,
        Err(InterpretError::EmptyInput) => 2,
    };

    match (config.format, result) {
        (Format::Report, Ok(out)) => debug_report::print_run(&config.input, &out, config.color),
        (Format::Table, Ok(out)) => print!("{}", render_tsv(&out.data.to_rows())),
        (_, result) => {
            let response = Response::from_result(result.map(|out| out.data));
            match serde_json::to_string_pretty(&response) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: failed to serialize output: {err}");
                    std::process::exit(1);
                }
            }
        }
    }

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry().with(filter).with(fmt::layer().compact().with_writer(io::stderr)).init();
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut catalog: Option<PathBuf> = None;
    let mut format = Format::Json;
    let mut keying = Keying::Occurrence;
    let mut scorer = Scorer::Gestalt;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("liftparse {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--catalog" | "-c" => {
                let value = args.next().ok_or_else(|| "error: --catalog expects a value".to_string())?;
                catalog = Some(PathBuf::from(value));
            }
            "--format" | "-f" => {
                let value = args.next().ok_or_else(|| "error: --format expects a value".to_string())?;
                format = parse_format(&value)?;
            }
            "--key-by" => {
                let value = args.next().ok_or_else(|| "error: --key-by expects a value".to_string())?;
                keying = parse_keying(&value)?;
            }
            "--scorer" => {
                let value = args.next().ok_or_else(|| "error: --scorer expects a value".to_string())?;
                scorer = parse_scorer(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--catalog=") => {
                catalog = Some(PathBuf::from(arg.trim_start_matches("--catalog=")));
            }
            _ if arg.starts_with("--format=") => format = parse_format(arg.trim_start_matches("--format="))?,
            _ if arg.starts_with("--key-by=") => keying = parse_keying(arg.trim_start_matches("--key-by="))?,
            _ if arg.starts_with("--scorer=") => scorer = parse_scorer(arg.trim_start_matches("--scorer="))?,
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let catalog = catalog.ok_or_else(|| format!("error: --catalog is required\n\n{}", help_text()))?;

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    // In json mode empty input is reported through the response envelope.
    if input.trim().is_empty() && format != Format::Json {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    let options = Options { matching: MatchConfig { scorer, ..MatchConfig::default() }, keying };
    Ok(CliConfig { input, catalog, format, options, color })
}

fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    // Shells hand over "\n" literally; prompts are line oriented.
    *input = Some(value.replace("\\n", "\n"));
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_format(value: &str) -> Result<Format, String> {
    match value {
        "json" => Ok(Format::Json),
        "table" => Ok(Format::Table),
        "report" => Ok(Format::Report),
        _ => Err(format!("error: invalid --format '{value}' (expected json, table or report)")),
    }
}

fn parse_keying(value: &str) -> Result<Keying, String> {
    match value {
        "occurrence" => Ok(Keying::Occurrence),
        "name" => Ok(Keying::RawName),
        _ => Err(format!("error: invalid --key-by '{value}' (expected occurrence or name)")),
    }
}

fn parse_scorer(value: &str) -> Result<Scorer, String> {
    match value {
        "gestalt" => Ok(Scorer::Gestalt),
        "jaro-winkler" => Ok(Scorer::JaroWinkler),
        "levenshtein" => Ok(Scorer::NormalizedLevenshtein),
        _ => Err(format!("error: invalid --scorer '{value}' (expected gestalt, jaro-winkler or levenshtein)")),
    }
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "liftparse {version}

Workout log parser CLI.

Usage:
  liftparse --catalog <file.json> [OPTIONS] [--] <input...>
  liftparse --catalog <file.json> [OPTIONS] --input <text>

Options:
  -c, --catalog <file>       JSON array of {{id, name, alias_1, alias_2}} entries.
  -i, --input <text>         Workout text. A literal \\n separates lines. If
                             omitted, reads remaining args or stdin.
  -f, --format <format>      json (default), table or report.
  --key-by <keying>          occurrence (default) or name.
  --scorer <scorer>          gestalt (default), jaro-winkler or levenshtein.
  --color                    Force ANSI color output (report format).
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter for stderr diagnostics. Default: {log}

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments, unreadable catalog or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log = DEFAULT_LOG_FILTER
    )
}
