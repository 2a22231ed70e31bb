//! Command-line interface for puddlejumper
//! This binary parses puddlejumper files and renders them in different formats.
//!
//! Usage:
//!   puddlejumper execute `<path>` [--format `<format>`]  - Parse a file and print it in a format
//!   puddlejumper check `<paths>...`                      - Parse many files and report errors
//!   puddlejumper list-formats                           - List all available formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use puddlejumper::puddlejumper::config::{Loader, PuddlejumperConfig};
use puddlejumper::puddlejumper::parse;
use puddlejumper::puddlejumper::processor::{available_formats, process_file, ProcessingSpec};
use tokio::task::JoinSet;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Looked up in the working directory when no `--config` is given
const LOCAL_CONFIG: &str = "puddlejumper.toml";

fn main() {
    let matches = Command::new("puddlejumper")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and rendering puddlejumper outlines")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("tab-width")
                .long("tab-width")
                .global(true)
                .value_parser(clap::value_parser!(u32).range(1..))
                .help("Columns a tab counts for when measuring indentation"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("execute")
                .about("Parse a file and print it in the given format")
                .arg(
                    Arg::new("path")
                        .help("Path to the puddlejumper file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'ast-treeviz', 'ast-json', 'token-simple')")
                        .default_value("ast-treeviz"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse files concurrently and report the first error in each")
                .arg(
                    Arg::new("paths")
                        .help("Paths to puddlejumper files")
                        .required(true)
                        .num_args(1..),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    match matches.subcommand() {
        Some(("execute", execute_matches)) => {
            let path = required(execute_matches, "path");
            let format = required(execute_matches, "format");
            handle_execute_command(path, format, &config);
        }
        Some(("check", check_matches)) => {
            let paths: Vec<String> = check_matches
                .get_many::<String>("paths")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            handle_check_command(paths, config);
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => unreachable!(),
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_else(|| {
            eprintln!("Missing argument: {}", id);
            std::process::exit(2);
        })
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<PuddlejumperConfig, config::ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    if let Some(tab_width) = matches.get_one::<u32>("tab-width") {
        loader = loader.with_tab_width(*tab_width)?;
    }
    let config = loader.build()?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// Handle the execute command
fn handle_execute_command(path: &str, format: &str, config: &PuddlejumperConfig) {
    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| {
        eprintln!("{}", e);
        eprintln!("Run `puddlejumper list-formats` to see the available formats");
        std::process::exit(1);
    });

    let output = process_file(path, &spec, config).unwrap_or_else(|e| {
        eprintln!("{}: {}", path, e);
        std::process::exit(1);
    });

    print!("{}", output);
}

/// Handle the check command
///
/// Every file is parsed on its own blocking task; results are reported in the
/// order the paths were given.
fn handle_check_command(paths: Vec<String>, config: PuddlejumperConfig) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Failed to start runtime: {}", e);
            std::process::exit(1);
        });

    let (mut results, lost) = runtime.block_on(async move {
        let mut tasks = JoinSet::new();
        for (index, path) in paths.into_iter().enumerate() {
            let parser_config = config.parser;
            tasks.spawn_blocking(move || {
                let outcome = std::fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|source| {
                        parse(&source, &parser_config)
                            .map(|_| ())
                            .map_err(|e| e.to_string())
                    });
                (index, path, outcome)
            });
        }

        let mut results: Vec<(usize, String, Result<(), String>)> = Vec::new();
        let mut lost = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    lost += 1;
                    tracing::error!(error = %e, "check task failed");
                }
            }
        }
        (results, lost)
    });
    results.sort_by_key(|(index, _, _)| *index);

    let mut failed = lost;
    for (_, path, outcome) in &results {
        match outcome {
            Ok(()) => println!("{}: ok", path),
            Err(e) => {
                failed += 1;
                eprintln!("{}: {}", path, e);
            }
        }
    }
    tracing::debug!(files = results.len(), failed, "check finished");

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
