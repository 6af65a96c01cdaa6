//! Command-line interface for Gudrun input files
//! This binary inspects, checks and converts Gudrun input files, and prepares the copies Gudrun runs on.
//!
//! Usage:
//!   gudrun inspect `<path>` [--template]                 - Print the record tree
//!   gudrun convert `<path>` [--to `<format>`] [-o `<out>`]  - Convert between txt, yaml and json
//!   gudrun check `<path>`                                - Report missing data files and result files
//!   gudrun prepare `<path>` [--dir `<dir>`]                - Write the processing copy and per-sample files
//!   gudrun formats                                     - List available formats
//!
//! Global options: `--config <file>` layers a TOML file over the built-in defaults (otherwise
//! `gudrun.toml` in the working directory is used when present); `-v` raises the log level.

mod commands;

use clap::{Arg, ArgAction, ArgMatches, Command};
use gudrun_config::{GudrunConfig, Loader};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = cli().get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(2);
    });
    init_logging(&config.logging.level, matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("inspect", sub)) => commands::inspect(&config, path_arg(sub)),
        Some(("convert", sub)) => commands::convert(
            &config,
            path_arg(sub),
            sub.get_one::<String>("to").map(String::as_str),
            sub.get_one::<String>("output").map(String::as_str),
        ),
        Some(("check", sub)) => commands::check(&config, path_arg(sub)),
        Some(("prepare", sub)) => commands::prepare(
            &config,
            path_arg(sub),
            sub.get_one::<String>("dir").map(String::as_str),
        ),
        Some(("formats", _)) => commands::formats(),
        _ => unreachable!("clap requires a subcommand"),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn cli() -> Command {
    let path = Arg::new("path")
        .help("Path to the Gudrun input file")
        .required(true)
        .index(1);

    Command::new("gudrun")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and converting Gudrun input files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (-v debug, -vv trace); RUST_LOG applies otherwise"),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the record tree of a file")
                .arg(path.clone())
                .arg(
                    Arg::new("template")
                        .long("template")
                        .action(ArgAction::SetTrue)
                        .help("Read an instrument template; Beam and Normalisation may be absent"),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a file to another format")
                .arg(path.clone())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .short('t')
                        .help("Target format (default: output.format from the configuration)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report missing data files and the result files each sample produces")
                .arg(path.clone()),
        )
        .subcommand(
            Command::new("prepare")
                .about("Write the processing copy and one parameter file per running sample")
                .arg(path)
                .arg(
                    Arg::new("dir")
                        .long("dir")
                        .short('d')
                        .help("Output directory (default: the input file's directory)"),
                ),
        )
        .subcommand(Command::new("formats").about("List available formats"))
}

fn path_arg(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default()
}

fn load_config(matches: &ArgMatches) -> Result<GudrunConfig, gudrun_config::ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("gudrun.toml"),
    };
    if let Some(("inspect", sub)) = matches.subcommand() {
        if sub.get_flag("template") {
            loader = loader.set_override("parsing.template", true)?;
        }
    }
    loader.build()
}

fn init_logging(level: &str, verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
