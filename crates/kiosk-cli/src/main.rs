//! Operator CLI for the kiosk engine. Links the noticeboard demo catalog so
//! every command acts on a real component set.

use clap::{Parser, Subcommand};
use kiosk::{
    build::{BuildError, build},
    core::{dispatch::Dispatcher, input::InputBag, render::RenderedOutput},
    schema::{
        catalog::catalog,
        scan::{ScanError, scan},
    },
};
use kiosk_noticeboard::demo_context;
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

const EXIT_OK: u8 = 0;
const EXIT_VALIDATION: u8 = 1;
const EXIT_EMPTY_CATALOG: u8 = 2;
const EXIT_IO: u8 = 3;

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "kiosk")]
#[command(about = "Operator tool for the kiosk component engine")]
struct Cli {
    /// Component map artifact path
    #[arg(long, env = "KIOSK_MAP", default_value = "kiosk-map.json", global = true)]
    map: PathBuf,

    #[command(subcommand)]
    command: Command,
}

///
/// Command
///

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan the linked catalog and persist the component map
    Build,

    /// Scan the linked catalog without writing anything
    Check,

    /// Print the route table of the persisted component map
    Routes,

    /// Dispatch one route against the demo services and print the output
    Dispatch {
        /// Route key, e.g. board:home
        route: String,

        /// Inputs as key=value pairs; repeat a key for list bindings
        inputs: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let code = match &cli.command {
        Command::Build => cmd_build(&cli.map),
        Command::Check => cmd_check(),
        Command::Routes => cmd_routes(&cli.map),
        Command::Dispatch { route, inputs } => cmd_dispatch(&cli.map, route, inputs),
    };

    ExitCode::from(code)
}

fn cmd_build(path: &Path) -> u8 {
    match build(&catalog(), path) {
        Ok(report) => {
            println!("built component map at '{}'", path.display());
            println!("  components: {}", report.components);
            println!("  routes:     {}", report.routes);
            println!("  bytes:      {}", report.bytes);
            EXIT_OK
        }
        Err(BuildError::Scan(err)) => report_scan_error(&err),
        Err(err) => {
            eprintln!("error: {err}");
            EXIT_IO
        }
    }
}

fn cmd_check() -> u8 {
    match scan(&catalog()) {
        Ok(map) => {
            println!("catalog is valid: {} routes", map.route_count());
            EXIT_OK
        }
        Err(err) => report_scan_error(&err),
    }
}

fn report_scan_error(err: &ScanError) -> u8 {
    match err {
        ScanError::EmptyCatalog => {
            eprintln!("error: {err}");
            EXIT_EMPTY_CATALOG
        }
        ScanError::Validation(tree) => {
            eprintln!("catalog validation failed:");
            eprintln!("{tree}");
            EXIT_VALIDATION
        }
    }
}

fn cmd_routes(path: &Path) -> u8 {
    match Dispatcher::load(path) {
        Ok(dispatcher) => {
            for (route, class) in &dispatcher.map().routes {
                println!("{route}  {class}");
            }
            EXIT_OK
        }
        Err(err) => {
            eprintln!("error: {err}");
            EXIT_IO
        }
    }
}

fn cmd_dispatch(path: &Path, route: &str, raw_inputs: &[String]) -> u8 {
    let inputs = match parse_inputs(raw_inputs) {
        Ok(inputs) => inputs,
        Err(message) => {
            eprintln!("error: {message}");
            return EXIT_VALIDATION;
        }
    };

    let dispatcher = match Dispatcher::load(path) {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            eprintln!("error: {err}");
            return EXIT_IO;
        }
    };

    match dispatcher.dispatch(route, &inputs, &demo_context()) {
        Ok(output) => {
            print_output(&output);
            EXIT_OK
        }
        Err(err) => {
            eprintln!("dispatch failed ({}): {err}", err.presentation().label());
            EXIT_VALIDATION
        }
    }
}

fn parse_inputs(raw: &[String]) -> Result<InputBag, String> {
    let mut pairs = Vec::new();

    for item in raw {
        let Some((key, value)) = item.split_once('=') else {
            return Err(format!("input '{item}' is not a key=value pair"));
        };
        pairs.push((key, value));
    }

    Ok(InputBag::from_pairs(pairs))
}

fn print_output(output: &RenderedOutput) {
    match output {
        RenderedOutput::Page(page) => {
            match &page.head.title {
                Some(title) => println!("# {title}"),
                None => println!("# (untitled)"),
            }
            if let Some(description) = &page.head.description {
                println!("description: {description}");
            }
            println!("indexable: {}", page.head.indexable);
            match &page.nav {
                Some(nav) => match &nav.active {
                    Some(key) => println!("nav: active={key}"),
                    None => println!("nav: no active entry"),
                },
                None => println!("nav: suppressed"),
            }
            println!();
            println!("{}", page.body);
        }
        RenderedOutput::Json(value) => {
            let pretty =
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            println!("{pretty}");
        }
        RenderedOutput::Text(text) => println!("{text}"),
        RenderedOutput::Redirect(location) => println!("redirect -> {location}"),
    }
}
