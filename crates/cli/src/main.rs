//! cheader CLI: generate C headers from the top-level functions of source files.
//!
//! Thin shell over `cheader-core`.

use clap::{CommandFactory, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cheader_core::batch::{collect_sources, export_all, plan_all};
use cheader_core::{extract_file, load_config, load_project_config, HeaderConfig};

/// cheader: extract top-level C functions into a header file.
#[derive(Parser)]
#[command(name = "cheader", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: .cheader.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a header next to each source file (`foo.c` -> `foo.h`)
    Generate {
        /// Source files or directories. Prompts for a file name when omitted.
        paths: Vec<PathBuf>,

        /// Print the headers instead of writing them
        #[arg(long)]
        stdout: bool,
    },
    /// Print the top-level function signatures of a source file
    List {
        /// Source file
        file: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn resolve_config(path: Option<&Path>) -> HeaderConfig {
    let config = match path {
        Some(p) => load_config(p),
        None => std::env::current_dir().map(|d| load_project_config(&d)).unwrap_or_default(),
    };
    debug!(
        line_mode = ?config.line_mode,
        guard_suffix = config.guard_suffix.as_str(),
        explicit = path.is_some(),
        "Resolved config"
    );
    config
}

/// Ask for a source file name on stdin. `None` on EOF or an empty answer.
fn prompt_for_file() -> Option<PathBuf> {
    eprint!("Source file: ");
    io::stderr().flush().ok()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).ok()?;
    let answer = answer.trim();
    if answer.is_empty() {
        None
    } else {
        Some(PathBuf::from(answer))
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Could not serialize output: {e}"),
    }
}

fn run_generate(paths: Vec<PathBuf>, to_stdout: bool, json: bool, config: &HeaderConfig) -> i32 {
    let paths = if paths.is_empty() {
        match prompt_for_file() {
            Some(p) => vec![p],
            None => {
                eprintln!("No source file given");
                return 1;
            }
        }
    } else {
        paths
    };

    let sources = collect_sources(&paths, config);
    if sources.is_empty() {
        eprintln!("No source files found");
        return 1;
    }

    let mut failed = 0usize;
    let mut items = Vec::new();

    if to_stdout {
        for (path, result) in plan_all(&sources, config) {
            match result {
                Ok(plan) if json => items.push(serde_json::json!({
                    "source": plan.source,
                    "header": plan.header,
                    "contents": plan.render(),
                })),
                Ok(plan) => {
                    if sources.len() > 1 {
                        println!("// {}", plan.header.display());
                    }
                    print!("{}", plan.render());
                }
                Err(e) => {
                    eprintln!("{}: {e}", path.display());
                    failed += 1;
                }
            }
        }
    } else {
        for (path, result) in export_all(&sources, config) {
            match result {
                Ok(report) if json => items.push(serde_json::json!(report)),
                Ok(report) => println!(
                    "{} -> {} ({} functions)",
                    report.source.display(),
                    report.header.display(),
                    report.signatures
                ),
                Err(e) => {
                    eprintln!("{}: {e}", path.display());
                    failed += 1;
                }
            }
        }
    }

    if json {
        print_json(&serde_json::Value::Array(items));
    }
    if failed > 0 {
        eprintln!("\n{failed} of {} files failed", sources.len());
        1
    } else {
        0
    }
}

fn run_list(file: &Path, json: bool, config: &HeaderConfig) -> i32 {
    let extraction = match extract_file(file, config.line_mode) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };

    if json {
        print_json(&serde_json::json!({
            "file": file,
            "signatures": extraction.signatures,
            "final_depth": extraction.final_depth,
            "lines_scanned": extraction.lines_scanned,
        }));
    } else {
        if extraction.signatures.is_empty() {
            eprintln!("No top-level functions in {}", file.display());
        }
        for sig in &extraction.signatures {
            println!("{sig}");
        }
    }
    0
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cheader=warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref());

    let code = match cli.command {
        Commands::Generate { paths, stdout } => run_generate(paths, stdout, cli.json, &config),
        Commands::List { file } => run_list(&file, cli.json, &config),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "cheader", &mut io::stdout());
            0
        }
    };
    std::process::exit(code);
}
