use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mailroom::{parse, run, FixedPuzzle, Program, RunReport, RunStatus, Value};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "mailroom")]
#[command(about = "Run and format inbox/outbox assembly programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a program and score its output
    Run {
        /// Program source file
        program: PathBuf,

        /// JSON puzzle file with name, memory_size, input and expected
        #[arg(long, conflicts_with_all = ["input", "expect", "memory"])]
        puzzle: Option<PathBuf>,

        /// Comma-separated input values, e.g. "1, -2, A"
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        input: String,

        /// Comma-separated expected output values
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        expect: String,

        /// Number of memory cells
        #[arg(long, default_value = "0")]
        memory: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a program and print it in canonical form
    Fmt {
        /// Program source file
        program: PathBuf,
    },

    /// Parse a program and report its size
    Check {
        /// Program source file
        program: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailroom=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match execute(cli.command) {
        Ok(code) => code,
        Err(message) => {
            error!("{}", message);
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command) -> Result<ExitCode, String> {
    match command {
        Command::Run { program, puzzle, input, expect, memory, json } => {
            let source = load_program(&program)?;
            let puzzle = match puzzle {
                Some(path) => {
                    let text = fs::read_to_string(&path)
                        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
                    FixedPuzzle::from_json(&text)
                        .map_err(|e| format!("invalid puzzle {}: {}", path.display(), e))?
                }
                None => {
                    let input = parse_values("--input", &input)?;
                    let expected = parse_values("--expect", &expect)?;
                    FixedPuzzle::new(program.display().to_string(), memory, input, expected)
                }
            };

            info!(puzzle = %puzzle.name, memory = puzzle.memory_size, "running");
            let report = run(&puzzle, &source, puzzle.input.clone());
            if json {
                let text = report.to_json().map_err(|e| e.to_string())?;
                println!("{}", text);
            } else {
                print_report(&report);
            }
            Ok(match report.status {
                RunStatus::Success => ExitCode::SUCCESS,
                RunStatus::Fail | RunStatus::Error => ExitCode::FAILURE,
            })
        }
        Command::Fmt { program } => {
            let source = load_program(&program)?;
            println!("{}", source);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { program } => {
            let source = load_program(&program)?;
            println!("{}: {} instructions", program.display(), source.instruction_count());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_program(path: &Path) -> Result<Program, String> {
    let text =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    parse(&text).map_err(|e| format!("{}: {}", path.display(), e))
}

fn parse_values(flag: &str, text: &str) -> Result<Vec<Value>, String> {
    Value::parse_list(text).map_err(|e| format!("{}: {}", flag, e))
}

fn join(values: &[Value]) -> String {
    values.iter().map(Value::to_string).collect::<Vec<_>>().join(", ")
}

fn print_report(report: &RunReport) {
    println!("status:       {}", report.status);
    if let Some(message) = &report.message {
        println!("message:      {}", message);
    }
    println!("input  ({}):  {}", report.input.len(), join(&report.input));
    println!("output ({}):  {}", report.output.len(), join(&report.output));
    println!("instructions: {}", report.instruction_count);
    println!("steps:        {}", report.step_count);
}
