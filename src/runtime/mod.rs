//! Run orchestration.
//!
//! Seeds a fresh [`Session`] from a puzzle and an input sequence, drives the
//! [`Executor`] to a halt, and scores the result:
//!
//! - an instruction error is reported as [`RunStatus::Error`] with the
//!   error's message
//! - a clean halt with expected values still unproduced is [`RunStatus::Fail`]
//! - otherwise the run is a [`RunStatus::Success`], even if some input was
//!   never read

pub mod puzzle;
pub mod report;

use tracing::{info, warn};

use crate::ast::Program;
use crate::core::Value;
use crate::vm::{Executor, Session};

pub use puzzle::{FixedPuzzle, Puzzle};
pub use report::{RunReport, RunStatus};

/// Run `program` on `input` and score it against `puzzle`.
pub fn run(puzzle: &dyn Puzzle, program: &Program, input: Vec<Value>) -> RunReport {
    let expected = puzzle.expected_output(&input);
    let mut session = Session::new(puzzle.memory_size(), input, expected);
    let mut executor = Executor::new(program);
    let outcome = executor.run(&mut session);

    let (status, message) = match outcome {
        Err(err) => {
            warn!(puzzle = puzzle.name(), error = %err, steps = executor.steps(), "run aborted");
            (RunStatus::Error, Some(err.to_string()))
        }
        Ok(halt) => match session.remaining_expected() {
            0 => {
                info!(puzzle = puzzle.name(), ?halt, steps = executor.steps(), "run succeeded");
                (RunStatus::Success, None)
            }
            remaining => {
                info!(puzzle = puzzle.name(), ?halt, remaining, "run finished short of expected output");
                (RunStatus::Fail, Some(format!("{} expected values were never output", remaining)))
            }
        },
    };

    RunReport {
        status,
        message,
        instruction_count: program.instruction_count(),
        step_count: executor.steps(),
        input: session.input().to_vec(),
        output: session.output().to_vec(),
    }
}

/// Run `program` once per input set, in order.
pub fn run_all(puzzle: &dyn Puzzle, program: &Program, inputs: &[Vec<Value>]) -> Vec<RunReport> {
    inputs
        .iter()
        .map(|input| run(puzzle, program, input.clone()))
        .collect()
}

/// Mean step count over `reports`, rounded down; `0` for none.
pub fn average_steps(reports: &[RunReport]) -> u64 {
    match reports.len() as u64 {
        0 => 0,
        n => reports.iter().map(|r| r.step_count).sum::<u64>() / n,
    }
}
