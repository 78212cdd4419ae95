//! Mailroom: an interpreter for a line-oriented, label-addressed assembly
//! language with a single accumulator register and a small addressable
//! memory.
//!
//! Programs read values from an input stream, transform them, and write
//! them to an output stream that is checked against an expected sequence.
//!
//! ```
//! use mailroom::{parse, run, FixedPuzzle, RunStatus, Value};
//!
//! let program = parse("a:\n    INBOX\n    OUTBOX\n    JUMP a\n").unwrap();
//! let input = vec![Value::Integer(1), Value::Character('B')];
//! let puzzle = FixedPuzzle::new("echo", 0, input.clone(), input.clone());
//!
//! let report = run(&puzzle, &program, input);
//! assert_eq!(report.status, RunStatus::Success);
//! assert_eq!(report.step_count, 6);
//! ```

// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (No internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: Front end (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod ast;
pub mod builder;
pub mod parser;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: VM (depends on core, ast)
// ═══════════════════════════════════════════════════════════════════════════
pub mod vm;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 3: Runtime (depends on vm)
// ═══════════════════════════════════════════════════════════════════════════
pub mod runtime;


pub use crate::core::{
    ArithOp, ErrorCategory, MailroomError, MailroomResult, Memory, Operand, ParseError, Value,
};
pub use ast::{Address, Instruction, Op, Program};
pub use builder::ProgramBuilder;
pub use parser::{parse, serialize};
pub use runtime::{average_steps, run, run_all, FixedPuzzle, Puzzle, RunReport, RunStatus};
pub use vm::{Executor, Halt, Session, StepOutcome};
