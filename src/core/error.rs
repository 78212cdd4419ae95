//! Error types for the mailroom machine.
//!
//! Errors fall into three categories:
//!
//! - **Runtime**: instruction contract violations raised while a program runs
//!   (bad addresses, wrong value types, unmet output expectations, bad jumps)
//! - **Parse**: malformed program text
//! - **Build**: a program that parsed (or was built fluently) but cannot be
//!   assembled into a runnable instruction sequence
//!
//! Runtime errors terminate the run immediately and their message is carried
//! verbatim in the run report. Graceful input exhaustion is not an error and
//! never appears here.

use thiserror::Error;

use super::value::Value;

/// Result alias used throughout the crate.
pub type MailroomResult<T> = Result<T, MailroomError>;

/// Broad classification of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Runtime,
    Parse,
    Build,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Runtime => write!(f, "runtime"),
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Build => write!(f, "build"),
        }
    }
}

/// Arithmetic operations that can fail on non-integer operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    BumpUp,
    BumpDown,
}

impl std::fmt::Display for ArithOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithOp::Add => write!(f, "addition"),
            ArithOp::Sub => write!(f, "subtraction"),
            ArithOp::BumpUp => write!(f, "increment"),
            ArithOp::BumpDown => write!(f, "decrement"),
        }
    }
}

/// Which side of an arithmetic instruction held the offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The accumulator register.
    Register,
    /// A memory cell, by resolved address.
    Memory(usize),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Register => write!(f, "the register"),
            Operand::Memory(index) => write!(f, "memory cell {}", index),
        }
    }
}

/// Malformed program text.
///
/// Parsing is all-or-nothing, so these carry the offending text only and
/// never a line or column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown instruction `{0}`")]
    UnknownMnemonic(String),

    #[error("`{0}` requires an operand")]
    MissingOperand(String),

    #[error("`{mnemonic}` does not take operand `{operand}`")]
    UnexpectedOperand { mnemonic: String, operand: String },

    #[error("`{0}` is not a valid memory operand")]
    InvalidOperand(String),

    #[error("`{0}` is not a valid label")]
    InvalidLabel(String),

    #[error("metadata block `{0}` is never terminated")]
    UnterminatedMetadata(String),

    #[error("`{0}` is neither an integer nor a single character")]
    InvalidValue(String),
}

/// Every failure the crate can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailroomError {
    // ═══════════════════════════════════════════════════════════════════
    // Runtime Errors
    // ═══════════════════════════════════════════════════════════════════
    /// OUTBOX with an empty register.
    #[error("no data to output")]
    NoDataToOutput,

    /// OUTBOX after every expected value has already been produced.
    #[error("nothing left to output")]
    NothingLeftToOutput,

    /// OUTBOX produced a value other than the next expected one.
    #[error("expected to output {expected}, not {actual}")]
    OutputMismatch { expected: Value, actual: Value },

    /// Direct memory operand outside the memory.
    #[error("attempted to access nonexistent memory address {index}")]
    InvalidAddress { index: i64 },

    /// Indirect memory operand whose pointer cell is outside the memory.
    #[error("attempted to read a pointer from nonexistent memory address {index}")]
    InvalidPointerCell { index: i64 },

    /// Indirect memory operand whose pointer cell holds no integer.
    #[error("memory cell {index} holds no integer to use as an address")]
    PointerNotInteger { index: usize },

    /// Indirect memory operand whose pointer resolves outside the memory.
    #[error("pointer in memory cell {pointer} refers to nonexistent memory address {target}")]
    InvalidPointerTarget { pointer: usize, target: i64 },

    /// ADD/SUB/BUMPUP/BUMPDN on a value that is not an integer.
    #[error("{side} holds no integer for {operation}")]
    NotAnInteger { operation: ArithOp, side: Operand },

    /// Integer arithmetic left the i64 range.
    #[error("{operation} overflowed")]
    ArithmeticOverflow { operation: ArithOp },

    /// Conditional jump with an empty register.
    #[error("nothing to compare for {instruction}")]
    NothingToCompare { instruction: &'static str },

    /// Taken jump to a label that no instruction carries.
    #[error("invalid jump target `{label}`")]
    InvalidJumpTarget { label: String },

    // ═══════════════════════════════════════════════════════════════════
    // Build Errors
    // ═══════════════════════════════════════════════════════════════════
    /// Two distinct instructions carry the same label.
    #[error("label `{label}` is defined more than once")]
    DuplicateLabel { label: String },

    // ═══════════════════════════════════════════════════════════════════
    // Parse Errors
    // ═══════════════════════════════════════════════════════════════════
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl MailroomError {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            MailroomError::NoDataToOutput
            | MailroomError::NothingLeftToOutput
            | MailroomError::OutputMismatch { .. }
            | MailroomError::InvalidAddress { .. }
            | MailroomError::InvalidPointerCell { .. }
            | MailroomError::PointerNotInteger { .. }
            | MailroomError::InvalidPointerTarget { .. }
            | MailroomError::NotAnInteger { .. }
            | MailroomError::ArithmeticOverflow { .. }
            | MailroomError::NothingToCompare { .. }
            | MailroomError::InvalidJumpTarget { .. } => ErrorCategory::Runtime,

            MailroomError::DuplicateLabel { .. } => ErrorCategory::Build,

            MailroomError::Parse(_) => ErrorCategory::Parse,
        }
    }

    /// Whether this error was raised by a running program.
    pub fn is_runtime(&self) -> bool {
        self.category() == ErrorCategory::Runtime
    }
}
