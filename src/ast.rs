//! Instruction model for the mailroom language.
//!
//! A program is an ordered list of [`Instruction`]s addressed by index. The
//! program counter is that index; jumps name a label, and the label table
//! maps each label to the index of the instruction carrying it.

use std::fmt;

use indexmap::IndexMap;

use crate::core::{MailroomError, MailroomResult};
use crate::parser::fold;

/// A memory operand: a cell index, optionally used as a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    pub index: i64,
    /// When set, the cell at `index` holds the actual target address.
    pub indirect: bool,
}

impl Address {
    pub fn direct(index: i64) -> Self {
        Self { index, indirect: false }
    }

    pub fn indirect(index: i64) -> Self {
        Self { index, indirect: true }
    }
}

impl From<i64> for Address {
    fn from(index: i64) -> Self {
        Address::direct(index)
    }
}

impl From<i32> for Address {
    fn from(index: i32) -> Self {
        Address::direct(index as i64)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.indirect {
            write!(f, "[{}]", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// All operations available in the language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    // ═══════════════════════════════════════════════════════════════════
    // I/O
    // ═══════════════════════════════════════════════════════════════════
    /// Take the next input value into the register; ends the run when input is exhausted.
    Input,
    /// Emit the register; it must equal the next expected value.
    Output,

    // ═══════════════════════════════════════════════════════════════════
    // Memory
    // ═══════════════════════════════════════════════════════════════════
    /// register := memory[addr]
    CopyFrom(Address),
    /// memory[addr] := register
    CopyTo(Address),

    // ═══════════════════════════════════════════════════════════════════
    // Arithmetic
    // ═══════════════════════════════════════════════════════════════════
    /// register := register + memory[addr]
    Add(Address),
    /// register := register - memory[addr]
    Sub(Address),
    /// memory[addr] += 1; register := memory[addr]
    BumpUp(Address),
    /// memory[addr] -= 1; register := memory[addr]
    BumpDown(Address),

    // ═══════════════════════════════════════════════════════════════════
    // Control Flow
    // ═══════════════════════════════════════════════════════════════════
    Jump(String),
    JumpIfZero(String),
    JumpIfNegative(String),

    /// Label-only no-op. Removed by folding before a program is built.
    Placeholder,
}

impl Op {
    /// The canonical mnemonic.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Op::Input => "INBOX",
            Op::Output => "OUTBOX",
            Op::CopyFrom(_) => "COPYFROM",
            Op::CopyTo(_) => "COPYTO",
            Op::Add(_) => "ADD",
            Op::Sub(_) => "SUB",
            Op::BumpUp(_) => "BUMPUP",
            Op::BumpDown(_) => "BUMPDN",
            Op::Jump(_) => "JUMP",
            Op::JumpIfZero(_) => "JUMPZ",
            Op::JumpIfNegative(_) => "JUMPN",
            Op::Placeholder => "",
        }
    }

    /// Jump target, for the three jump kinds.
    pub fn target(&self) -> Option<&str> {
        match self {
            Op::Jump(to) | Op::JumpIfZero(to) | Op::JumpIfNegative(to) => Some(to),
            _ => None,
        }
    }

    pub(crate) fn target_mut(&mut self) -> Option<&mut String> {
        match self {
            Op::Jump(to) | Op::JumpIfZero(to) | Op::JumpIfNegative(to) => Some(to),
            _ => None,
        }
    }

    pub fn is_jump(&self) -> bool {
        self.target().is_some()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Op::Placeholder)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Input | Op::Output | Op::Placeholder => write!(f, "{}", self.mnemonic()),
            Op::CopyFrom(addr)
            | Op::CopyTo(addr)
            | Op::Add(addr)
            | Op::Sub(addr)
            | Op::BumpUp(addr)
            | Op::BumpDown(addr) => write!(f, "{}\t{}", self.mnemonic(), addr),
            Op::Jump(to) | Op::JumpIfZero(to) | Op::JumpIfNegative(to) => {
                write!(f, "{}\t{}", self.mnemonic(), to)
            }
        }
    }
}

/// One program line: an operation plus its optional label and comment.
///
/// The comment is cosmetic and never affects execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub label: Option<String>,
    pub comment: Option<String>,
}

impl Instruction {
    pub fn new(op: Op) -> Self {
        Self { op, label: None, comment: None }
    }

    /// A label-only placeholder.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self { op: Op::Placeholder, label: Some(label.into()), comment: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A runnable instruction sequence.
///
/// Construction folds away placeholders and builds the label table, so a
/// `Program` never contains [`Op::Placeholder`]. Jump targets are not checked
/// here; an unknown target only fails when the jump is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    /// Label -> instruction index. A label that trails the last instruction
    /// maps to `instructions.len()`, the end of the program.
    labels: IndexMap<String, usize>,
}

impl Program {
    /// Fold placeholders out of `raw` and index its labels.
    ///
    /// Fails with [`MailroomError::DuplicateLabel`] when one label would bind
    /// to two different instructions.
    pub fn new(raw: Vec<Instruction>) -> MailroomResult<Self> {
        let bindings = fold::label_bindings(&raw);
        let instructions = fold::fold_placeholders(raw);

        let mut labels: IndexMap<String, usize> = IndexMap::new();
        for (label, index) in bindings {
            match labels.get(&label) {
                Some(&bound) if bound != index => {
                    return Err(MailroomError::DuplicateLabel { label });
                }
                Some(_) => {}
                None => {
                    labels.insert(label, index);
                }
            }
        }

        Ok(Self { instructions, labels })
    }

    /// An empty program.
    pub fn empty() -> Self {
        Self { instructions: Vec::new(), labels: IndexMap::new() }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    /// Number of instructions, reported as the program's size.
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Index bound to `label`, or `None` if no instruction carries it.
    pub fn resolve(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// Labels in definition order, with their positions.
    pub fn labels(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels.iter().map(|(label, &index)| (label.as_str(), index))
    }
}
