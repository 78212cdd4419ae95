//! Fluent program construction.
//!
//! ```
//! use mailroom::ProgramBuilder;
//!
//! let program = ProgramBuilder::new()
//!     .input().with_label("a")
//!     .output()
//!     .jump("a")
//!     .build()
//!     .unwrap();
//! assert_eq!(program.instruction_count(), 3);
//! ```

use crate::ast::{Address, Instruction, Op, Program};
use crate::core::MailroomResult;
use crate::parser;

/// Appends instructions in call order.
///
/// `label` appends a label-only placeholder that binds to whatever comes
/// next; `with_label` and `with_comment` decorate the instruction added last.
#[derive(Debug, Clone, Default)]
pub struct ProgramBuilder {
    instructions: Vec<Instruction>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary instruction.
    pub fn push(mut self, instr: Instruction) -> Self {
        self.instructions.push(instr);
        self
    }

    fn op(self, op: Op) -> Self {
        self.push(Instruction::new(op))
    }

    /// Bind `label` to the next instruction added.
    pub fn label(self, label: impl Into<String>) -> Self {
        self.push(Instruction::placeholder(label))
    }

    /// Label the most recently added instruction.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        if let Some(last) = self.instructions.last_mut() {
            last.label = Some(label.into());
        }
        self
    }

    /// Comment the most recently added instruction. Blank comments are ignored.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        if comment.trim().is_empty() {
            return self;
        }
        if let Some(last) = self.instructions.last_mut() {
            last.comment = Some(comment);
        }
        self
    }

    pub fn input(self) -> Self {
        self.op(Op::Input)
    }

    pub fn output(self) -> Self {
        self.op(Op::Output)
    }

    pub fn copy_from(self, addr: impl Into<Address>) -> Self {
        self.op(Op::CopyFrom(addr.into()))
    }

    pub fn copy_to(self, addr: impl Into<Address>) -> Self {
        self.op(Op::CopyTo(addr.into()))
    }

    pub fn add(self, addr: impl Into<Address>) -> Self {
        self.op(Op::Add(addr.into()))
    }

    pub fn sub(self, addr: impl Into<Address>) -> Self {
        self.op(Op::Sub(addr.into()))
    }

    pub fn bump_up(self, addr: impl Into<Address>) -> Self {
        self.op(Op::BumpUp(addr.into()))
    }

    pub fn bump_down(self, addr: impl Into<Address>) -> Self {
        self.op(Op::BumpDown(addr.into()))
    }

    pub fn jump(self, to: impl Into<String>) -> Self {
        self.op(Op::Jump(to.into()))
    }

    pub fn jump_if_zero(self, to: impl Into<String>) -> Self {
        self.op(Op::JumpIfZero(to.into()))
    }

    pub fn jump_if_negative(self, to: impl Into<String>) -> Self {
        self.op(Op::JumpIfNegative(to.into()))
    }

    /// The instructions added so far, placeholders included.
    pub fn raw(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Fold placeholders and index labels.
    ///
    /// Labels and jump targets must be writable as program text; anything
    /// else fails with [`ParseError::InvalidLabel`](crate::core::ParseError::InvalidLabel).
    pub fn build(self) -> MailroomResult<Program> {
        for instr in &self.instructions {
            for name in instr.label.as_deref().into_iter().chain(instr.op.target()) {
                parser::parse_label(name)?;
            }
        }
        Program::new(self.instructions)
    }
}
