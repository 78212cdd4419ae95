//! The execution engine.
//!
//! Walks a [`Program`] by index against a [`Session`]. Commands always run
//! and cost one step each; jumps cost one step only when taken. The engine
//! has no instruction cap: it stops on input exhaustion, on running off the
//! end of the program, or on the first error.

use tracing::{debug, trace};

use crate::ast::{Op, Program};
use crate::core::{MailroomError, MailroomResult, Value};

use super::session::Session;

/// Why a run stopped without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// INBOX found no more input.
    InputExhausted,
    /// Control ran past the last instruction.
    EndOfProgram,
}

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    Halted(Halt),
}

/// What a command asks the loop to do next.
enum Flow {
    Continue,
    End,
}

/// Program-counter-driven interpreter for one program.
#[derive(Debug)]
pub struct Executor<'p> {
    program: &'p Program,
    pc: usize,
    steps: u64,
}

impl<'p> Executor<'p> {
    pub fn new(program: &'p Program) -> Self {
        let mut executor = Self { program, pc: 0, steps: 0 };
        executor.skip_placeholders();
        executor
    }

    /// Index of the next instruction; `instruction_count()` once finished.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Executed commands plus taken jumps so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run until the program halts or faults.
    ///
    /// After an error the executor must not be resumed.
    pub fn run(&mut self, session: &mut Session) -> MailroomResult<Halt> {
        loop {
            if let StepOutcome::Halted(halt) = self.step(session)? {
                return Ok(halt);
            }
        }
    }

    /// Execute the instruction at the program counter.
    pub fn step(&mut self, session: &mut Session) -> MailroomResult<StepOutcome> {
        let program = self.program;
        let Some(instr) = program.get(self.pc) else {
            return Ok(StepOutcome::Halted(Halt::EndOfProgram));
        };
        trace!(pc = self.pc, op = %instr.op, steps = self.steps, "step");

        if let Some(label) = instr.op.target() {
            if !Self::condition(&instr.op, session.register())? {
                self.advance();
                return Ok(StepOutcome::Running);
            }
            self.steps += 1;
            let target = program
                .resolve(label)
                .ok_or_else(|| MailroomError::InvalidJumpTarget { label: label.to_string() })?;
            debug!(from = self.pc, to = target, label, "jump taken");
            self.pc = target;
            self.skip_placeholders();
            return Ok(StepOutcome::Running);
        }

        match Self::execute(&instr.op, session)? {
            Flow::End => Ok(StepOutcome::Halted(Halt::InputExhausted)),
            Flow::Continue => {
                self.steps += 1;
                self.advance();
                Ok(StepOutcome::Running)
            }
        }
    }

    fn advance(&mut self) {
        self.pc += 1;
        self.skip_placeholders();
    }

    fn skip_placeholders(&mut self) {
        while self.program.get(self.pc).is_some_and(|i| i.op.is_placeholder()) {
            self.pc += 1;
        }
    }

    /// Whether a jump is taken given the register.
    fn condition(op: &Op, register: Value) -> MailroomResult<bool> {
        match op {
            Op::Jump(_) => Ok(true),
            Op::JumpIfZero(_) if register.is_empty() => {
                Err(MailroomError::NothingToCompare { instruction: "JUMPZ" })
            }
            Op::JumpIfNegative(_) if register.is_empty() => {
                Err(MailroomError::NothingToCompare { instruction: "JUMPN" })
            }
            Op::JumpIfZero(_) => Ok(register.is_zero()),
            Op::JumpIfNegative(_) => Ok(register.is_negative()),
            _ => Ok(false),
        }
    }

    /// Run a non-jump instruction against the session.
    fn execute(op: &Op, session: &mut Session) -> MailroomResult<Flow> {
        match op {
            Op::Input => {
                if !session.take_input() {
                    return Ok(Flow::End);
                }
            }
            Op::Output => session.emit()?,
            Op::CopyFrom(addr) => {
                let slot = session.resolve(*addr)?;
                let value = session.memory().read(slot);
                session.set_register(value);
            }
            Op::CopyTo(addr) => {
                let slot = session.resolve(*addr)?;
                let value = session.register();
                session.memory_mut().write(slot, value);
            }
            Op::Add(addr) => {
                let slot = session.resolve(*addr)?;
                let sum = session.register().checked_add(session.memory().read(slot), slot)?;
                session.set_register(sum);
            }
            Op::Sub(addr) => {
                let slot = session.resolve(*addr)?;
                let diff = session.register().checked_sub(session.memory().read(slot), slot)?;
                session.set_register(diff);
            }
            Op::BumpUp(addr) | Op::BumpDown(addr) => {
                let delta = if matches!(op, Op::BumpUp(_)) { 1 } else { -1 };
                let slot = session.resolve(*addr)?;
                let bumped = session.memory().read(slot).checked_bump(delta, slot)?;
                session.memory_mut().write(slot, bumped);
                session.set_register(bumped);
            }
            Op::Jump(_) | Op::JumpIfZero(_) | Op::JumpIfNegative(_) | Op::Placeholder => {}
        }
        Ok(Flow::Continue)
    }
}
