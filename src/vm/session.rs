//! Per-run machine state: register, memory, input cursor, output, and the
//! queue of values the run is still expected to produce.

use std::collections::VecDeque;

use crate::ast::Address;
use crate::core::{MailroomError, MailroomResult, Memory, Value};

/// State owned by exactly one run.
///
/// Created fresh for each run and discarded after scoring. Input is consumed
/// front to back and never rewound; output only grows.
#[derive(Debug, Clone)]
pub struct Session {
    input: Vec<Value>,
    cursor: usize,
    output: Vec<Value>,
    expected: VecDeque<Value>,
    memory: Memory,
    register: Value,
}

impl Session {
    /// A session over `input` with `memory_size` empty cells, expecting
    /// `expected` to be output in order.
    pub fn new(memory_size: usize, input: Vec<Value>, expected: Vec<Value>) -> Self {
        Self {
            input,
            cursor: 0,
            output: Vec::new(),
            expected: expected.into(),
            memory: Memory::new(memory_size),
            register: Value::Empty,
        }
    }

    /// Pop the next input into the register. `false` means input is exhausted.
    pub fn take_input(&mut self) -> bool {
        match self.input.get(self.cursor) {
            Some(&value) => {
                self.cursor += 1;
                self.register = value;
                true
            }
            None => false,
        }
    }

    /// Output the register, checking it against the next expected value.
    ///
    /// On any error the output is left unchanged.
    pub fn emit(&mut self) -> MailroomResult<()> {
        if self.register.is_empty() {
            return Err(MailroomError::NoDataToOutput);
        }
        let expected = self.expected.pop_front().ok_or(MailroomError::NothingLeftToOutput)?;
        if expected != self.register {
            return Err(MailroomError::OutputMismatch { expected, actual: self.register });
        }
        self.output.push(self.register);
        Ok(())
    }

    /// Resolve a memory operand to a cell position.
    ///
    /// Direct operands must name a cell. Indirect operands must name a cell
    /// holding an integer, and that integer must name a cell as well.
    pub fn resolve(&self, addr: Address) -> MailroomResult<usize> {
        if !addr.indirect {
            return self
                .memory
                .slot(addr.index)
                .ok_or(MailroomError::InvalidAddress { index: addr.index });
        }

        let pointer = self
            .memory
            .slot(addr.index)
            .ok_or(MailroomError::InvalidPointerCell { index: addr.index })?;
        let target = self
            .memory
            .read(pointer)
            .as_integer()
            .ok_or(MailroomError::PointerNotInteger { index: pointer })?;
        self.memory
            .slot(target)
            .ok_or(MailroomError::InvalidPointerTarget { pointer, target })
    }

    pub fn register(&self) -> Value {
        self.register
    }

    pub fn set_register(&mut self, value: Value) {
        self.register = value;
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// The full input sequence, consumed or not.
    pub fn input(&self) -> &[Value] {
        &self.input
    }

    /// Input values not yet taken.
    pub fn remaining_input(&self) -> &[Value] {
        &self.input[self.cursor.min(self.input.len())..]
    }

    pub fn output(&self) -> &[Value] {
        &self.output
    }

    /// Number of expected values not yet produced.
    pub fn remaining_expected(&self) -> usize {
        self.expected.len()
    }
}
