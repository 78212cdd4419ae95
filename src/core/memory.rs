//! Memory for the mailroom machine.
//!
//! A fixed number of cells, each holding a [`Value`], all starting `Empty`.
//! Indices are signed because program operands and pointer cells are; any
//! index outside `0..size` is rejected, negative ones included.

use std::fmt;

use super::value::Value;

/// Fixed-size addressable memory owned by a single run.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<Value>,
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only show occupied cells
        write!(f, "Memory{{")?;
        let mut first = true;
        for (addr, val) in self.cells.iter().enumerate().filter(|(_, v)| !v.is_empty()) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "[{}]={}", addr, val)?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl Memory {
    /// Create a memory of `size` empty cells.
    pub fn new(size: usize) -> Self {
        Self { cells: vec![Value::Empty; size] }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Whether `index` names a cell, i.e. `0 <= index < size`.
    pub fn has_index(&self, index: i64) -> bool {
        self.slot(index).is_some()
    }

    /// The cell position for `index`, if it names one.
    pub fn slot(&self, index: i64) -> Option<usize> {
        usize::try_from(index).ok().filter(|&i| i < self.cells.len())
    }

    /// Read the cell at a validated position.
    pub fn read(&self, slot: usize) -> Value {
        self.cells.get(slot).copied().unwrap_or_default()
    }

    /// Write the cell at a position already checked with [`Memory::slot`].
    pub(crate) fn write(&mut self, slot: usize, val: Value) {
        if let Some(cell) = self.cells.get_mut(slot) {
            *cell = val;
        }
    }

    /// All cells, in address order.
    pub fn cells(&self) -> &[Value] {
        &self.cells
    }
}
