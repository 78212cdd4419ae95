//! Puzzle definitions consumed by run orchestration.

use serde::{Deserialize, Serialize};

use crate::core::Value;

/// What a run is scored against.
///
/// A puzzle fixes the memory size and derives the exact expected output
/// from the input it is given.
pub trait Puzzle {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Number of memory cells available to a program.
    fn memory_size(&self) -> usize;

    /// The output a correct program produces for `input`.
    fn expected_output(&self, input: &[Value]) -> Vec<Value>;
}

/// A puzzle with one fixed input and its expected output.
///
/// Deserializes from JSON such as:
///
/// ```json
/// { "name": "echo", "memory_size": 0, "input": [1, "A"], "expected": [1, "A"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPuzzle {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub memory_size: usize,
    #[serde(default)]
    pub input: Vec<Value>,
    pub expected: Vec<Value>,
}

impl FixedPuzzle {
    pub fn new(name: impl Into<String>, memory_size: usize, input: Vec<Value>, expected: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            memory_size,
            input,
            expected,
        }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl Puzzle for FixedPuzzle {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn memory_size(&self) -> usize {
        self.memory_size
    }

    /// The stored expectation, whatever the input.
    fn expected_output(&self, _input: &[Value]) -> Vec<Value> {
        self.expected.clone()
    }
}
