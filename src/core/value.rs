//! Value type for the mailroom machine: an integer, a character, or empty.
//!
//! Arithmetic is only defined between two integers. Every other combination
//! is a domain error reported to the caller, never a coerced value.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{ArithOp, MailroomError, MailroomResult, Operand, ParseError};

/// A single data cell.
///
/// Two values are equal iff both are `Empty`, or both carry the same tag and
/// the same payload. `Integer(65)` and `Character('A')` are different values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Character(char),
    #[default]
    Empty,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Character(c) => write!(f, "{}", c),
            Value::Empty => write!(f, "[empty]"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Character(c)
    }
}

impl Value {
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// The integer payload, if this is an integer.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Character(_) | Value::Empty => None,
        }
    }

    /// True iff this is the integer zero.
    pub fn is_zero(&self) -> bool {
        self.as_integer() == Some(0)
    }

    /// True iff this is a negative integer.
    pub fn is_negative(&self) -> bool {
        matches!(self.as_integer(), Some(n) if n < 0)
    }

    /// `register + memory`, with the memory cell at `index`.
    ///
    /// The memory side is checked first, so when both sides are wrong the
    /// error names the memory cell.
    pub fn checked_add(self, cell: Value, index: usize) -> MailroomResult<Value> {
        let (lhs, rhs) = Self::integer_pair(self, cell, index, ArithOp::Add)?;
        lhs.checked_add(rhs)
            .map(Value::Integer)
            .ok_or(MailroomError::ArithmeticOverflow { operation: ArithOp::Add })
    }

    /// `register - memory`, with the memory cell at `index`.
    pub fn checked_sub(self, cell: Value, index: usize) -> MailroomResult<Value> {
        let (lhs, rhs) = Self::integer_pair(self, cell, index, ArithOp::Sub)?;
        lhs.checked_sub(rhs)
            .map(Value::Integer)
            .ok_or(MailroomError::ArithmeticOverflow { operation: ArithOp::Sub })
    }

    /// Add `delta` to the memory cell at `index` (BUMPUP / BUMPDN).
    pub fn checked_bump(self, delta: i64, index: usize) -> MailroomResult<Value> {
        let operation = if delta < 0 { ArithOp::BumpDown } else { ArithOp::BumpUp };
        let n = self.as_integer().ok_or(MailroomError::NotAnInteger {
            operation,
            side: Operand::Memory(index),
        })?;
        n.checked_add(delta)
            .map(Value::Integer)
            .ok_or(MailroomError::ArithmeticOverflow { operation })
    }

    fn integer_pair(
        register: Value,
        cell: Value,
        index: usize,
        operation: ArithOp,
    ) -> MailroomResult<(i64, i64)> {
        let rhs = cell.as_integer().ok_or(MailroomError::NotAnInteger {
            operation,
            side: Operand::Memory(index),
        })?;
        let lhs = register.as_integer().ok_or(MailroomError::NotAnInteger {
            operation,
            side: Operand::Register,
        })?;
        Ok((lhs, rhs))
    }

    /// Parse a single input token: an integer, or exactly one character.
    pub fn parse_token(token: &str) -> Option<Value> {
        let token = token.trim();
        if let Ok(n) = token.parse::<i64>() {
            return Some(Value::Integer(n));
        }
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Value::Character(c)),
            _ => None,
        }
    }

    /// Parse a comma-separated list such as `1, -2, A`.
    ///
    /// Fails on the first token that is neither an integer nor a single
    /// character.
    pub fn parse_list(text: &str) -> Result<Vec<Value>, ParseError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        text.split(',')
            .map(|token| {
                Value::parse_token(token).ok_or_else(|| ParseError::InvalidValue(token.trim().to_string()))
            })
            .collect()
    }
}
