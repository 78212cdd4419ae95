//! Mnemonic lookup for the line parser.
//!
//! Maps case-insensitive mnemonics to the operand shape they expect and the
//! constructor for the parsed operation.

use crate::ast::{Address, Op};

/// Operand shape of a mnemonic.
#[derive(Clone, Copy, Debug)]
pub enum Shape {
    /// No operand (INBOX, OUTBOX).
    Nullary,
    /// A direct `N` or indirect `[N]` memory operand.
    Memory(fn(Address) -> Op),
    /// A label name.
    Label(fn(String) -> Op),
}

/// Uppercase mnemonics and their shapes.
pub const KEYWORDS: &[(&str, Shape)] = &[
    ("INBOX", Shape::Nullary),
    ("OUTBOX", Shape::Nullary),
    ("COPYFROM", Shape::Memory(Op::CopyFrom)),
    ("COPYTO", Shape::Memory(Op::CopyTo)),
    ("ADD", Shape::Memory(Op::Add)),
    ("SUB", Shape::Memory(Op::Sub)),
    ("BUMPUP", Shape::Memory(Op::BumpUp)),
    ("BUMPDN", Shape::Memory(Op::BumpDown)),
    ("JUMP", Shape::Label(Op::Jump)),
    ("JUMPZ", Shape::Label(Op::JumpIfZero)),
    ("JUMPN", Shape::Label(Op::JumpIfNegative)),
];

/// Look up a mnemonic, ignoring case. Returns the canonical spelling too.
pub fn lookup(mnemonic: &str) -> Option<(&'static str, Shape)> {
    KEYWORDS
        .iter()
        .find(|(keyword, _)| keyword.eq_ignore_ascii_case(mnemonic))
        .copied()
}

/// The nullary operation for `keyword`.
pub fn nullary(keyword: &str) -> Option<Op> {
    match keyword {
        "INBOX" => Some(Op::Input),
        "OUTBOX" => Some(Op::Output),
        _ => None,
    }
}
