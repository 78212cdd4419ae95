//! Line parser and serializer for mailroom programs.
//!
//! Syntax:
//! - One instruction per line: `MNEMONIC [operand]`, mnemonics case-insensitive
//! - Memory operands: `3` (direct) or `[3]` (indirect)
//! - Labels: a line ending in `:`, e.g. `a:` or `a:b:`
//! - Comments: `-- text`, whole-line or trailing
//! - Metadata: a block starting with `DEFINE` and ending at a line ending in `;`
//!
//! ```text
//! -- MAILROOM PROGRAM --
//!     JUMP     b
//! a:
//!     OUTBOX
//! b:
//!     INBOX
//!     JUMPZ    a
//!     JUMP     b
//! ```
//!
//! # Architecture
//!
//! - `keyword_map`: mnemonic table and operand shapes
//! - `fold`: placeholder folding that turns label lines into instruction labels
//!
//! Parsing is all-or-nothing: any malformed line rejects the whole text and
//! no partial program is produced.

pub mod fold;
pub mod keyword_map;

use std::str::FromStr;

use crate::ast::{Address, Instruction, Op, Program};
use crate::core::{MailroomError, MailroomResult, ParseError};

use keyword_map::Shape;

/// Line comment marker.
pub const COMMENT: &str = "--";
/// First line of serialized output.
pub const HEADER: &str = "-- MAILROOM PROGRAM --";
/// Suffix that turns a line into label definitions.
pub const LABEL_SUFFIX: char = ':';
/// Keyword opening a skipped metadata block.
pub const DEFINE: &str = "DEFINE";
/// Last character of a metadata block.
pub const DEFINE_END: char = ';';

/// Parse program text into a runnable [`Program`].
pub fn parse(text: &str) -> MailroomResult<Program> {
    let raw = parse_raw(text)?;
    Program::new(raw)
}

/// Parse program text into the raw instruction list, placeholders included.
///
/// Labels still pending at the end of the text become trailing placeholders.
pub fn parse_raw(text: &str) -> Result<Vec<Instruction>, ParseError> {
    let mut raw = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }

        if is_metadata_start(line) {
            let mut current = line;
            while !current.ends_with(DEFINE_END) {
                current = lines
                    .next()
                    .ok_or_else(|| ParseError::UnterminatedMetadata(line.to_string()))?
                    .trim();
            }
            continue;
        }

        let line = strip_comment(line);
        if line.is_empty() {
            continue;
        }

        if line.ends_with(LABEL_SUFFIX) {
            for name in line.split(LABEL_SUFFIX).map(str::trim).filter(|s| !s.is_empty()) {
                pending.push(parse_label(name)?);
            }
            continue;
        }

        let op = parse_op(line)?;
        raw.extend(pending.drain(..).map(Instruction::placeholder));
        raw.push(Instruction::new(op));
    }

    raw.extend(pending.into_iter().map(Instruction::placeholder));
    Ok(raw)
}

fn is_metadata_start(line: &str) -> bool {
    line.get(..DEFINE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DEFINE))
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT) {
        Some(index) => line[..index].trim(),
        None => line,
    }
}

/// Parse a single instruction line (no label, no comment).
pub fn parse_op(line: &str) -> Result<Op, ParseError> {
    let mut tokens = line.split_whitespace();
    let mnemonic = tokens.next().unwrap_or_default();
    let (keyword, shape) = keyword_map::lookup(mnemonic)
        .ok_or_else(|| ParseError::UnknownMnemonic(mnemonic.to_string()))?;

    let operand = tokens.next();
    if let Some(extra) = tokens.next() {
        return Err(ParseError::UnexpectedOperand {
            mnemonic: keyword.to_string(),
            operand: extra.to_string(),
        });
    }

    match shape {
        Shape::Nullary => match operand {
            Some(operand) => Err(ParseError::UnexpectedOperand {
                mnemonic: keyword.to_string(),
                operand: operand.to_string(),
            }),
            None => keyword_map::nullary(keyword)
                .ok_or_else(|| ParseError::UnknownMnemonic(mnemonic.to_string())),
        },
        Shape::Memory(make) => {
            let operand = operand.ok_or_else(|| ParseError::MissingOperand(keyword.to_string()))?;
            Ok(make(parse_address(operand)?))
        }
        Shape::Label(make) => {
            let operand = operand.ok_or_else(|| ParseError::MissingOperand(keyword.to_string()))?;
            Ok(make(parse_label(operand)?))
        }
    }
}

/// Parse `N` or `[N]`.
pub fn parse_address(operand: &str) -> Result<Address, ParseError> {
    let invalid = || ParseError::InvalidOperand(operand.to_string());
    match operand.strip_prefix('[') {
        Some(rest) => {
            let inner = rest.strip_suffix(']').ok_or_else(invalid)?;
            inner.trim().parse().map(Address::indirect).map_err(|_| invalid())
        }
        None => operand.parse().map(Address::direct).map_err(|_| invalid()),
    }
}

/// Whether `name` survives a trip through program text.
///
/// Any non-empty token works except one holding whitespace, `:`, `[`, `]`
/// or the comment marker, or one that would open a metadata block.
pub fn is_valid_label(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(COMMENT)
        && !is_metadata_start(name)
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c == LABEL_SUFFIX || c == '[' || c == ']')
}

pub(crate) fn parse_label(name: &str) -> Result<String, ParseError> {
    if is_valid_label(name) {
        Ok(name.to_string())
    } else {
        Err(ParseError::InvalidLabel(name.to_string()))
    }
}

/// Render a program in the text format accepted by [`parse`].
///
/// Labels that bind past the last instruction are written at the end.
pub fn serialize(program: &Program) -> String {
    let mut lines = vec![HEADER.to_string()];
    for instr in program.instructions() {
        if let Some(label) = &instr.label {
            lines.push(format!("{}{}", label, LABEL_SUFFIX));
        }
        if let Some(comment) = &instr.comment {
            lines.extend(
                comment
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(|l| format!("{} {}", COMMENT, l.trim())),
            );
        }
        lines.push(format!("\t{}", instr.op));
    }
    let end = program.instruction_count();
    for (label, index) in program.labels() {
        if index == end {
            lines.push(format!("{}{}", label, LABEL_SUFFIX));
        }
    }
    lines.join("\n")
}

impl FromStr for Program {
    type Err = MailroomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", serialize(self))
    }
}
