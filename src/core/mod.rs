//! Core types for the mailroom machine.
//!
//! - **Value**: integer, character, or empty
//! - **Memory**: fixed-size array of values with bounds checks
//! - **Error**: the crate-wide error taxonomy
//!
//! # Layer 0 - No Internal Dependencies
//!
//! This module has no dependencies on other crate modules, allowing it to be
//! imported by all other layers.

pub mod error;
pub mod memory;
pub mod value;

pub use error::{ArithOp, ErrorCategory, MailroomError, MailroomResult, Operand, ParseError};
pub use memory::Memory;
pub use value::Value;
