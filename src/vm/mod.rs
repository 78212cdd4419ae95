//! Virtual machine for mailroom programs.
//!
//! - **Session**: the state one run owns (register, memory, input, output,
//!   expected-output queue)
//! - **Executor**: the program-counter loop that drives a session

pub mod executor;
pub mod session;

pub use executor::{Executor, Halt, StepOutcome};
pub use session::Session;
