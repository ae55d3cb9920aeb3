//! # BFmeta
//!
//! A step-wise interpreter for BFmeta, a Brainfuck dialect whose program and
//! data live on the same lazily growing tape.

pub mod frontend;
pub mod lang;
pub mod runtime;
pub mod stream;

pub use frontend::escape::EscapeError;
pub use lang::command::Command;
pub use runtime::machine::{EofValue, Halt, Machine, MachineOptions, StepOutcome};
pub use runtime::runtime_error::Fault;
pub use runtime::snapshot::Snapshot;
pub use runtime::tape::Tape;
pub use stream::ByteStream;
