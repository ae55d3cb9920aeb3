//! # BFmeta command set
//!
//! Program and data share one tape, so a "program" is just bytes. Only the
//! nine values modelled by [`command::Command`] mean anything to the program
//! pointer; every other byte is a comment that may later be turned into a
//! command by `+`, `-` or `,`.

pub mod command;
