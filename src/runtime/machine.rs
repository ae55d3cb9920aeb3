use crate::frontend::escape::{self, EscapeError};
use crate::lang::command::Command;
use crate::runtime::runtime_error::Fault;
use crate::runtime::snapshot::Snapshot;
use crate::runtime::tape::Tape;
use crate::stream::ByteStream;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

/// Byte stored by `,` once input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EofValue {
    #[default]
    Zero,
    Max,
}

impl EofValue {
    pub fn as_byte(self) -> u8 {
        match self {
            EofValue::Zero => 0,
            EofValue::Max => 255,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(EofValue::Zero),
            255 => Some(EofValue::Max),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    /// Decode `\0` and `\xHH` in the source before loading it.
    pub use_escape: bool,
    /// Maximum number of steps; the step after the last allowed one faults.
    pub limit: u64,
    pub eof: EofValue,
}

impl Default for MachineOptions {
    fn default() -> Self {
        MachineOptions {
            use_escape: true,
            limit: 1_000_000,
            eof: EofValue::Zero,
        }
    }
}

impl MachineOptions {
    pub fn with_escape(mut self, use_escape: bool) -> Self {
        self.use_escape = use_escape;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_eof(mut self, eof: EofValue) -> Self {
        self.eof = eof;
        self
    }
}

/// Why a machine stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Halt {
    /// A NUL command was executed.
    End,
    Fault(Fault),
}

/// Result of a single call to [`Machine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Executed(Command),
    /// This step halted the machine.
    Halted(Halt),
    /// The machine was already halted; nothing changed.
    Idle,
}

/// BFmeta interpreter.
///
/// Program and data share one [`Tape`]. The program pointer starts at -1 so
/// the first step lands on address 0.
pub struct Machine {
    prog_pos: i64,
    data_pos: i64,
    tape: Tape,
    input: ByteStream,
    output: ByteStream,
    error: ByteStream,
    step_count: u64,
    halt: Option<Halt>,
    load_error: Option<EscapeError>,
    options: MachineOptions,
}

impl Machine {
    pub fn new(source: impl AsRef<[u8]>) -> Self {
        Self::with_options(source, MachineOptions::default())
    }

    /// Load `source` onto a fresh tape.
    ///
    /// A malformed escape does not fail construction: the message goes to the
    /// error stream and the machine starts with an empty tape.
    pub fn with_options(source: impl AsRef<[u8]>, options: MachineOptions) -> Self {
        let source = source.as_ref();
        let mut error = ByteStream::new();
        let mut load_error = None;

        let tape = if options.use_escape {
            match escape::decode(source) {
                Ok(program) => Tape::with_program(&program),
                Err(e) => {
                    warn!(error = %e, "escape decoding failed, loading empty program");
                    error.append_str(&format!("{}\n", e));
                    load_error = Some(e);
                    Tape::new()
                }
            }
        } else {
            Tape::with_program(source)
        };

        Machine {
            prog_pos: -1,
            data_pos: 0,
            tape,
            input: ByteStream::new(),
            output: ByteStream::new(),
            error,
            step_count: 0,
            halt: None,
            load_error,
            options,
        }
    }

    pub fn append_input(&mut self, data: impl AsRef<[u8]>) {
        self.input.append_bytes(data.as_ref());
    }

    pub fn is_done(&self) -> bool {
        self.halt.is_some()
    }

    pub fn halt(&self) -> Option<Halt> {
        self.halt
    }

    pub fn load_error(&self) -> Option<&EscapeError> {
        self.load_error.as_ref()
    }

    pub fn prog_pos(&self) -> i64 {
        self.prog_pos
    }

    pub fn data_pos(&self) -> i64 {
        self.data_pos
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn min_pos(&self) -> i64 {
        self.tape.min_pos()
    }

    pub fn max_pos(&self) -> i64 {
        self.tape.max_pos()
    }

    pub fn options(&self) -> &MachineOptions {
        &self.options
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn cell(&self, addr: i64) -> u8 {
        self.tape.get(addr)
    }

    /// Command under the program pointer, if the byte there is one.
    pub fn current_command(&self) -> Option<Command> {
        Command::from_byte(self.tape.get(self.prog_pos))
    }

    pub fn input(&self) -> &ByteStream {
        &self.input
    }

    pub fn output(&self) -> &ByteStream {
        &self.output
    }

    pub fn error(&self) -> &ByteStream {
        &self.error
    }

    /// `(address, byte)` pairs covering `[min_pos, max_pos]`.
    pub fn entries(&self) -> Vec<(i64, u8)> {
        self.tape.entries()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Execute exactly one command.
    pub fn step(&mut self) -> StepOutcome {
        if self.halt.is_some() {
            return StepOutcome::Idle;
        }

        self.step_count += 1;
        if self.step_count > self.options.limit {
            return self.fault(Fault::LimitExceeded);
        }

        let command = self.next_command();
        trace!(
            step = self.step_count,
            prog = self.prog_pos,
            data = self.data_pos,
            command = command.name(),
            "step"
        );

        match command {
            Command::Fwd => self.data_pos += 1,
            Command::Bwd => self.data_pos -= 1,
            Command::Inc => {
                let cell = self.tape.cell_mut(self.data_pos);
                *cell = cell.wrapping_add(1);
            }
            Command::Dec => {
                let cell = self.tape.cell_mut(self.data_pos);
                *cell = cell.wrapping_sub(1);
            }
            Command::Open => {
                if self.tape.get(self.data_pos) == 0 {
                    if let Err(fault) = self.skip_forward() {
                        return self.fault(fault);
                    }
                }
            }
            Command::Close => {
                if self.tape.get(self.data_pos) != 0 {
                    if let Err(fault) = self.seek_backward() {
                        return self.fault(fault);
                    }
                }
            }
            Command::Get => {
                let byte = self.input.shift().unwrap_or(self.options.eof.as_byte());
                self.tape.set(self.data_pos, byte);
            }
            Command::Put => self.output.push(self.tape.get(self.data_pos)),
            Command::End => return self.finish(Halt::End),
        }

        self.tape.touch(self.data_pos);
        StepOutcome::Executed(command)
    }

    /// Step until halted.
    #[instrument(level = "debug", skip(self))]
    pub fn run_to_completion(&mut self) -> Halt {
        loop {
            if let Some(halt) = self.halt {
                return halt;
            }
            self.step();
        }
    }

    // Advance the program pointer to the next command byte. Addresses past
    // `max_pos` join the tracked range as they are scanned. Unassigned cells
    // hold NUL, so the scan stops on the first fresh address; inside the range
    // it is unbounded.
    fn next_command(&mut self) -> Command {
        loop {
            self.prog_pos += 1;
            if self.prog_pos > self.tape.max_pos() {
                self.tape.touch(self.prog_pos);
            }
            if let Some(command) = Command::from_byte(self.tape.get(self.prog_pos)) {
                return command;
            }
        }
    }

    // Leaves the program pointer on the matching `]`.
    fn skip_forward(&mut self) -> Result<(), Fault> {
        let mut depth: i64 = 1;
        while depth != 0 {
            self.prog_pos += 1;
            if self.prog_pos > self.tape.max_pos() {
                return Err(Fault::UnmatchedOpen);
            }
            match Command::from_byte(self.tape.get(self.prog_pos)) {
                Some(Command::Open) => depth += 1,
                Some(Command::Close) => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    // Leaves the program pointer on the matching `[`.
    fn seek_backward(&mut self) -> Result<(), Fault> {
        let mut depth: i64 = -1;
        while depth != 0 {
            self.prog_pos -= 1;
            if self.prog_pos < self.tape.min_pos() {
                return Err(Fault::UnmatchedClose);
            }
            match Command::from_byte(self.tape.get(self.prog_pos)) {
                Some(Command::Open) => depth += 1,
                Some(Command::Close) => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    fn fault(&mut self, fault: Fault) -> StepOutcome {
        self.error.append_str(&fault.diagnostic());
        self.finish(Halt::Fault(fault))
    }

    fn finish(&mut self, halt: Halt) -> StepOutcome {
        debug!(?halt, steps = self.step_count, "machine halted");
        self.halt = Some(halt);
        StepOutcome::Halted(halt)
    }
}
