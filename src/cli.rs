use bfmeta::{EofValue, MachineOptions};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("invalid --limit value '{0}': expected a non-negative integer")]
    InvalidLimit(String),

    #[error("invalid --eof value '{0}': expected 0 or 255")]
    InvalidEof(String),

    #[error("unknown flag '{0}'")]
    UnknownFlag(String),

    #[error("--input and --stdin cannot be combined")]
    ConflictingInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    None,
    Text(String),
    Stdin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub filename: Option<String>,
    pub machine: MachineOptions,
    pub input: InputSource,
    pub trace: bool,
    pub tape: bool,
    pub no_color: bool,
    pub help: bool,
}

impl CliOptions {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut options = CliOptions {
            filename: None,
            machine: MachineOptions::default(),
            input: InputSource::None,
            trace: false,
            tape: false,
            no_color: false,
            help: false,
        };

        for arg in args {
            if let Some(value) = arg.strip_prefix("--limit=") {
                let limit = value
                    .parse()
                    .map_err(|_| CliError::InvalidLimit(value.to_string()))?;
                options.machine.limit = limit;
            } else if let Some(value) = arg.strip_prefix("--eof=") {
                let eof = value
                    .parse::<u8>()
                    .ok()
                    .and_then(EofValue::from_byte)
                    .ok_or_else(|| CliError::InvalidEof(value.to_string()))?;
                options.machine.eof = eof;
            } else if let Some(text) = arg.strip_prefix("--input=") {
                if options.input == InputSource::Stdin {
                    return Err(CliError::ConflictingInput);
                }
                options.input = InputSource::Text(text.to_string());
            } else {
                match arg.as_str() {
                    "--raw" => options.machine.use_escape = false,
                    "--stdin" => {
                        if matches!(options.input, InputSource::Text(_)) {
                            return Err(CliError::ConflictingInput);
                        }
                        options.input = InputSource::Stdin;
                    }
                    "--trace" => options.trace = true,
                    "--tape" => options.tape = true,
                    "--no-color" => options.no_color = true,
                    "--help" | "-h" => options.help = true,
                    flag if flag.starts_with('-') => {
                        return Err(CliError::UnknownFlag(flag.to_string()));
                    }
                    // first non-flag argument is the filename
                    name => {
                        if options.filename.is_none() {
                            options.filename = Some(name.to_string());
                        }
                    }
                }
            }
        }

        Ok(options)
    }
}
