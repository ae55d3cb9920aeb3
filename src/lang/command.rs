use serde::{Deserialize, Serialize};

// =============================================================================
// COMMAND - the nine recognized tape bytes
// =============================================================================

/// A recognized command byte. Every other byte value is skipped by the
/// program pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    // pointer movement
    Fwd, // >
    Bwd, // <

    // cell arithmetic (wrapping)
    Inc, // +
    Dec, // -

    // loops
    /// Jump past the matching `]` when the data cell is zero.
    Open,
    /// Jump back to the matching `[` when the data cell is nonzero.
    Close,

    // I/O
    Get, // ,
    Put, // .

    /// NUL byte. Halts the machine.
    End,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Fwd,
        Command::Bwd,
        Command::Inc,
        Command::Dec,
        Command::Open,
        Command::Close,
        Command::Get,
        Command::Put,
        Command::End,
    ];

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'>' => Some(Command::Fwd),
            b'<' => Some(Command::Bwd),
            b'+' => Some(Command::Inc),
            b'-' => Some(Command::Dec),
            b'[' => Some(Command::Open),
            b']' => Some(Command::Close),
            b',' => Some(Command::Get),
            b'.' => Some(Command::Put),
            0 => Some(Command::End),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Command::Fwd => b'>',
            Command::Bwd => b'<',
            Command::Inc => b'+',
            Command::Dec => b'-',
            Command::Open => b'[',
            Command::Close => b']',
            Command::Get => b',',
            Command::Put => b'.',
            Command::End => 0,
        }
    }

    /// Printable form, `\0` for the terminator.
    pub fn symbol(self) -> &'static str {
        match self {
            Command::Fwd => ">",
            Command::Bwd => "<",
            Command::Inc => "+",
            Command::Dec => "-",
            Command::Open => "[",
            Command::Close => "]",
            Command::Get => ",",
            Command::Put => ".",
            Command::End => "\\0",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Fwd => "FWD",
            Command::Bwd => "BWD",
            Command::Inc => "INC",
            Command::Dec => "DEC",
            Command::Open => "OPEN",
            Command::Close => "CLOSE",
            Command::Get => "GET",
            Command::Put => "PUT",
            Command::End => "END",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_mapping_is_bijective_over_commands() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_byte(cmd.as_byte()), Some(cmd));
        }
    }

    #[test]
    fn test_exactly_nine_bytes_recognized() {
        let recognized = (0..=255u8).filter(|b| Command::from_byte(*b).is_some()).count();
        assert_eq!(recognized, 9);
    }

    #[test]
    fn test_nul_is_end() {
        assert_eq!(Command::from_byte(0), Some(Command::End));
        assert_eq!(Command::from_byte(b'a'), None);
        assert_eq!(Command::End.symbol(), "\\0");
    }
}
