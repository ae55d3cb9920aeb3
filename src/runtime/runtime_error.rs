use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A terminal failure of a running machine.
///
/// Faults are state, not `Err` values: the machine records the message on
/// its error stream and halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Fault {
    #[error("Limit exceeded")]
    LimitExceeded,

    #[error("Unmatched bracket [")]
    UnmatchedOpen,

    #[error("Unmatched bracket ]")]
    UnmatchedClose,
}

impl Fault {
    /// Text appended to the error stream.
    pub fn diagnostic(&self) -> String {
        format!("{}\n", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Fault::LimitExceeded.to_string(), "Limit exceeded");
        assert_eq!(Fault::UnmatchedOpen.to_string(), "Unmatched bracket [");
        assert_eq!(Fault::UnmatchedClose.diagnostic(), "Unmatched bracket ]\n");
    }
}
