use crate::runtime::machine::{Halt, Machine};
use serde::{Deserialize, Serialize};

/// Observable state of a machine at one point in time.
///
/// This is what a front-end renders between steps. It cannot be turned back
/// into a running machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub prog_pos: i64,
    pub data_pos: i64,
    pub step_count: u64,
    pub halt: Option<Halt>,
    /// `(address, byte)` over `[min_pos, max_pos]`.
    pub entries: Vec<(i64, u8)>,
    pub output: Vec<u8>,
    pub error: Vec<u8>,
}

impl Snapshot {
    pub fn capture(machine: &Machine) -> Self {
        Snapshot {
            prog_pos: machine.prog_pos(),
            data_pos: machine.data_pos(),
            step_count: machine.step_count(),
            halt: machine.halt(),
            entries: machine.entries(),
            output: machine.output().as_bytes().to_vec(),
            error: machine.error().as_bytes().to_vec(),
        }
    }

    pub fn min_pos(&self) -> Option<i64> {
        self.entries.first().map(|(addr, _)| *addr)
    }

    pub fn max_pos(&self) -> Option<i64> {
        self.entries.last().map(|(addr, _)| *addr)
    }

    /// Encode with postcard for handing to another process.
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::runtime_error::Fault;

    #[test]
    fn test_capture_fields() {
        let mut machine = Machine::new("<+.");
        machine.run_to_completion();
        let snapshot = machine.snapshot();

        assert_eq!(snapshot.prog_pos, 3);
        assert_eq!(snapshot.data_pos, -1);
        assert_eq!(snapshot.step_count, 4);
        assert_eq!(snapshot.halt, Some(Halt::End));
        assert_eq!(snapshot.output, vec![1]);
        assert_eq!(snapshot.min_pos(), Some(-1));
        assert_eq!(snapshot.max_pos(), Some(3));
    }

    #[test]
    fn test_postcard_encoding_preserves_fault() {
        let mut machine = Machine::new("+]");
        machine.run_to_completion();
        let snapshot = machine.snapshot();

        let bytes = snapshot.to_bytes().unwrap();
        let decoded = Snapshot::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.halt, Some(Halt::Fault(Fault::UnmatchedClose)));
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_truncated_bytes_are_rejected() {
        let snapshot = Machine::new("+").snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        assert!(Snapshot::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }
}
