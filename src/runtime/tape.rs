use std::collections::VecDeque;

/// Unified program/data memory.
///
/// Addresses span all of `i64`. Storage only covers addresses that were
/// written, growing at either end; everything else reads as 0. `min_pos` and
/// `max_pos` are the inclusive bounds of the range the machine has touched
/// and only ever widen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<u8>,
    // Address of `cells[0]`.
    base: i64,
    min_pos: i64,
    max_pos: i64,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// An empty tape. Bounds start as `[0, 0]`.
    pub fn new() -> Self {
        Tape {
            cells: VecDeque::new(),
            base: 0,
            min_pos: 0,
            max_pos: 0,
        }
    }

    /// A tape holding `program` at addresses `0..program.len()`.
    pub fn with_program(program: &[u8]) -> Self {
        Tape {
            cells: program.iter().copied().collect(),
            base: 0,
            min_pos: 0,
            max_pos: (program.len() as i64 - 1).max(0),
        }
    }

    pub fn min_pos(&self) -> i64 {
        self.min_pos
    }

    pub fn max_pos(&self) -> i64 {
        self.max_pos
    }

    pub fn get(&self, addr: i64) -> u8 {
        self.index(addr)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(0)
    }

    pub fn set(&mut self, addr: i64, value: u8) {
        *self.cell_mut(addr) = value;
    }

    pub fn cell_mut(&mut self, addr: i64) -> &mut u8 {
        let i = self.reserve(addr);
        &mut self.cells[i]
    }

    /// Widen the tracked bounds to include `addr`.
    pub fn widen(&mut self, addr: i64) {
        self.min_pos = self.min_pos.min(addr);
        self.max_pos = self.max_pos.max(addr);
    }

    /// Back `addr` with storage and widen the tracked bounds to include it.
    pub fn touch(&mut self, addr: i64) {
        self.reserve(addr);
        self.widen(addr);
    }

    /// `(address, byte)` for every address in `[min_pos, max_pos]`.
    pub fn entries(&self) -> Vec<(i64, u8)> {
        (self.min_pos..=self.max_pos)
            .map(|addr| (addr, self.get(addr)))
            .collect()
    }

    fn index(&self, addr: i64) -> Option<usize> {
        let offset = addr.checked_sub(self.base)?;
        usize::try_from(offset).ok()
    }

    // Grow storage so `addr` is backed, returning its index.
    fn reserve(&mut self, addr: i64) -> usize {
        if self.cells.is_empty() {
            self.base = addr;
        }
        if addr < self.base {
            for _ in addr..self.base {
                self.cells.push_front(0);
            }
            self.base = addr;
        }
        let i = (addr - self.base) as usize;
        if i >= self.cells.len() {
            self.cells.resize(i + 1, 0);
        }
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_reads_zero() {
        let tape = Tape::new();
        assert_eq!(tape.get(0), 0);
        assert_eq!(tape.get(-1_000_000), 0);
        assert_eq!(tape.get(i64::MAX), 0);
    }

    #[test]
    fn test_program_bounds() {
        let tape = Tape::with_program(b"+-.");
        assert_eq!((tape.min_pos(), tape.max_pos()), (0, 2));
        assert_eq!(tape.entries(), vec![(0, b'+'), (1, b'-'), (2, b'.')]);
    }

    #[test]
    fn test_empty_program_bounds_are_zero() {
        let tape = Tape::with_program(b"");
        assert_eq!((tape.min_pos(), tape.max_pos()), (0, 0));
        assert_eq!(tape.entries(), vec![(0, 0)]);
    }

    #[test]
    fn test_grows_in_both_directions() {
        let mut tape = Tape::with_program(b"ab");
        tape.set(-3, 7);
        tape.set(10, 9);

        assert_eq!(tape.get(-3), 7);
        assert_eq!(tape.get(-2), 0);
        assert_eq!(tape.get(0), b'a');
        assert_eq!(tape.get(1), b'b');
        assert_eq!(tape.get(10), 9);
    }

    #[test]
    fn test_writes_do_not_widen_bounds() {
        let mut tape = Tape::new();
        tape.set(5, 1);
        assert_eq!(tape.max_pos(), 0);

        tape.widen(5);
        tape.widen(-2);
        assert_eq!((tape.min_pos(), tape.max_pos()), (-2, 5));
        assert_eq!(tape.entries().len(), 8);
    }

    #[test]
    fn test_bounds_never_shrink() {
        let mut tape = Tape::with_program(b"xyz");
        tape.widen(1);
        assert_eq!((tape.min_pos(), tape.max_pos()), (0, 2));
    }

    #[test]
    fn test_touch_extends_max() {
        let mut tape = Tape::with_program(b"+");
        tape.touch(1);
        assert_eq!(tape.max_pos(), 1);
        assert_eq!(tape.entries(), vec![(0, b'+'), (1, 0)]);

        tape.touch(-2);
        assert_eq!(tape.min_pos(), -2);
    }

    #[test]
    fn test_first_write_on_empty_tape_far_away() {
        let mut tape = Tape::new();
        *tape.cell_mut(-40) = 3;
        assert_eq!(tape.get(-40), 3);
        assert_eq!(tape.get(0), 0);
    }
}
