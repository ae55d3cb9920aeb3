use crate::lang::command::Command;
use crate::runtime::machine::Machine;
use std::fmt::Write;

pub struct TapeDumper {
    pub color: bool,
    pub show_hex: bool, // if false, only the printable/command column is shown
}

impl Default for TapeDumper {
    fn default() -> Self {
        Self {
            color: true,
            show_hex: true,
        }
    }
}

impl TapeDumper {
    // ANSI colors
    const RESET: &'static str = "\x1b[0m";
    const DIM: &'static str = "\x1b[2m";
    const GRN: &'static str = "\x1b[32m";
    const YEL: &'static str = "\x1b[33m";
    const CYN: &'static str = "\x1b[36m";
    const MAG: &'static str = "\x1b[35m";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn compact(mut self) -> Self {
        self.show_hex = false;
        self
    }

    /// One row per tracked address, with `P`/`D` marking the pointers.
    pub fn render(&self, machine: &Machine) -> String {
        let mut out = String::new();
        for (addr, byte) in machine.entries() {
            let marker = match (addr == machine.prog_pos(), addr == machine.data_pos()) {
                (true, true) => "PD",
                (true, false) => "P ",
                (false, true) => " D",
                (false, false) => "  ",
            };
            let (colr, reset) = self.paint(byte);

            if self.show_hex {
                let _ = writeln!(
                    out,
                    "{} [{:>6}] {}0x{:02x} {:<6} {}{}",
                    marker,
                    addr,
                    colr,
                    byte,
                    self.label(byte),
                    Self::glyph(byte),
                    reset
                );
            } else {
                let _ = writeln!(out, "{} [{:>6}] {}{}{}", marker, addr, colr, Self::glyph(byte), reset);
            }
        }
        out
    }

    /// Single-line view for per-step tracing: the program pointer's cell is
    /// wrapped in `()` and the data pointer's in `{}`.
    pub fn trace_line(&self, machine: &Machine) -> String {
        let mut line = format!(
            "#{:<6} p={:<5} d={:<5} ",
            machine.step_count(),
            machine.prog_pos(),
            machine.data_pos()
        );
        for (addr, byte) in machine.entries() {
            let glyph = Self::glyph(byte);
            let (colr, reset) = self.paint(byte);
            let cell = match (addr == machine.prog_pos(), addr == machine.data_pos()) {
                (true, true) => format!("({{{}}})", glyph),
                (true, false) => format!("({})", glyph),
                (false, true) => format!("{{{}}}", glyph),
                (false, false) => glyph,
            };
            line.push_str(colr);
            line.push_str(&cell);
            line.push_str(reset);
        }
        line
    }

    fn label(&self, byte: u8) -> &'static str {
        match Command::from_byte(byte) {
            Some(cmd) => cmd.name(),
            None => "",
        }
    }

    fn glyph(byte: u8) -> String {
        match Command::from_byte(byte) {
            Some(cmd) => cmd.symbol().to_string(),
            None if byte.is_ascii_graphic() => char::from(byte).to_string(),
            None => "·".to_string(),
        }
    }

    fn paint(&self, byte: u8) -> (&'static str, &'static str) {
        if !self.color {
            return ("", "");
        }
        let colr = match Command::from_byte(byte) {
            Some(Command::End) => Self::DIM,
            Some(Command::Open | Command::Close) => Self::YEL,
            Some(Command::Get | Command::Put) => Self::GRN,
            Some(Command::Inc | Command::Dec) => Self::MAG,
            Some(Command::Fwd | Command::Bwd) => Self::CYN,
            None => Self::RESET,
        };
        (colr, Self::RESET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_pointers() {
        let mut machine = Machine::new("+a");
        let dumper = TapeDumper::new().no_color();
        let before = dumper.render(&machine);
        assert_eq!(before.lines().count(), 2);
        assert!(before.lines().next().unwrap().starts_with(" D [     0] 0x2b INC"));

        machine.step();
        let after = dumper.render(&machine);
        assert!(after.lines().next().unwrap().starts_with("PD [     0] 0x2c GET"));
        assert!(after.lines().nth(1).unwrap().contains("0x61"));
    }

    #[test]
    fn test_compact_render() {
        let machine = Machine::new(">");
        let out = TapeDumper::new().no_color().compact().render(&machine);
        assert_eq!(out, " D [     0] >\n");
    }

    #[test]
    fn test_trace_line() {
        let mut machine = Machine::new(">x");
        machine.step();
        let line = TapeDumper::new().no_color().trace_line(&machine);
        assert!(line.starts_with("#1 "));
        assert!(line.ends_with("(>){x}"));
    }

    #[test]
    fn test_color_wraps_cells() {
        let machine = Machine::new("[");
        let out = TapeDumper::new().render(&machine);
        assert!(out.contains(TapeDumper::YEL));
        assert!(out.contains(TapeDumper::RESET));
    }
}
