use thiserror::Error;

/// Malformed `\`-escape in source text. `offset` is the position of the
/// backslash in the source bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("Undefined escape sequence: \\{} at byte {offset}", printable(.byte))]
    UnknownEscape { offset: usize, byte: u8 },

    #[error("Undefined escape sequence: \\x needs two hex digits at byte {offset}")]
    InvalidHex { offset: usize },

    #[error("Undefined escape sequence: unexpected end of source at byte {offset}")]
    UnexpectedEof { offset: usize },
}

impl EscapeError {
    pub fn offset(&self) -> usize {
        match self {
            EscapeError::UnknownEscape { offset, .. }
            | EscapeError::InvalidHex { offset }
            | EscapeError::UnexpectedEof { offset } => *offset,
        }
    }
}

/// Decode escaped source bytes into initial tape contents.
///
/// `\0` is NUL, `\xHH` / `\XHH` is a hex byte, everything else is copied.
pub fn decode(source: &[u8]) -> Result<Vec<u8>, EscapeError> {
    Decoder::new(source).run()
}

struct Decoder<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn new(source: &'a [u8]) -> Self {
        Decoder { source, pos: 0 }
    }

    fn current(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.current();
        self.pos += 1;
        byte
    }

    fn run(mut self) -> Result<Vec<u8>, EscapeError> {
        let mut out = Vec::with_capacity(self.source.len());
        while let Some(byte) = self.advance() {
            if byte == b'\\' {
                out.push(self.read_escape()?);
            } else {
                out.push(byte);
            }
        }
        Ok(out)
    }

    // Called with `pos` just past the backslash.
    fn read_escape(&mut self) -> Result<u8, EscapeError> {
        let offset = self.pos - 1;
        match self.advance() {
            Some(b'0') => Ok(0),
            Some(b'x') | Some(b'X') => self.read_hex(offset),
            Some(byte) => Err(EscapeError::UnknownEscape { offset, byte }),
            None => Err(EscapeError::UnexpectedEof { offset }),
        }
    }

    fn read_hex(&mut self, offset: usize) -> Result<u8, EscapeError> {
        let digits = self
            .source
            .get(self.pos..self.pos + 2)
            .ok_or(EscapeError::UnexpectedEof { offset })?;
        let hi = hex_value(digits[0]).ok_or(EscapeError::InvalidHex { offset })?;
        let lo = hex_value(digits[1]).ok_or(EscapeError::InvalidHex { offset })?;
        self.pos += 2;
        Ok(hi << 4 | lo)
    }
}

fn printable(byte: &u8) -> String {
    char::from(*byte).escape_default().to_string()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_bytes_pass_through() {
        assert_eq!(decode(b"+[-]>.").unwrap(), b"+[-]>.".to_vec());
        assert_eq!(decode(b"").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_nul_escape() {
        assert_eq!(decode(br"+\0+").unwrap(), vec![b'+', 0, b'+']);
    }

    #[test]
    fn test_every_hex_pair() {
        for value in 0..=255u8 {
            for src in [format!("\\x{:02x}", value), format!("\\X{:02X}", value)] {
                assert_eq!(decode(src.as_bytes()).unwrap(), vec![value], "{}", src);
            }
        }
    }

    #[test]
    fn test_hex_consumes_exactly_two_digits() {
        assert_eq!(decode(br"\x414").unwrap(), vec![0x41, b'4']);
        assert_eq!(decode(br"\xfF\x00").unwrap(), vec![0xff, 0x00]);
    }

    #[test]
    fn test_unknown_escape() {
        let err = decode(br"ab\n").unwrap_err();
        assert_eq!(err, EscapeError::UnknownEscape { offset: 2, byte: b'n' });
        assert!(err.to_string().starts_with("Undefined escape sequence"));
    }

    #[test]
    fn test_backslash_is_not_self_escaping() {
        assert!(matches!(
            decode(br"\\"),
            Err(EscapeError::UnknownEscape { byte: b'\\', .. })
        ));
    }

    #[test]
    fn test_invalid_hex() {
        assert_eq!(decode(br"\xZZ").unwrap_err(), EscapeError::InvalidHex { offset: 0 });
        assert_eq!(decode(br"\x4g").unwrap_err(), EscapeError::InvalidHex { offset: 0 });
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(decode(br"+\").unwrap_err(), EscapeError::UnexpectedEof { offset: 1 });
        assert_eq!(decode(br"\x4").unwrap_err(), EscapeError::UnexpectedEof { offset: 0 });
        assert_eq!(decode(br"\x").unwrap_err().offset(), 0);
    }
}
