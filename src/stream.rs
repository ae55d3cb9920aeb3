use serde::{Deserialize, Serialize};

/// FIFO byte queue used for the input, output and error channels.
///
/// Production only ever appends. Consumption (`shift`) advances a read
/// cursor, so the unconsumed tail is always available as one slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteStream {
    buffer: Vec<u8>,
    head: usize,
}

impl ByteStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Append the UTF-8 encoding of `data`, byte for byte.
    pub fn append_str(&mut self, data: &str) {
        self.append_bytes(data.as_bytes());
    }

    pub fn push(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    /// Pop the oldest unconsumed byte.
    pub fn shift(&mut self) -> Option<u8> {
        let byte = self.buffer.get(self.head).copied()?;
        self.head += 1;
        Some(byte)
    }

    pub fn len(&self) -> usize {
        self.buffer.len() - self.head
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unconsumed bytes, oldest first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[self.head..]
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }
}

impl std::fmt::Display for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}
