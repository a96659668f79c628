//! Push-data decoding.
//!
//! Raw script bytes are turned into a stream of [`Token`]s: either an
//! operator or a chunk of pushed data together with the way its length was
//! encoded. The encoding is kept so callers can insist on minimal pushes.

use std::fmt;

use crate::opcodes::*;
use crate::ScriptError;

/// How the length of a data push was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PushEncoding {
    /// Opcode 0x01..=0x4b is itself the length.
    Direct,
    /// OP_PUSHDATA1 followed by a 1-byte length.
    PushData1,
    /// OP_PUSHDATA2 followed by a 2-byte little-endian length.
    PushData2,
    /// OP_PUSHDATA4 followed by a 4-byte little-endian length.
    PushData4,
}

impl PushEncoding {
    /// The shortest encoding able to express a push of `len` bytes.
    pub fn minimal_for(len: usize) -> Option<Self> {
        if len <= OP_DATA_75 as usize {
            Some(PushEncoding::Direct)
        } else if len <= 0xff {
            Some(PushEncoding::PushData1)
        } else if len <= 0xffff {
            Some(PushEncoding::PushData2)
        } else if len <= 0xffff_ffff {
            Some(PushEncoding::PushData4)
        } else {
            None
        }
    }
}

/// A chunk of pushed data.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PushData {
    /// The pushed bytes.
    pub bytes: Vec<u8>,
    /// How the push length was encoded.
    pub encoding: PushEncoding,
}

impl PushData {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether this push uses the canonical (shortest) encoding.
    ///
    /// Empty pushes must be `OP_0`, and single bytes 1..=16 and 0x81 must use
    /// `OP_1..OP_16` and `OP_1NEGATE`; none of those decode to data tokens,
    /// so data tokens carrying them are never minimal.
    pub fn is_minimal(&self) -> bool {
        match self.bytes.as_slice() {
            [] => false,
            [b] if (1..=16).contains(b) || *b == 0x81 => false,
            bytes => PushEncoding::minimal_for(bytes.len()) == Some(self.encoding),
        }
    }
}

impl fmt::Debug for PushData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PushData({:?}, {})", self.encoding, hex::encode(&self.bytes))
    }
}

/// A single decoded element of a script.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Opcode(Opcode),
    Data(PushData),
}

impl Token {
    /// Render the token for ASM output: data as hex, operators by name.
    pub fn to_asm_string(&self) -> String {
        match self {
            Token::Opcode(op) => op.to_string(),
            Token::Data(data) => hex::encode(&data.bytes),
        }
    }
}

/// A single forward pass over script bytes.
///
/// Yields `Err(MalformedEncoding)` at most once, when a push would read past
/// the end of the buffer, and yields nothing after that.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    bytes: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Tokens { bytes, pos: 0, done: false }
    }

    /// Take `n` bytes from the current position, or `None` if fewer remain.
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn read_length(&mut self, width: usize) -> Option<usize> {
        let raw = self.take(width)?;
        let mut buf = [0u8; 4];
        buf[..width].copy_from_slice(raw);
        usize::try_from(u32::from_le_bytes(buf)).ok()
    }

    fn read_token(&mut self, op: u8) -> Option<Token> {
        let (length, encoding) = match op {
            OP_DATA_1..=OP_DATA_75 => (op as usize, PushEncoding::Direct),
            OP_PUSHDATA1 => (self.read_length(1)?, PushEncoding::PushData1),
            OP_PUSHDATA2 => (self.read_length(2)?, PushEncoding::PushData2),
            OP_PUSHDATA4 => (self.read_length(4)?, PushEncoding::PushData4),
            _ => return Some(Token::Opcode(Opcode::from_byte(op))),
        };
        let bytes = self.take(length)?.to_vec();
        Some(Token::Data(PushData { bytes, encoding }))
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, ScriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let offset = self.pos;
        let Some(&op) = self.bytes.get(offset) else {
            self.done = true;
            return None;
        };
        self.pos += 1;
        match self.read_token(op) {
            Some(token) => Some(Ok(token)),
            None => {
                self.done = true;
                Some(Err(ScriptError::MalformedEncoding { offset }))
            }
        }
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

/// Decode raw script bytes into a vector of tokens.
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// The tokens in script order, or `MalformedEncoding` if a push is truncated.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<Token>, ScriptError> {
    Tokens::new(bytes).collect()
}

/// Compute the minimal OP_PUSHDATA prefix bytes for a payload of the given length.
///
/// # Returns
/// The prefix to place before the data, or `DataTooBig` beyond 4 GiB.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    let prefix = match PushEncoding::minimal_for(data_len).ok_or(ScriptError::DataTooBig)? {
        PushEncoding::Direct => vec![data_len as u8],
        PushEncoding::PushData1 => vec![OP_PUSHDATA1, data_len as u8],
        PushEncoding::PushData2 => {
            let mut buf = vec![OP_PUSHDATA2];
            buf.extend_from_slice(&(data_len as u16).to_le_bytes());
            buf
        }
        PushEncoding::PushData4 => {
            let mut buf = vec![OP_PUSHDATA4];
            buf.extend_from_slice(&(data_len as u32).to_le_bytes());
            buf
        }
    };
    Ok(prefix)
}
