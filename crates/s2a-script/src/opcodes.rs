//! Opcode byte values and the operator identities templates care about.
//!
//! Only the operators that appear in a recognized template get a distinct
//! [`Opcode`] variant. Every other byte collapses to [`Opcode::Other`], which
//! no template can match.

use std::fmt;

pub const OP_0: u8 = 0x00;
pub const OP_FALSE: u8 = OP_0;
pub const OP_DATA_1: u8 = 0x01;
pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_33: u8 = 0x21;
pub const OP_DATA_65: u8 = 0x41;
pub const OP_DATA_75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_TRUE: u8 = OP_1;
pub const OP_2: u8 = 0x52;
pub const OP_3: u8 = 0x53;
pub const OP_16: u8 = 0x60;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKMULTISIG: u8 = 0xae;

/// The identity of a non-push operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Dup,
    Hash160,
    Equal,
    EqualVerify,
    CheckSig,
    CheckMultiSig,
    Return,
    /// `OP_1` through `OP_16`, carrying the value 1..=16.
    Num(u8),
    /// Any operator no template refers to, with its raw byte.
    Other(u8),
}

impl Opcode {
    /// Identify an operator byte.
    ///
    /// Push-data bytes (0x01..=0x4e) are handled by the decoder before this
    /// is reached; if passed here they come back as `Other`.
    pub fn from_byte(op: u8) -> Self {
        match op {
            OP_DUP => Opcode::Dup,
            OP_HASH160 => Opcode::Hash160,
            OP_EQUAL => Opcode::Equal,
            OP_EQUALVERIFY => Opcode::EqualVerify,
            OP_CHECKSIG => Opcode::CheckSig,
            OP_CHECKMULTISIG => Opcode::CheckMultiSig,
            OP_RETURN => Opcode::Return,
            OP_1..=OP_16 => Opcode::Num(op - OP_1 + 1),
            other => Opcode::Other(other),
        }
    }

    /// The `OP_n` operator for a small integer, or `None` outside 1..=16.
    pub fn small_int(n: u8) -> Option<Self> {
        (1..=16).contains(&n).then_some(Opcode::Num(n))
    }

    /// The byte this operator is encoded as.
    ///
    /// `None` for a `Num` carrying a value no `OP_n` operator can encode.
    pub fn to_byte(self) -> Option<u8> {
        let op = match self {
            Opcode::Dup => OP_DUP,
            Opcode::Hash160 => OP_HASH160,
            Opcode::Equal => OP_EQUAL,
            Opcode::EqualVerify => OP_EQUALVERIFY,
            Opcode::CheckSig => OP_CHECKSIG,
            Opcode::CheckMultiSig => OP_CHECKMULTISIG,
            Opcode::Return => OP_RETURN,
            Opcode::Num(n @ 1..=16) => OP_1 + n - 1,
            Opcode::Num(_) => return None,
            Opcode::Other(op) => op,
        };
        Some(op)
    }
}

impl fmt::Display for Opcode {
    /// Render the canonical `OP_xxx` name used in ASM output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Dup => f.write_str("OP_DUP"),
            Opcode::Hash160 => f.write_str("OP_HASH160"),
            Opcode::Equal => f.write_str("OP_EQUAL"),
            Opcode::EqualVerify => f.write_str("OP_EQUALVERIFY"),
            Opcode::CheckSig => f.write_str("OP_CHECKSIG"),
            Opcode::CheckMultiSig => f.write_str("OP_CHECKMULTISIG"),
            Opcode::Return => f.write_str("OP_RETURN"),
            Opcode::Num(n @ 1..=16) => write!(f, "OP_{n}"),
            Opcode::Num(n) => write!(f, "OP_INVALID_NUM_{n}"),
            Opcode::Other(OP_0) => f.write_str("OP_0"),
            Opcode::Other(OP_1NEGATE) => f.write_str("OP_1NEGATE"),
            Opcode::Other(op) => write!(f, "OP_UNKNOWN_{op:#04x}"),
        }
    }
}
