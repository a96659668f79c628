//! Template matching over decoded tokens.
//!
//! Templates are tried in a fixed priority order and the first that matches
//! the whole token stream wins. Only `nulldata` tolerates trailing tokens.

use std::fmt;
use std::str::FromStr;

use s2a_primitives::ec::is_public_key;
use s2a_primitives::hash::HASH160_LEN;
use serde::{Deserialize, Serialize};

use crate::address::PayloadRole;
use crate::opcodes::Opcode;
use crate::token::{PushData, Token};
use crate::ScriptError;

/// The recognized script templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    PubKeyHash,
    ScriptHash,
    PubKey,
    Multisig,
    NullData,
    Unknown,
}

impl ScriptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptType::PubKeyHash => "pubkeyhash",
            ScriptType::ScriptHash => "scripthash",
            ScriptType::PubKey => "pubkey",
            ScriptType::Multisig => "multisig",
            ScriptType::NullData => "nulldata",
            ScriptType::Unknown => "unknown",
        }
    }

    /// How payloads extracted by this template become addresses.
    ///
    /// `None` for templates that carry no destination.
    pub fn payload_role(&self) -> Option<PayloadRole> {
        match self {
            ScriptType::PubKeyHash => Some(PayloadRole::PubKeyHash),
            ScriptType::ScriptHash => Some(PayloadRole::ScriptHash),
            ScriptType::PubKey | ScriptType::Multisig => Some(PayloadRole::PublicKey),
            ScriptType::NullData | ScriptType::Unknown => None,
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptType {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TEMPLATES
            .iter()
            .map(|(script_type, _)| *script_type)
            .chain(std::iter::once(ScriptType::Unknown))
            .find(|script_type| script_type.as_str() == s)
            .ok_or_else(|| ScriptError::UnknownScriptType(s.to_string()))
    }
}

/// A successful template match and the payloads it extracted, in script order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateMatch<'a> {
    pub script_type: ScriptType,
    pub payloads: Vec<&'a [u8]>,
}

type Matcher = fn(&[Token], bool) -> Option<Vec<&[u8]>>;

/// Templates in priority order.
const TEMPLATES: &[(ScriptType, Matcher)] = &[
    (ScriptType::PubKeyHash, match_pubkeyhash),
    (ScriptType::ScriptHash, match_scripthash),
    (ScriptType::NullData, match_nulldata),
    (ScriptType::PubKey, match_pubkey),
    (ScriptType::Multisig, match_multisig),
];

/// Match a token stream against the recognized templates.
///
/// `strict` requires every payload push to use its minimal encoding. Key
/// pushes are checked for shape only, never for curve validity.
///
/// # Returns
/// The first matching template, or `NoTemplateMatch`.
pub fn match_template(tokens: &[Token], strict: bool) -> Result<TemplateMatch<'_>, ScriptError> {
    for (script_type, matcher) in TEMPLATES {
        if let Some(payloads) = matcher(tokens, strict) {
            tracing::trace!(%script_type, payloads = payloads.len(), "template matched");
            return Ok(TemplateMatch { script_type: *script_type, payloads });
        }
        tracing::trace!(%script_type, "template did not match");
    }
    Err(ScriptError::NoTemplateMatch)
}

fn accepts_encoding(data: &PushData, strict: bool) -> bool {
    !strict || data.is_minimal()
}

fn hash_payload(data: &PushData, strict: bool) -> Option<&[u8]> {
    (data.len() == HASH160_LEN && accepts_encoding(data, strict)).then_some(data.as_slice())
}

fn key_payload(token: &Token, strict: bool) -> Option<&[u8]> {
    match token {
        Token::Data(data) if is_public_key(&data.bytes, false) && accepts_encoding(data, strict) => {
            Some(data.as_slice())
        }
        _ => None,
    }
}

fn match_pubkeyhash(tokens: &[Token], strict: bool) -> Option<Vec<&[u8]>> {
    match tokens {
        [Token::Opcode(Opcode::Dup), Token::Opcode(Opcode::Hash160), Token::Data(hash), Token::Opcode(Opcode::EqualVerify), Token::Opcode(Opcode::CheckSig)] => {
            hash_payload(hash, strict).map(|h| vec![h])
        }
        _ => None,
    }
}

fn match_scripthash(tokens: &[Token], strict: bool) -> Option<Vec<&[u8]>> {
    match tokens {
        [Token::Opcode(Opcode::Hash160), Token::Data(hash), Token::Opcode(Opcode::Equal)] => {
            hash_payload(hash, strict).map(|h| vec![h])
        }
        _ => None,
    }
}

fn match_nulldata(tokens: &[Token], _strict: bool) -> Option<Vec<&[u8]>> {
    match tokens {
        [Token::Opcode(Opcode::Return), ..] => Some(Vec::new()),
        _ => None,
    }
}

fn match_pubkey(tokens: &[Token], strict: bool) -> Option<Vec<&[u8]>> {
    match tokens {
        [key, Token::Opcode(Opcode::CheckSig)] => key_payload(key, strict).map(|k| vec![k]),
        _ => None,
    }
}

fn match_multisig(tokens: &[Token], strict: bool) -> Option<Vec<&[u8]>> {
    match tokens {
        [Token::Opcode(Opcode::Num(m)), keys @ .., Token::Opcode(Opcode::Num(n)), Token::Opcode(Opcode::CheckMultiSig)] => {
            let (m, n) = (usize::from(*m), usize::from(*n));
            if !(1..=16).contains(&n) || m == 0 || m > n || n != keys.len() {
                return None;
            }
            keys.iter().map(|key| key_payload(key, strict)).collect()
        }
        _ => None,
    }
}
