/// Script type and the input boundary.
///
/// `Script` wraps the raw bytes of a locking script. `ScriptInput` is the
/// loosely typed form callers hand in (bytes, hex, or anything else); it is
/// normalized into a `Script` exactly once before classification.

use std::fmt;

use crate::classify::{classify, Classification, ClassifyOptions};
use crate::token::{decode_script, Token, Tokens};
use crate::ScriptError;

/// A transaction script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac"), either case.
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script(hex::decode(hex_str)?))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert the script to its ASM (human-readable assembly) representation.
    ///
    /// # Returns
    /// A space-separated ASM string. Returns an empty string for empty or
    /// malformed scripts.
    pub fn to_asm(&self) -> String {
        match self.decode() {
            Ok(tokens) => tokens
                .iter()
                .map(Token::to_asm_string)
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => String::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Decoding and classification
    // -----------------------------------------------------------------------

    /// Lazily decode the script into tokens.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(&self.0)
    }

    /// Decode the whole script into tokens.
    ///
    /// # Returns
    /// The tokens, or `MalformedEncoding` if a push runs past the end.
    pub fn decode(&self) -> Result<Vec<Token>, ScriptError> {
        decode_script(&self.0)
    }

    /// Classify the script and derive its addresses.
    pub fn classify(&self, options: &ClassifyOptions) -> Classification {
        classify(&self.0, options)
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Input boundary
// ---------------------------------------------------------------------------

/// A script as supplied by a caller, before normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptInput {
    /// Raw script bytes.
    Bytes(Vec<u8>),
    /// Hex-encoded script bytes.
    Hex(String),
    /// Absent, or of a type that cannot hold a script.
    Invalid,
}

impl ScriptInput {
    /// Normalize into a `Script`.
    ///
    /// # Returns
    /// The script, `HexDecode` for bad hex, or `InvalidInputType`.
    pub fn into_script(self) -> Result<Script, ScriptError> {
        match self {
            ScriptInput::Bytes(bytes) => Ok(Script(bytes)),
            ScriptInput::Hex(hex_str) => Script::from_hex(&hex_str),
            ScriptInput::Invalid => Err(ScriptError::InvalidInputType),
        }
    }
}

impl From<&[u8]> for ScriptInput {
    fn from(bytes: &[u8]) -> Self {
        ScriptInput::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ScriptInput {
    fn from(bytes: &[u8; N]) -> Self {
        ScriptInput::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for ScriptInput {
    fn from(bytes: Vec<u8>) -> Self {
        ScriptInput::Bytes(bytes)
    }
}

impl From<&Vec<u8>> for ScriptInput {
    fn from(bytes: &Vec<u8>) -> Self {
        ScriptInput::Bytes(bytes.clone())
    }
}

impl From<&str> for ScriptInput {
    fn from(hex_str: &str) -> Self {
        ScriptInput::Hex(hex_str.to_string())
    }
}

impl From<String> for ScriptInput {
    fn from(hex_str: String) -> Self {
        ScriptInput::Hex(hex_str)
    }
}

impl From<Script> for ScriptInput {
    fn from(script: Script) -> Self {
        ScriptInput::Bytes(script.0)
    }
}

impl From<&Script> for ScriptInput {
    fn from(script: &Script) -> Self {
        ScriptInput::Bytes(script.0.clone())
    }
}

impl<T: Into<ScriptInput>> From<Option<T>> for ScriptInput {
    fn from(input: Option<T>) -> Self {
        input.map_or(ScriptInput::Invalid, Into::into)
    }
}

impl From<serde_json::Value> for ScriptInput {
    /// Strings are hex; arrays of integers 0..=255 are bytes; anything else
    /// cannot be a script.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(hex_str) => ScriptInput::Hex(hex_str),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect::<Option<Vec<u8>>>()
                .map_or(ScriptInput::Invalid, ScriptInput::Bytes),
            _ => ScriptInput::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the Script type and input normalization.

    use super::*;
    use crate::opcodes::*;
    use crate::test_support::ScriptBuilder;

    const P2PKH_HEX: &str = "76a914e2a623699e81b291c0327f408fea765d534baa2a88ac";

    // -----------------------------------------------------------------------
    // Construction & roundtrip tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_from_hex_roundtrip() {
        let script = Script::from_hex(P2PKH_HEX).expect("valid hex should parse");
        assert_eq!(script.to_hex(), P2PKH_HEX);
        assert_eq!(script.len(), 25);
    }

    #[test]
    fn test_from_hex_uppercase() {
        let script = Script::from_hex(&P2PKH_HEX.to_uppercase()).expect("uppercase hex");
        assert_eq!(script.to_hex(), P2PKH_HEX);
    }

    #[test]
    fn test_from_hex_empty() {
        let script = Script::from_hex("").expect("empty hex should parse");
        assert!(script.is_empty());
        assert_eq!(script, Script::default());
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(matches!(Script::from_hex("ZZZZ"), Err(ScriptError::HexDecode(_))));
        assert!(Script::from_hex("abc").is_err());
    }

    // -----------------------------------------------------------------------
    // ASM / tokens
    // -----------------------------------------------------------------------

    #[test]
    fn test_to_asm_p2pkh() {
        let script = Script::from_hex(P2PKH_HEX).unwrap();
        assert_eq!(
            script.to_asm(),
            "OP_DUP OP_HASH160 e2a623699e81b291c0327f408fea765d534baa2a OP_EQUALVERIFY OP_CHECKSIG"
        );
    }

    #[test]
    fn test_to_asm_malformed_is_empty() {
        let script = Script::from_bytes(&[OP_DUP, 0x05, 0x00]);
        assert_eq!(script.to_asm(), "");
        assert!(script.decode().is_err());
    }

    #[test]
    fn test_op_false_op_return_asm() {
        let script = Script::from_bytes(
            &ScriptBuilder::new().ops(&[OP_FALSE, OP_RETURN]).push(b"hi").build(),
        );
        assert_eq!(script.to_asm(), "OP_0 OP_RETURN 6869");
    }

    #[test]
    fn test_tokens_matches_decode() {
        let script = Script::from_hex(P2PKH_HEX).unwrap();
        let lazy: Vec<Token> = script.tokens().collect::<Result<_, _>>().unwrap();
        assert_eq!(lazy, script.decode().unwrap());
    }

    // -----------------------------------------------------------------------
    // Serialization (JSON)
    // -----------------------------------------------------------------------

    #[test]
    fn test_serde_roundtrip() {
        let script = Script::from_hex(P2PKH_HEX).unwrap();
        let json_str = serde_json::to_string(&script).expect("should serialize");
        assert_eq!(json_str, format!("\"{P2PKH_HEX}\""));
        let back: Script = serde_json::from_str(&json_str).expect("should deserialize");
        assert_eq!(back, script);
    }

    #[test]
    fn test_serde_deserialize_invalid_hex() {
        assert!(serde_json::from_str::<Script>(r#""xyz""#).is_err());
    }

    #[test]
    fn test_display_and_debug() {
        let script = Script::from_bytes(&[OP_RETURN]);
        assert_eq!(format!("{script}"), "6a");
        assert_eq!(format!("{script:?}"), "Script(6a)");
    }

    // -----------------------------------------------------------------------
    // ScriptInput
    // -----------------------------------------------------------------------

    #[test]
    fn test_input_bytes_and_hex_agree() {
        let from_hex = ScriptInput::from(P2PKH_HEX).into_script().unwrap();
        let bytes = hex::decode(P2PKH_HEX).unwrap();
        let from_bytes = ScriptInput::from(bytes.as_slice()).into_script().unwrap();
        assert_eq!(from_hex, from_bytes);
    }

    #[test]
    fn test_input_absent() {
        let input = ScriptInput::from(None::<&str>);
        assert_eq!(input, ScriptInput::Invalid);
        assert!(matches!(input.into_script(), Err(ScriptError::InvalidInputType)));
    }

    #[test]
    fn test_input_from_json() {
        use serde_json::json;

        assert_eq!(ScriptInput::from(json!("6a")), ScriptInput::Hex("6a".to_string()));
        assert_eq!(ScriptInput::from(json!([106, 0])), ScriptInput::Bytes(vec![0x6a, 0x00]));
        assert_eq!(ScriptInput::from(json!([106, 256])), ScriptInput::Invalid);
        assert_eq!(ScriptInput::from(json!(42)), ScriptInput::Invalid);
        assert_eq!(ScriptInput::from(json!(null)), ScriptInput::Invalid);
        assert_eq!(ScriptInput::from(json!({"hex": "6a"})), ScriptInput::Invalid);
        assert_eq!(ScriptInput::from(json!(true)), ScriptInput::Invalid);
    }
}
