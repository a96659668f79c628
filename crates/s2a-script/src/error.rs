/// Error types for script operations.
///
/// None of these reach the caller of the top-level classifier: malformed
/// encodings, template misses and bad inputs all collapse to an `unknown`
/// classification. They surface only through the fallible building blocks.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A push declared more bytes than remain in the script.
    #[error("malformed push data at offset {offset}")]
    MalformedEncoding {
        /// Offset of the push opcode that ran past the end.
        offset: usize,
    },

    /// The token stream matched none of the recognized templates.
    #[error("no template match")]
    NoTemplateMatch,

    /// A script type name that is not one of the recognized templates.
    #[error("unknown script type '{0}'")]
    UnknownScriptType(String),

    /// The script was neither raw bytes nor a hex string.
    #[error("script must be a byte buffer or a hex string")]
    InvalidInputType,

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// A network name that is not in the built-in table.
    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Push data exceeds the largest length OP_PUSHDATA4 can declare.
    #[error("data too big")]
    DataTooBig,

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] s2a_primitives::PrimitivesError),
}
