/// Unified error type for primitives operations.
///
/// Covers failures from hex and Base58 decoding, checksum verification,
/// and public key parsing.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}

impl From<bs58::decode::Error> for PrimitivesError {
    fn from(e: bs58::decode::Error) -> Self {
        PrimitivesError::InvalidBase58(e.to_string())
    }
}
