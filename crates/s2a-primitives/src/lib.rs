/// Primitives for script address extraction.
///
/// This crate provides the low-level building blocks the script classifier
/// relies on:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Base58 and Base58Check encoding/decoding
/// - secp256k1 public key shape and curve-point validation

pub mod hash;
pub mod base58;
pub mod ec;

mod error;
pub use error::PrimitivesError;
