/// Elliptic curve checks on secp256k1.
///
/// Provides structural classification of SEC1-style public key encodings
/// and full curve-point validation for the strict public key check.

pub mod public_key;

pub use public_key::{is_public_key, public_key_format, PublicKey, PublicKeyFormat};
