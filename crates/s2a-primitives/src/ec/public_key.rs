//! secp256k1 public key validation.
//!
//! A candidate is first classified by length and prefix byte alone. The
//! strict check then asks whether the bytes describe a genuine curve point:
//! `x` and `y` must be below the field prime, `y² = x³ + 7` must hold, and a
//! hybrid key's prefix must agree with the parity of the `y` it carries.
//! The field arithmetic itself is delegated to `k256`.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;

use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed or hybrid public key in bytes (prefix + x + y).
pub const UNCOMPRESSED_LEN: usize = 65;

const PREFIX_EVEN: u8 = 0x02;
const PREFIX_ODD: u8 = 0x03;
const PREFIX_UNCOMPRESSED: u8 = 0x04;
const PREFIX_HYBRID_EVEN: u8 = 0x06;
const PREFIX_HYBRID_ODD: u8 = 0x07;

/// The encoding family of a structurally valid public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublicKeyFormat {
    /// 33 bytes, prefix 0x02 or 0x03; `y` is implied by the prefix.
    Compressed,
    /// 65 bytes, prefix 0x04.
    Uncompressed,
    /// 65 bytes, prefix 0x06 or 0x07; carries `y` and repeats its parity in the prefix.
    Hybrid,
}

/// Classify a candidate by length and prefix byte only.
///
/// # Returns
/// The encoding family, or `None` when the length/prefix pair is not one of
/// the recognized shapes.
pub fn public_key_format(bytes: &[u8]) -> Option<PublicKeyFormat> {
    match (bytes.len(), bytes.first().copied()?) {
        (COMPRESSED_LEN, PREFIX_EVEN | PREFIX_ODD) => Some(PublicKeyFormat::Compressed),
        (UNCOMPRESSED_LEN, PREFIX_UNCOMPRESSED) => Some(PublicKeyFormat::Uncompressed),
        (UNCOMPRESSED_LEN, PREFIX_HYBRID_EVEN | PREFIX_HYBRID_ODD) => {
            Some(PublicKeyFormat::Hybrid)
        }
        _ => None,
    }
}

/// Decide whether `bytes` is a public key.
///
/// With `strict == false` only the length and prefix are checked. With
/// `strict == true` the bytes must also encode a point on secp256k1.
/// Never panics; malformed input yields `false`.
///
/// # Arguments
/// * `bytes` - The candidate key bytes.
/// * `strict` - Whether to require a genuine curve point.
pub fn is_public_key(bytes: &[u8], strict: bool) -> bool {
    if public_key_format(bytes).is_none() {
        return false;
    }
    !strict || PublicKey::from_bytes(bytes).is_ok()
}

/// A public key whose encoding has been checked against the curve.
///
/// Accepts compressed, uncompressed and hybrid encodings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: k256::PublicKey,
    format: PublicKeyFormat,
}

impl PublicKey {
    /// Parse and curve-check a SEC1 public key, including hybrid encodings.
    ///
    /// # Returns
    /// `Ok(PublicKey)` for a genuine point, or an error naming what failed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let format = public_key_format(bytes).ok_or_else(|| {
            PrimitivesError::InvalidPublicKey(format!(
                "unrecognized length {} or prefix",
                bytes.len()
            ))
        })?;

        let inner = match format {
            PublicKeyFormat::Compressed | PublicKeyFormat::Uncompressed => {
                k256::PublicKey::from_sec1_bytes(bytes)
            }
            PublicKeyFormat::Hybrid => {
                // The prefix low bit must equal the parity of the carried y.
                if bytes[0] & 1 != bytes[UNCOMPRESSED_LEN - 1] & 1 {
                    return Err(PrimitivesError::InvalidPublicKey(
                        "hybrid prefix does not match y parity".to_string(),
                    ));
                }
                let mut uncompressed = [0u8; UNCOMPRESSED_LEN];
                uncompressed.copy_from_slice(bytes);
                uncompressed[0] = PREFIX_UNCOMPRESSED;
                k256::PublicKey::from_sec1_bytes(&uncompressed)
            }
        }
        .map_err(|_| PrimitivesError::InvalidPublicKey("point not on curve".to_string()))?;

        Ok(PublicKey { inner, format })
    }

    /// Parse a hex-encoded public key.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// The encoding family the key was parsed from.
    pub fn format(&self) -> PublicKeyFormat {
        self.format
    }

    /// Serialize the key in compressed SEC1 format (33 bytes).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the key in uncompressed SEC1 format (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Hash160 of the compressed encoding.
    ///
    /// Note that scripts commit to the exact bytes they carry, so the hash
    /// of an uncompressed key in a script differs from this value.
    pub fn compressed_hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }
}

impl fmt::Display for PublicKey {
    /// Display the key as compressed hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_compressed()))
    }
}
