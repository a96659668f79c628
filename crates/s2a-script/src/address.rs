/// Address derivation and network version bytes.
///
/// Payloads extracted from a script are turned into Base58Check strings.
/// Hash payloads (pubkeyhash, scripthash) are used as-is; public keys are
/// first hashed with Hash160 and reported as pay-to-pubkey-hash addresses.

use std::fmt;
use std::str::FromStr;

use s2a_primitives::base58;
use s2a_primitives::hash::{hash160, HASH160_LEN};
use serde::{Deserialize, Serialize};

use crate::ScriptError;

/// Version bytes selecting the address prefix for one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NetworkSpec")]
pub struct Network {
    /// Version byte for pay-to-pubkey-hash addresses.
    pub pub_key_hash_version: u8,
    /// Version byte for pay-to-script-hash addresses.
    pub script_hash_version: u8,
}

impl Network {
    pub const MAINNET: Network = Network::new(0x00, 0x05);
    pub const TESTNET: Network = Network::new(0x6f, 0xc4);
    pub const REGTEST: Network = Network::new(0x6f, 0xc4);
    pub const LITECOIN: Network = Network::new(0x30, 0x32);
    pub const DOGECOIN: Network = Network::new(0x1e, 0x16);

    pub const fn new(pub_key_hash_version: u8, script_hash_version: u8) -> Self {
        Network { pub_key_hash_version, script_hash_version }
    }

    /// Look up a network by name (case-insensitive).
    ///
    /// # Returns
    /// The network's version bytes, or `None` for names not in the table.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        NETWORKS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, network)| *network)
    }

    /// The version byte used for an address of the given kind.
    pub fn version(&self, kind: AddressKind) -> u8 {
        match kind {
            AddressKind::PubKeyHash => self.pub_key_hash_version,
            AddressKind::ScriptHash => self.script_hash_version,
        }
    }
}

/// Built-in networks, keyed by every accepted name.
static NETWORKS: &[(&str, Network)] = &[
    ("mainnet", Network::MAINNET),
    ("bitcoin", Network::MAINNET),
    ("main", Network::MAINNET),
    ("testnet", Network::TESTNET),
    ("test", Network::TESTNET),
    ("regtest", Network::REGTEST),
    ("litecoin", Network::LITECOIN),
    ("dogecoin", Network::DOGECOIN),
];

impl Default for Network {
    fn default() -> Self {
        Network::MAINNET
    }
}

impl FromStr for Network {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::from_name(s).ok_or_else(|| ScriptError::UnknownNetwork(s.to_string()))
    }
}

/// A network as callers supply it: a name or explicit version bytes.
///
/// Deserializes from either `"testnet"` or
/// `{ "pubKeyHashVersion": 111, "scriptHashVersion": 196 }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkSpec {
    Named(String),
    #[serde(rename_all = "camelCase")]
    Versions {
        pub_key_hash_version: u8,
        script_hash_version: u8,
    },
}

impl NetworkSpec {
    /// Resolve to concrete version bytes.
    pub fn resolve(&self) -> Result<Network, ScriptError> {
        match self {
            NetworkSpec::Named(name) => name.parse(),
            NetworkSpec::Versions { pub_key_hash_version, script_hash_version } => {
                Ok(Network::new(*pub_key_hash_version, *script_hash_version))
            }
        }
    }
}

impl TryFrom<NetworkSpec> for Network {
    type Error = ScriptError;

    fn try_from(spec: NetworkSpec) -> Result<Self, Self::Error> {
        spec.resolve()
    }
}

impl From<Network> for NetworkSpec {
    fn from(network: Network) -> Self {
        NetworkSpec::Versions {
            pub_key_hash_version: network.pub_key_hash_version,
            script_hash_version: network.script_hash_version,
        }
    }
}

impl From<&str> for NetworkSpec {
    fn from(name: &str) -> Self {
        NetworkSpec::Named(name.to_string())
    }
}

impl From<String> for NetworkSpec {
    fn from(name: String) -> Self {
        NetworkSpec::Named(name)
    }
}

/// The two address families a Base58Check address can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    PubKeyHash,
    ScriptHash,
}

/// What an extracted payload represents, which decides how it is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayloadRole {
    /// A 20-byte public key hash, encoded with the pubkey-hash version.
    PubKeyHash,
    /// A 20-byte script hash, encoded with the script-hash version.
    ScriptHash,
    /// A serialized public key; hashed with Hash160 first.
    PublicKey,
}

/// Encode an extracted payload as an address string.
///
/// # Arguments
/// * `payload` - The hash or public key bytes taken from the script.
/// * `role` - What the payload is.
/// * `network` - Version bytes to use.
///
/// # Returns
/// The Base58Check address.
pub fn encode_address(payload: &[u8], role: PayloadRole, network: &Network) -> String {
    match role {
        PayloadRole::PubKeyHash => {
            base58::check_encode_versioned(network.pub_key_hash_version, payload)
        }
        PayloadRole::ScriptHash => {
            base58::check_encode_versioned(network.script_hash_version, payload)
        }
        PayloadRole::PublicKey => {
            base58::check_encode_versioned(network.pub_key_hash_version, &hash160(payload))
        }
    }
}

/// A decoded Base58Check address.
///
/// Contains the 20-byte hash and the family it belongs to on a given network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// The 20-byte hash the address commits to.
    pub hash: [u8; HASH160_LEN],
    /// Whether the hash is of a public key or of a script.
    pub kind: AddressKind,
}

impl Address {
    /// Parse a Base58Check address for the given network.
    ///
    /// Validates the checksum and length, and determines the kind from the
    /// version byte.
    ///
    /// # Returns
    /// An `Address`, or an error if the string is invalid or its version
    /// byte belongs to neither family of `network`.
    pub fn from_string(addr: &str, network: &Network) -> Result<Self, ScriptError> {
        let decoded = base58::check_decode(addr)?;
        let (&version, hash_bytes) = decoded
            .split_first()
            .ok_or_else(|| ScriptError::InvalidAddress(addr.to_string()))?;
        let hash: [u8; HASH160_LEN] = hash_bytes
            .try_into()
            .map_err(|_| ScriptError::InvalidAddress(format!("invalid length for '{addr}'")))?;

        // Testnet-style tables may share a byte; pubkey-hash wins.
        let kind = if version == network.pub_key_hash_version {
            AddressKind::PubKeyHash
        } else if version == network.script_hash_version {
            AddressKind::ScriptHash
        } else {
            return Err(ScriptError::InvalidAddress(format!(
                "version {version:#04x} not used by network"
            )));
        };

        Ok(Address { address_string: addr.to_string(), hash, kind })
    }

    /// Create an address from a 20-byte hash.
    pub fn from_hash(hash: [u8; HASH160_LEN], kind: AddressKind, network: &Network) -> Self {
        let address_string = base58::check_encode_versioned(network.version(kind), &hash);
        Address { address_string, hash, kind }
    }

    /// Create the pay-to-pubkey-hash address of a serialized public key.
    ///
    /// The key bytes are hashed exactly as given, so compressed and
    /// uncompressed encodings of one point give different addresses.
    pub fn from_public_key(public_key: &[u8], network: &Network) -> Self {
        Self::from_hash(hash160(public_key), AddressKind::PubKeyHash, network)
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}

#[cfg(test)]
mod tests {
    //! Tests for networks and address encoding.

    use super::*;

    const TEST_PUBLIC_KEY: &str =
        "026cf33373a9f3f6c676b75b543180703df225f7f8edbffedc417718a8ad4e89ce";
    const TEST_PUBLIC_KEY_HASH: &str = "00ac6144c4db7b5790f343cf0477a65fb8a02eb7";

    fn test_hash() -> [u8; 20] {
        hex::decode(TEST_PUBLIC_KEY_HASH).unwrap().try_into().unwrap()
    }

    // -----------------------------------------------------------------------
    // Network resolution
    // -----------------------------------------------------------------------

    #[test]
    fn test_network_names() {
        assert_eq!(Network::from_name("mainnet"), Some(Network::MAINNET));
        assert_eq!(Network::from_name("Bitcoin"), Some(Network::MAINNET));
        assert_eq!(Network::from_name("testnet"), Some(Network::TESTNET));
        assert_eq!(Network::from_name("regtest"), Some(Network::REGTEST));
        assert_eq!(Network::from_name("nonexistent"), None);
        assert!(matches!(
            "nonexistent".parse::<Network>(),
            Err(ScriptError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn test_network_default_is_mainnet() {
        assert_eq!(Network::default(), Network::new(0x00, 0x05));
    }

    #[test]
    fn test_network_spec_resolve() {
        assert_eq!(NetworkSpec::from("testnet").resolve().unwrap(), Network::TESTNET);
        let explicit = NetworkSpec::Versions { pub_key_hash_version: 0x1e, script_hash_version: 0x16 };
        assert_eq!(explicit.resolve().unwrap(), Network::DOGECOIN);
        assert!(NetworkSpec::from("nope").resolve().is_err());
    }

    /// Networks deserialize from a name or from explicit version bytes.
    #[test]
    fn test_network_deserialize() {
        let named: Network = serde_json::from_str(r#""testnet""#).unwrap();
        assert_eq!(named, Network::TESTNET);

        let explicit: Network =
            serde_json::from_str(r#"{"pubKeyHashVersion": 48, "scriptHashVersion": 50}"#).unwrap();
        assert_eq!(explicit, Network::LITECOIN);

        assert!(serde_json::from_str::<Network>(r#""nowhere""#).is_err());
        assert!(serde_json::from_str::<Network>("42").is_err());
    }

    #[test]
    fn test_network_serialize() {
        let json = serde_json::to_string(&Network::TESTNET).unwrap();
        assert_eq!(json, r#"{"pubKeyHashVersion":111,"scriptHashVersion":196}"#);
    }

    // -----------------------------------------------------------------------
    // encode_address
    // -----------------------------------------------------------------------

    #[test]
    fn test_encode_pub_key_hash() {
        let addr = encode_address(&test_hash(), PayloadRole::PubKeyHash, &Network::MAINNET);
        assert_eq!(addr, "114ZWApV4EEU8frr7zygqQcB1V2BodGZuS");

        let addr = encode_address(&test_hash(), PayloadRole::PubKeyHash, &Network::TESTNET);
        assert_eq!(addr, "mfaWoDuTsFfiunLTqZx4fKpVsUctiDV9jk");
    }

    /// A public key payload encodes to the address of its Hash160.
    #[test]
    fn test_encode_public_key() {
        let key = hex::decode(TEST_PUBLIC_KEY).unwrap();
        let addr = encode_address(&key, PayloadRole::PublicKey, &Network::MAINNET);
        assert_eq!(addr, "114ZWApV4EEU8frr7zygqQcB1V2BodGZuS");
    }

    #[test]
    fn test_encode_script_hash_uses_script_version() {
        let addr = encode_address(&test_hash(), PayloadRole::ScriptHash, &Network::MAINNET);
        assert!(addr.starts_with('3'));
        let parsed = Address::from_string(&addr, &Network::MAINNET).unwrap();
        assert_eq!(parsed.kind, AddressKind::ScriptHash);
        assert_eq!(parsed.hash, test_hash());
    }

    // -----------------------------------------------------------------------
    // Address
    // -----------------------------------------------------------------------

    #[test]
    fn test_from_string_mainnet() {
        let address_str = "1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr";
        let addr = Address::from_string(address_str, &Network::MAINNET).expect("should parse");
        assert_eq!(addr.address_string, address_str);
        assert_eq!(hex::encode(addr.hash), "8fe80c75c9560e8b56ed64ea3c26e18d2c52211b");
        assert_eq!(addr.kind, AddressKind::PubKeyHash);
    }

    #[test]
    fn test_from_string_testnet() {
        let addr = Address::from_string("mtdruWYVEV1wz5yL7GvpBj4MgifCB7yhPd", &Network::TESTNET)
            .expect("should parse");
        assert_eq!(hex::encode(addr.hash), "8fe80c75c9560e8b56ed64ea3c26e18d2c52211b");
    }

    #[test]
    fn test_from_string_wrong_network() {
        let result = Address::from_string("mtdruWYVEV1wz5yL7GvpBj4MgifCB7yhPd", &Network::MAINNET);
        assert!(matches!(result, Err(ScriptError::InvalidAddress(_))));
    }

    #[test]
    fn test_from_string_short_address() {
        assert!(Address::from_string("ADD8E55", &Network::MAINNET).is_err());
    }

    #[test]
    fn test_from_public_key() {
        let key = hex::decode(TEST_PUBLIC_KEY).unwrap();
        let addr = Address::from_public_key(&key, &Network::MAINNET);
        assert_eq!(addr.hash, test_hash());
        assert_eq!(addr.to_string(), "114ZWApV4EEU8frr7zygqQcB1V2BodGZuS");
    }

    #[test]
    fn test_from_hash_to_string_roundtrip() {
        let addr = Address::from_hash(test_hash(), AddressKind::PubKeyHash, &Network::TESTNET);
        let parsed = Address::from_string(&addr.address_string, &Network::TESTNET).unwrap();
        assert_eq!(addr, parsed);
    }
}
