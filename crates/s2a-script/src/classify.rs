//! Script classification: decode, match, encode.
//!
//! [`classify`] and [`script2addresses`] are total: every failure along the
//! way (malformed pushes, no matching template, unusable input or network)
//! degrades to an `unknown` result with no addresses.

use serde::{Deserialize, Serialize};

use crate::address::{encode_address, Network, NetworkSpec};
use crate::script::ScriptInput;
use crate::template::{match_template, ScriptType};
use crate::token::decode_script;
use crate::ScriptError;

/// The outcome of classifying one script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub script_type: ScriptType,
    /// One address per payload, in script order. Empty for `nulldata` and `unknown`.
    pub addresses: Vec<String>,
}

impl Classification {
    pub fn unknown() -> Self {
        Classification { script_type: ScriptType::Unknown, addresses: Vec::new() }
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Settings for a classification run.
///
/// Deserializable so it can sit inside a caller's own configuration, e.g.
/// `{ "network": "testnet", "strict": true }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyOptions {
    /// Version bytes for derived addresses.
    pub network: Network,
    /// Require minimal push encodings for template payloads.
    pub strict: bool,
}

impl ClassifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Classify raw script bytes and derive their addresses.
///
/// # Arguments
/// * `script` - The raw script bytes.
/// * `options` - Network and strictness.
///
/// # Returns
/// The classification; `unknown` when the script is malformed or matches no template.
pub fn classify(script: &[u8], options: &ClassifyOptions) -> Classification {
    match try_classify(script, options) {
        Ok(classification) => classification,
        Err(ScriptError::NoTemplateMatch) => Classification::unknown(),
        Err(err) => {
            tracing::debug!(script_len = script.len(), %err, "script did not decode");
            Classification::unknown()
        }
    }
}

fn try_classify(script: &[u8], options: &ClassifyOptions) -> Result<Classification, ScriptError> {
    let tokens = decode_script(script)?;
    let matched = match_template(&tokens, options.strict)?;
    let addresses = match matched.script_type.payload_role() {
        Some(role) => matched
            .payloads
            .iter()
            .map(|payload| encode_address(payload, role, &options.network))
            .collect(),
        None => Vec::new(),
    };
    Ok(Classification { script_type: matched.script_type, addresses })
}

/// Classify a script given as bytes, hex, or anything else.
///
/// # Arguments
/// * `script` - Bytes or a hex string; `None` or other input yields `unknown`.
/// * `network` - A network name or explicit version bytes; mainnet when `None`.
/// * `strict` - Require minimal push encodings; `false` when `None`.
///
/// # Returns
/// The classification. Never fails.
pub fn script2addresses<S>(
    script: S,
    network: Option<NetworkSpec>,
    strict: Option<bool>,
) -> Classification
where
    S: Into<ScriptInput>,
{
    let script = match script.into().into_script() {
        Ok(script) => script,
        Err(err) => {
            tracing::debug!(%err, "rejected script input");
            return Classification::unknown();
        }
    };

    let network = match network.as_ref().map(NetworkSpec::resolve).transpose() {
        Ok(network) => network.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(%err, "could not resolve network");
            return Classification::unknown();
        }
    };

    let options = ClassifyOptions { network, strict: strict.unwrap_or(false) };
    classify(script.to_bytes(), &options)
}
