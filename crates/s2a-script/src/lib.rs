/// Script template classification and address derivation.
///
/// Decodes the push-data encoding of a locking script, matches the token
/// stream against the recognized templates (pubkeyhash, scripthash,
/// nulldata, pubkey, multisig) and derives Base58Check addresses for the
/// payloads it finds. Classification is a pure function of the script
/// bytes, the network and the strictness flag, and never fails.

pub mod opcodes;
pub mod token;
pub mod template;
pub mod address;
pub mod script;
pub mod classify;

mod error;
#[cfg(test)]
mod test_support;

pub use address::{encode_address, Address, AddressKind, Network, NetworkSpec, PayloadRole};
pub use classify::{classify, script2addresses, Classification, ClassifyOptions};
pub use error::ScriptError;
pub use opcodes::Opcode;
pub use script::{Script, ScriptInput};
pub use template::{match_template, ScriptType, TemplateMatch};
pub use token::{decode_script, PushData, PushEncoding, Token, Tokens};
