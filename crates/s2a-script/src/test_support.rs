//! Script fixtures for unit tests.

use crate::opcodes::OP_PUSHDATA1;
use crate::token::push_data_prefix;

/// Assembles raw script bytes one operator or push at a time.
#[derive(Default)]
pub(crate) struct ScriptBuilder(Vec<u8>);

impl ScriptBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ops(mut self, ops: &[u8]) -> Self {
        self.0.extend_from_slice(ops);
        self
    }

    /// Push with the minimal encoding.
    pub(crate) fn push(mut self, data: &[u8]) -> Self {
        self.0.extend(push_data_prefix(data.len()).expect("fixture push fits"));
        self.0.extend_from_slice(data);
        self
    }

    /// Push through OP_PUSHDATA1 regardless of length.
    pub(crate) fn push_pushdata1(mut self, data: &[u8]) -> Self {
        self.0.push(OP_PUSHDATA1);
        self.0.push(data.len() as u8);
        self.0.extend_from_slice(data);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.0
    }
}

pub(crate) const KEY_COMPRESSED: &str =
    "026cf33373a9f3f6c676b75b543180703df225f7f8edbffedc417718a8ad4e89ce";
pub(crate) const KEY_UNCOMPRESSED: &str = "0411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3";

pub(crate) fn key(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).expect("valid hex")
}
