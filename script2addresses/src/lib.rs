#![deny(missing_docs)]

//! Classify transaction output scripts and derive their addresses.
//!
//! Re-exports the component crates and surfaces the two entry points,
//! [`script2addresses`] and [`is_public_key`], at the top level.

pub use s2a_primitives as primitives;
pub use s2a_script as script;

pub use s2a_primitives::ec::is_public_key;
pub use s2a_script::{
    classify, script2addresses, Classification, ClassifyOptions, Network, NetworkSpec, Script,
    ScriptInput, ScriptType,
};
