//! Serialization rules, one per registered syntax kind.

pub mod declarations;
pub mod types;
