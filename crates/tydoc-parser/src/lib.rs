//! TypeScript declaration parser for the tydoc documentation extractor.
//!
//! The parser covers the declaration and type-expression subset that
//! documentation extraction consumes: imports/exports, classes, interfaces,
//! type aliases, enums, functions, variables, namespaces, and the full type
//! grammar (unions, mapped types, conditional types, indexed access, and so
//! on). Function bodies and non-literal initializers are skipped with
//! balanced token scanning; they carry no documentation.

pub mod parser;

pub use parser::{
    NodeIndex, NodeList, ParseDiagnostic, ParserState, modifier_flags, node, node_flags,
};
pub use parser::node_arena::NodeArena;
