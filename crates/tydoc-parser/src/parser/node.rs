//! Thin node and per-kind data records.
//!
//! Nodes are stored as a flat `Node` (kind + span + data handle) in the
//! arena's main pool; kind-specific payloads live in side pools, one record
//! struct per pool. `data_index` points into the pool selected by `kind`.

use std::sync::Arc;

use tydoc_common::comments::CommentRange;
use tydoc_common::interner::Atom;
use tydoc_scanner::SyntaxKind;

use super::{NodeIndex, NodeList};

/// Sentinel for nodes without side data (plain tokens).
pub const DATA_NONE: u32 = u32::MAX;

/// A thin AST node: kind, source span, and a handle into the side pool for
/// that kind.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
    pub data_index: u32,
}

impl Node {
    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != DATA_NONE
    }
}

// =============================================================================
// Names and literals
// =============================================================================

#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub atom: Atom,
    pub escaped_text: String,
}

#[derive(Clone, Debug)]
pub struct LiteralData {
    /// Raw text for numbers, unquoted value for strings.
    pub text: String,
}

/// `left.right` — used for both `QualifiedName` (type position) and
/// `PropertyAccessExpression` (expression position).
#[derive(Clone, Debug)]
pub struct QualifiedNameData {
    pub left: NodeIndex,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ComputedPropertyData {
    pub expression: NodeIndex,
}

// =============================================================================
// Signature elements
// =============================================================================

#[derive(Clone, Debug)]
pub struct TypeParameterData {
    pub name: NodeIndex,
    pub constraint: NodeIndex,
    pub default: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub name: NodeIndex,
    pub dot_dot_dot: bool,
    pub question: bool,
    pub type_node: NodeIndex,
    pub initializer: NodeIndex,
    pub modifier_flags: u32,
}

/// Shared by everything with a callable shape: function declarations,
/// methods, constructors, accessors, call/construct/index signatures, and
/// function types. `kind` on the node distinguishes them.
#[derive(Clone, Debug)]
pub struct SignatureData {
    pub name: NodeIndex,
    pub question: bool,
    pub type_parameters: NodeList,
    pub parameters: NodeList,
    pub return_type: NodeIndex,
    pub modifier_flags: u32,
}

/// Shared by `PropertySignature` and `PropertyDeclaration`.
#[derive(Clone, Debug)]
pub struct PropertyData {
    pub name: NodeIndex,
    pub question: bool,
    pub type_node: NodeIndex,
    pub initializer: NodeIndex,
    pub modifier_flags: u32,
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug)]
pub struct ClassData {
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    pub heritage_clauses: NodeList,
    pub members: NodeList,
    pub modifier_flags: u32,
}

#[derive(Clone, Debug)]
pub struct InterfaceData {
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    pub heritage_clauses: NodeList,
    pub members: NodeList,
    pub modifier_flags: u32,
}

#[derive(Clone, Debug)]
pub struct TypeAliasData {
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    pub type_node: NodeIndex,
    pub modifier_flags: u32,
}

#[derive(Clone, Debug)]
pub struct EnumData {
    pub name: NodeIndex,
    pub members: NodeList,
    pub modifier_flags: u32,
}

#[derive(Clone, Debug)]
pub struct EnumMemberData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ModuleData {
    /// Identifier, or a string literal for ambient module declarations.
    pub name: NodeIndex,
    pub statements: NodeList,
    pub modifier_flags: u32,
}

#[derive(Clone, Debug)]
pub struct VariableData {
    pub declarations: NodeList,
    /// `node_flags::LET` / `node_flags::CONST`.
    pub flags: u32,
    pub modifier_flags: u32,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub type_node: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct HeritageClauseData {
    /// `ExtendsKeyword` or `ImplementsKeyword`.
    pub token: SyntaxKind,
    pub types: NodeList,
}

#[derive(Clone, Debug)]
pub struct ExprWithTypeArgsData {
    pub expression: NodeIndex,
    pub type_arguments: Option<NodeList>,
}

// =============================================================================
// Imports and exports
// =============================================================================

#[derive(Clone, Debug)]
pub struct ImportDeclData {
    pub default_name: NodeIndex,
    pub namespace_name: NodeIndex,
    pub named: NodeList,
    pub module_specifier: NodeIndex,
}

/// `property_name as name`; `property_name` is NONE when not renamed.
#[derive(Clone, Debug)]
pub struct SpecifierData {
    pub property_name: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ExportDeclData {
    pub specifiers: NodeList,
    pub module_specifier: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ExportAssignmentData {
    pub expression: NodeIndex,
    pub modifier_flags: u32,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Clone, Debug)]
pub struct TypeRefData {
    pub type_name: NodeIndex,
    /// `None` when no type-argument list was written; the distinction is
    /// visible in the serialized output.
    pub type_arguments: Option<NodeList>,
}

/// Union, intersection, and tuple types; `kind` distinguishes.
#[derive(Clone, Debug)]
pub struct CompositeTypeData {
    pub types: NodeList,
}

/// Single-child type wrappers: `ArrayType`, `ParenthesizedType`,
/// `LiteralType`, `InferType` (child is the type parameter), and `TypeQuery`
/// (child is the entity name).
#[derive(Clone, Debug)]
pub struct WrappedTypeData {
    pub inner: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeOperatorData {
    /// `KeyOfKeyword`, `ReadonlyKeyword`, or `UniqueKeyword`.
    pub operator: SyntaxKind,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IndexedAccessData {
    pub object_type: NodeIndex,
    pub index_type: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct MappedTypeData {
    pub type_parameter: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalTypeData {
    pub check_type: NodeIndex,
    pub extends_type: NodeIndex,
    pub true_type: NodeIndex,
    pub false_type: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypePredicateData {
    pub parameter_name: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeLiteralData {
    pub members: NodeList,
}

// =============================================================================
// Source file
// =============================================================================

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub statements: NodeList,
    pub file_name: String,
    pub text: Arc<str>,
    /// Comment ranges cached during scanning, sorted by position.
    pub comments: Vec<CommentRange>,
}
