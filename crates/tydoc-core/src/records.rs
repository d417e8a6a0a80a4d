//! Documentation records.
//!
//! The output of a traversal is a tree of tagged records, serialized with a
//! `"type"` discriminator. Tag strings and field names are the wire contract
//! consumed by renderers; declaration tags are lowercase (`"class"`,
//! `"enum"`), member and type-expression tags match their syntax-kind names.

use serde::Serialize;

/// Identity of a reference-carrying record inside one traversal, used to
/// backfill `filename` after the whole file has been visited. Never
/// serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct RefId(pub u32);

/// One node of the documentation tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DocNode {
    // =========================================================================
    // Declarations
    // =========================================================================
    #[serde(rename = "class", rename_all = "camelCase")]
    Class {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        documentation: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        parent: Option<Box<DocNode>>,
        implements_clauses: Vec<DocNode>,
        members: Vec<DocNode>,
        type_parameters: Vec<DocNode>,
        is_abstract: bool,
        is_default: bool,
        is_private: bool,
    },

    #[serde(rename = "interface", rename_all = "camelCase")]
    Interface {
        name: String,
        documentation: String,
        /// Type parameters; always present, empty when the interface is not
        /// generic.
        parameters: Vec<DocNode>,
        heritage_clauses: Vec<DocNode>,
        members: Vec<DocNode>,
        is_private: bool,
    },

    #[serde(rename = "enum", rename_all = "camelCase")]
    Enum {
        name: String,
        documentation: String,
        members: Vec<DocNode>,
        is_private: bool,
    },

    #[serde(rename_all = "camelCase")]
    EnumMember {
        name: String,
        documentation: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        initializer: Option<Box<DocNode>>,
    },

    #[serde(rename = "type", rename_all = "camelCase")]
    TypeAlias {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        definition: Option<Box<DocNode>>,
        documentation: String,
        parameters: Vec<DocNode>,
        is_private: bool,
    },

    #[serde(rename = "function", rename_all = "camelCase")]
    Function {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        documentation: String,
        parameters: Vec<DocNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        return_type: Option<Box<DocNode>>,
        type_parameters: Vec<DocNode>,
        is_default: bool,
        is_private: bool,
    },

    #[serde(rename = "module", rename_all = "camelCase")]
    Module {
        name: String,
        documentation: String,
        statements: Vec<DocNode>,
        is_private: bool,
    },

    /// A whole `var`/`let`/`const` statement; the per-name entries live in
    /// `declarations`.
    #[serde(rename = "VariableDeclaration", rename_all = "camelCase")]
    VariableStatement {
        documentation: String,
        declarations: Vec<DocNode>,
        is_private: bool,
    },

    #[serde(rename = "declaration", rename_all = "camelCase")]
    Declaration {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data_type: Option<Box<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        initializer: Option<Box<DocNode>>,
    },

    #[serde(rename = "import", rename_all = "camelCase")]
    Import { module_specifier: String },

    #[serde(rename = "export", rename_all = "camelCase")]
    Export {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        property_name: Option<String>,
        is_default: bool,
    },

    // =========================================================================
    // Members
    // =========================================================================
    #[serde(rename_all = "camelCase")]
    PropertyDeclaration {
        name: String,
        documentation: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        initializer: Option<Box<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data_type: Option<Box<DocNode>>,
        optional: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        visibility: Option<String>,
        is_static: bool,
        is_abstract: bool,
        is_readonly: bool,
    },

    #[serde(rename_all = "camelCase")]
    Constructor {
        documentation: String,
        parameters: Vec<DocNode>,
    },

    #[serde(rename_all = "camelCase")]
    MethodDeclaration {
        name: String,
        documentation: String,
        parameters: Vec<DocNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        return_type: Option<Box<DocNode>>,
        type_parameters: Vec<DocNode>,
        optional: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        visibility: Option<String>,
        is_static: bool,
        is_abstract: bool,
    },

    #[serde(rename_all = "camelCase")]
    GetAccessor {
        name: String,
        documentation: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        return_type: Option<Box<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        visibility: Option<String>,
        is_static: bool,
    },

    #[serde(rename_all = "camelCase")]
    SetAccessor {
        name: String,
        documentation: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        parameter: Option<Box<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        visibility: Option<String>,
        is_static: bool,
    },

    #[serde(rename_all = "camelCase")]
    PropertySignature {
        name: String,
        optional: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        data_type: Option<Box<DocNode>>,
        documentation: String,
        is_readonly: bool,
    },

    #[serde(rename_all = "camelCase")]
    MethodSignature {
        name: String,
        documentation: String,
        parameters: Vec<DocNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        return_type: Option<Box<DocNode>>,
        type_parameters: Vec<DocNode>,
        optional: bool,
    },

    #[serde(rename_all = "camelCase")]
    CallSignature {
        documentation: String,
        parameters: Vec<DocNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        return_type: Option<Box<DocNode>>,
        type_parameters: Vec<DocNode>,
    },

    #[serde(rename_all = "camelCase")]
    ConstructSignature {
        documentation: String,
        parameters: Vec<DocNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        return_type: Option<Box<DocNode>>,
    },

    #[serde(rename_all = "camelCase")]
    IndexSignature {
        documentation: String,
        parameters: Vec<DocNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        return_type: Option<Box<DocNode>>,
    },

    // =========================================================================
    // Signature elements
    // =========================================================================
    #[serde(rename_all = "camelCase")]
    Parameter {
        name: String,
        documentation: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data_type: Option<Box<DocNode>>,
        optional: bool,
        rest: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        visibility: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        initializer: Option<Box<DocNode>>,
    },

    #[serde(rename_all = "camelCase")]
    TypeParameter {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        constraint: Option<Box<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<Box<DocNode>>,
    },

    // =========================================================================
    // Names and literals
    // =========================================================================
    /// Identifier or dotted name; `text` is the full spelling, `ref_name`
    /// the leftmost identifier (the name resolution actually binds).
    #[serde(rename = "name", rename_all = "camelCase")]
    Name { text: String, ref_name: String },

    #[serde(rename = "keyword", rename_all = "camelCase")]
    Keyword { name: String },

    #[serde(rename = "string", rename_all = "camelCase")]
    StringLiteral { text: String },

    #[serde(rename = "number", rename_all = "camelCase")]
    NumberLiteral { text: String },

    // =========================================================================
    // Type expressions
    // =========================================================================
    #[serde(rename_all = "camelCase")]
    TypeReference {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        arguments: Option<Vec<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
        #[serde(skip)]
        ref_id: RefId,
    },

    /// Heritage clause entry (`extends X`, `implements Y.Z<T>`).
    #[serde(rename_all = "camelCase")]
    ExpressionWithTypeArguments {
        expression: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        arguments: Option<Vec<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
        #[serde(skip)]
        ref_id: RefId,
    },

    #[serde(rename_all = "camelCase")]
    UnionType { types: Vec<DocNode> },

    #[serde(rename_all = "camelCase")]
    IntersectionType { types: Vec<DocNode> },

    #[serde(rename_all = "camelCase")]
    ArrayType {
        #[serde(skip_serializing_if = "Option::is_none")]
        element_type: Option<Box<DocNode>>,
    },

    #[serde(rename_all = "camelCase")]
    TupleType { element_types: Vec<DocNode> },

    #[serde(rename_all = "camelCase")]
    ParenthesizedType {
        #[serde(skip_serializing_if = "Option::is_none")]
        element_type: Option<Box<DocNode>>,
    },

    #[serde(rename_all = "camelCase")]
    FunctionType {
        parameters: Vec<DocNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        return_type: Option<Box<DocNode>>,
        type_parameters: Vec<DocNode>,
    },

    #[serde(rename_all = "camelCase")]
    TypeLiteral { members: Vec<DocNode> },

    #[serde(rename_all = "camelCase")]
    MappedType {
        #[serde(skip_serializing_if = "Option::is_none")]
        parameter: Option<Box<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data_type: Option<Box<DocNode>>,
    },

    #[serde(rename_all = "camelCase")]
    ConditionalType {
        #[serde(skip_serializing_if = "Option::is_none")]
        check_type: Option<Box<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        extends_type: Option<Box<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        false_type: Option<Box<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        true_type: Option<Box<DocNode>>,
    },

    #[serde(rename = "IndexedAccessTypeNode", rename_all = "camelCase")]
    IndexedAccessType {
        #[serde(skip_serializing_if = "Option::is_none")]
        index: Option<Box<DocNode>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        object: Option<Box<DocNode>>,
    },

    #[serde(rename_all = "camelCase")]
    TypeOperator {
        /// Debug name of the operator token (`KeyOfKeyword`,
        /// `ReadonlyKeyword`, `UniqueKeyword`).
        operator: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        subject: Option<Box<DocNode>>,
    },

    #[serde(rename_all = "camelCase")]
    InferType {
        #[serde(skip_serializing_if = "Option::is_none")]
        parameter: Option<Box<DocNode>>,
    },

    #[serde(rename_all = "camelCase")]
    TypePredicate {
        parameter_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data_type: Option<Box<DocNode>>,
    },

    #[serde(rename_all = "camelCase")]
    TypeQuery {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<Box<DocNode>>,
    },
}

impl DocNode {
    /// The `name`/`text` string of a name-ish record, used by rules that
    /// lift a visited name into a plain string field.
    pub fn name_text(&self) -> Option<&str> {
        match self {
            DocNode::Name { text, .. } => Some(text),
            DocNode::Keyword { name } => Some(name),
            DocNode::StringLiteral { text } | DocNode::NumberLiteral { text } => Some(text),
            _ => None,
        }
    }

    /// The binding identifier of a name-ish record (leftmost identifier of a
    /// dotted name).
    pub fn ref_name(&self) -> Option<&str> {
        match self {
            DocNode::Name { ref_name, .. } => Some(ref_name),
            _ => None,
        }
    }
}
