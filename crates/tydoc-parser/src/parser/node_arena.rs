//! Arena storage for thin nodes and their side-pool data.

use tydoc_common::interner::Interner;
use tydoc_scanner::SyntaxKind;

use super::node::*;
use super::{NodeIndex, NodeList};

/// Owns every node of one parsed file plus the string interner used for
/// identifier text.
#[derive(Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    interner: Interner,

    identifiers: Vec<IdentifierData>,
    literals: Vec<LiteralData>,
    qualified_names: Vec<QualifiedNameData>,
    computed_properties: Vec<ComputedPropertyData>,
    type_parameters: Vec<TypeParameterData>,
    parameters: Vec<ParameterData>,
    signatures: Vec<SignatureData>,
    properties: Vec<PropertyData>,
    classes: Vec<ClassData>,
    interfaces: Vec<InterfaceData>,
    type_aliases: Vec<TypeAliasData>,
    enums: Vec<EnumData>,
    enum_members: Vec<EnumMemberData>,
    modules: Vec<ModuleData>,
    variables: Vec<VariableData>,
    variable_declarations: Vec<VariableDeclarationData>,
    heritage_clauses: Vec<HeritageClauseData>,
    expr_with_type_args: Vec<ExprWithTypeArgsData>,
    import_decls: Vec<ImportDeclData>,
    specifiers: Vec<SpecifierData>,
    export_decls: Vec<ExportDeclData>,
    export_assignments: Vec<ExportAssignmentData>,
    type_refs: Vec<TypeRefData>,
    composite_types: Vec<CompositeTypeData>,
    wrapped_types: Vec<WrappedTypeData>,
    type_operators: Vec<TypeOperatorData>,
    indexed_access_types: Vec<IndexedAccessData>,
    mapped_types: Vec<MappedTypeData>,
    conditional_types: Vec<ConditionalTypeData>,
    type_predicates: Vec<TypePredicateData>,
    type_literals: Vec<TypeLiteralData>,
    source_files: Vec<SourceFileData>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Set the interner (called after parsing to transfer ownership from the
    /// scanner).
    pub fn set_interner(&mut self, interner: Interner) {
        self.interner = interner;
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Get a thin node by index.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve an identifier's text using its atom (fast path) or the escaped
    /// text fallback.
    pub fn resolve_identifier_text<'a>(&'a self, data: &'a IdentifierData) -> &'a str {
        if !data.atom.is_none() {
            self.interner.resolve(data.atom)
        } else {
            &data.escaped_text
        }
    }

    /// Identifier text for a node index, when the node is an identifier.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        let data = self.get_identifier(node)?;
        Some(self.resolve_identifier_text(data))
    }

    // =========================================================================
    // Node creation
    // =========================================================================

    fn add_node(&mut self, kind: SyntaxKind, pos: u32, end: u32, data_index: u32) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            pos,
            end,
            data_index,
        });
        index
    }

    /// A bare token node (keywords in type position, error placeholders).
    pub fn add_token(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeIndex {
        self.add_node(kind, pos, end, DATA_NONE)
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, data: IdentifierData) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(data);
        self.add_node(SyntaxKind::Identifier, pos, end, data_index)
    }

    pub fn add_literal(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: LiteralData,
    ) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(data);
        self.add_node(kind, pos, end, data_index)
    }

    /// `QualifiedName` or `PropertyAccessExpression`.
    pub fn add_name_pair(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: QualifiedNameData,
    ) -> NodeIndex {
        let data_index = self.qualified_names.len() as u32;
        self.qualified_names.push(data);
        self.add_node(kind, pos, end, data_index)
    }

    pub fn add_computed_property(
        &mut self,
        pos: u32,
        end: u32,
        data: ComputedPropertyData,
    ) -> NodeIndex {
        let data_index = self.computed_properties.len() as u32;
        self.computed_properties.push(data);
        self.add_node(SyntaxKind::ComputedPropertyName, pos, end, data_index)
    }

    pub fn add_type_parameter(&mut self, pos: u32, end: u32, data: TypeParameterData) -> NodeIndex {
        let data_index = self.type_parameters.len() as u32;
        self.type_parameters.push(data);
        self.add_node(SyntaxKind::TypeParameter, pos, end, data_index)
    }

    pub fn add_parameter(&mut self, pos: u32, end: u32, data: ParameterData) -> NodeIndex {
        let data_index = self.parameters.len() as u32;
        self.parameters.push(data);
        self.add_node(SyntaxKind::Parameter, pos, end, data_index)
    }

    /// Any callable-shaped node; `kind` selects which one.
    pub fn add_signature(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: SignatureData,
    ) -> NodeIndex {
        let data_index = self.signatures.len() as u32;
        self.signatures.push(data);
        self.add_node(kind, pos, end, data_index)
    }

    /// `PropertySignature` or `PropertyDeclaration`.
    pub fn add_property(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: PropertyData,
    ) -> NodeIndex {
        let data_index = self.properties.len() as u32;
        self.properties.push(data);
        self.add_node(kind, pos, end, data_index)
    }

    pub fn add_class(&mut self, pos: u32, end: u32, data: ClassData) -> NodeIndex {
        let data_index = self.classes.len() as u32;
        self.classes.push(data);
        self.add_node(SyntaxKind::ClassDeclaration, pos, end, data_index)
    }

    pub fn add_interface(&mut self, pos: u32, end: u32, data: InterfaceData) -> NodeIndex {
        let data_index = self.interfaces.len() as u32;
        self.interfaces.push(data);
        self.add_node(SyntaxKind::InterfaceDeclaration, pos, end, data_index)
    }

    pub fn add_type_alias(&mut self, pos: u32, end: u32, data: TypeAliasData) -> NodeIndex {
        let data_index = self.type_aliases.len() as u32;
        self.type_aliases.push(data);
        self.add_node(SyntaxKind::TypeAliasDeclaration, pos, end, data_index)
    }

    pub fn add_enum(&mut self, pos: u32, end: u32, data: EnumData) -> NodeIndex {
        let data_index = self.enums.len() as u32;
        self.enums.push(data);
        self.add_node(SyntaxKind::EnumDeclaration, pos, end, data_index)
    }

    pub fn add_enum_member(&mut self, pos: u32, end: u32, data: EnumMemberData) -> NodeIndex {
        let data_index = self.enum_members.len() as u32;
        self.enum_members.push(data);
        self.add_node(SyntaxKind::EnumMember, pos, end, data_index)
    }

    pub fn add_module(&mut self, pos: u32, end: u32, data: ModuleData) -> NodeIndex {
        let data_index = self.modules.len() as u32;
        self.modules.push(data);
        self.add_node(SyntaxKind::ModuleDeclaration, pos, end, data_index)
    }

    pub fn add_variable_statement(&mut self, pos: u32, end: u32, data: VariableData) -> NodeIndex {
        let data_index = self.variables.len() as u32;
        self.variables.push(data);
        self.add_node(SyntaxKind::VariableStatement, pos, end, data_index)
    }

    pub fn add_variable_declaration(
        &mut self,
        pos: u32,
        end: u32,
        data: VariableDeclarationData,
    ) -> NodeIndex {
        let data_index = self.variable_declarations.len() as u32;
        self.variable_declarations.push(data);
        self.add_node(SyntaxKind::VariableDeclaration, pos, end, data_index)
    }

    pub fn add_heritage_clause(&mut self, pos: u32, end: u32, data: HeritageClauseData) -> NodeIndex {
        let data_index = self.heritage_clauses.len() as u32;
        self.heritage_clauses.push(data);
        self.add_node(SyntaxKind::HeritageClause, pos, end, data_index)
    }

    pub fn add_expr_with_type_args(
        &mut self,
        pos: u32,
        end: u32,
        data: ExprWithTypeArgsData,
    ) -> NodeIndex {
        let data_index = self.expr_with_type_args.len() as u32;
        self.expr_with_type_args.push(data);
        self.add_node(SyntaxKind::ExpressionWithTypeArguments, pos, end, data_index)
    }

    pub fn add_import_decl(&mut self, pos: u32, end: u32, data: ImportDeclData) -> NodeIndex {
        let data_index = self.import_decls.len() as u32;
        self.import_decls.push(data);
        self.add_node(SyntaxKind::ImportDeclaration, pos, end, data_index)
    }

    /// `ImportSpecifier` or `ExportSpecifier`.
    pub fn add_specifier(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: SpecifierData,
    ) -> NodeIndex {
        let data_index = self.specifiers.len() as u32;
        self.specifiers.push(data);
        self.add_node(kind, pos, end, data_index)
    }

    pub fn add_export_decl(&mut self, pos: u32, end: u32, data: ExportDeclData) -> NodeIndex {
        let data_index = self.export_decls.len() as u32;
        self.export_decls.push(data);
        self.add_node(SyntaxKind::ExportDeclaration, pos, end, data_index)
    }

    pub fn add_export_assignment(
        &mut self,
        pos: u32,
        end: u32,
        data: ExportAssignmentData,
    ) -> NodeIndex {
        let data_index = self.export_assignments.len() as u32;
        self.export_assignments.push(data);
        self.add_node(SyntaxKind::ExportAssignment, pos, end, data_index)
    }

    pub fn add_type_ref(&mut self, pos: u32, end: u32, data: TypeRefData) -> NodeIndex {
        let data_index = self.type_refs.len() as u32;
        self.type_refs.push(data);
        self.add_node(SyntaxKind::TypeReference, pos, end, data_index)
    }

    /// `UnionType`, `IntersectionType`, or `TupleType`.
    pub fn add_composite_type(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: CompositeTypeData,
    ) -> NodeIndex {
        let data_index = self.composite_types.len() as u32;
        self.composite_types.push(data);
        self.add_node(kind, pos, end, data_index)
    }

    /// `ArrayType`, `ParenthesizedType`, `LiteralType`, `InferType`, or
    /// `TypeQuery`.
    pub fn add_wrapped_type(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: WrappedTypeData,
    ) -> NodeIndex {
        let data_index = self.wrapped_types.len() as u32;
        self.wrapped_types.push(data);
        self.add_node(kind, pos, end, data_index)
    }

    pub fn add_type_operator(&mut self, pos: u32, end: u32, data: TypeOperatorData) -> NodeIndex {
        let data_index = self.type_operators.len() as u32;
        self.type_operators.push(data);
        self.add_node(SyntaxKind::TypeOperator, pos, end, data_index)
    }

    pub fn add_indexed_access_type(
        &mut self,
        pos: u32,
        end: u32,
        data: IndexedAccessData,
    ) -> NodeIndex {
        let data_index = self.indexed_access_types.len() as u32;
        self.indexed_access_types.push(data);
        self.add_node(SyntaxKind::IndexedAccessType, pos, end, data_index)
    }

    pub fn add_mapped_type(&mut self, pos: u32, end: u32, data: MappedTypeData) -> NodeIndex {
        let data_index = self.mapped_types.len() as u32;
        self.mapped_types.push(data);
        self.add_node(SyntaxKind::MappedType, pos, end, data_index)
    }

    pub fn add_conditional_type(
        &mut self,
        pos: u32,
        end: u32,
        data: ConditionalTypeData,
    ) -> NodeIndex {
        let data_index = self.conditional_types.len() as u32;
        self.conditional_types.push(data);
        self.add_node(SyntaxKind::ConditionalType, pos, end, data_index)
    }

    pub fn add_type_predicate(&mut self, pos: u32, end: u32, data: TypePredicateData) -> NodeIndex {
        let data_index = self.type_predicates.len() as u32;
        self.type_predicates.push(data);
        self.add_node(SyntaxKind::TypePredicate, pos, end, data_index)
    }

    pub fn add_type_literal(&mut self, pos: u32, end: u32, data: TypeLiteralData) -> NodeIndex {
        let data_index = self.type_literals.len() as u32;
        self.type_literals.push(data);
        self.add_node(SyntaxKind::TypeLiteral, pos, end, data_index)
    }

    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        let data_index = self.source_files.len() as u32;
        self.source_files.push(data);
        self.add_node(SyntaxKind::SourceFile, pos, end, data_index)
    }

    // =========================================================================
    // Node access
    // =========================================================================

    fn pool_get<'a, T>(&self, pool: &'a [T], node: &Node, matches: bool) -> Option<&'a T> {
        if matches && node.has_data() {
            pool.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        self.pool_get(
            &self.identifiers,
            node,
            matches!(
                node.kind,
                SyntaxKind::Identifier | SyntaxKind::PrivateIdentifier
            ),
        )
    }

    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        self.pool_get(
            &self.literals,
            node,
            matches!(
                node.kind,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::NoSubstitutionTemplateLiteral
            ),
        )
    }

    pub fn get_name_pair(&self, node: &Node) -> Option<&QualifiedNameData> {
        self.pool_get(
            &self.qualified_names,
            node,
            matches!(
                node.kind,
                SyntaxKind::QualifiedName | SyntaxKind::PropertyAccessExpression
            ),
        )
    }

    pub fn get_computed_property(&self, node: &Node) -> Option<&ComputedPropertyData> {
        self.pool_get(
            &self.computed_properties,
            node,
            node.kind == SyntaxKind::ComputedPropertyName,
        )
    }

    pub fn get_type_parameter(&self, node: &Node) -> Option<&TypeParameterData> {
        self.pool_get(
            &self.type_parameters,
            node,
            node.kind == SyntaxKind::TypeParameter,
        )
    }

    pub fn get_parameter(&self, node: &Node) -> Option<&ParameterData> {
        self.pool_get(&self.parameters, node, node.kind == SyntaxKind::Parameter)
    }

    pub fn get_signature(&self, node: &Node) -> Option<&SignatureData> {
        self.pool_get(
            &self.signatures,
            node,
            matches!(
                node.kind,
                SyntaxKind::FunctionDeclaration
                    | SyntaxKind::MethodDeclaration
                    | SyntaxKind::MethodSignature
                    | SyntaxKind::Constructor
                    | SyntaxKind::GetAccessor
                    | SyntaxKind::SetAccessor
                    | SyntaxKind::CallSignature
                    | SyntaxKind::ConstructSignature
                    | SyntaxKind::IndexSignature
                    | SyntaxKind::FunctionType
                    | SyntaxKind::ConstructorType
            ),
        )
    }

    pub fn get_property(&self, node: &Node) -> Option<&PropertyData> {
        self.pool_get(
            &self.properties,
            node,
            matches!(
                node.kind,
                SyntaxKind::PropertySignature | SyntaxKind::PropertyDeclaration
            ),
        )
    }

    pub fn get_class(&self, node: &Node) -> Option<&ClassData> {
        self.pool_get(&self.classes, node, node.kind == SyntaxKind::ClassDeclaration)
    }

    pub fn get_interface(&self, node: &Node) -> Option<&InterfaceData> {
        self.pool_get(
            &self.interfaces,
            node,
            node.kind == SyntaxKind::InterfaceDeclaration,
        )
    }

    pub fn get_type_alias(&self, node: &Node) -> Option<&TypeAliasData> {
        self.pool_get(
            &self.type_aliases,
            node,
            node.kind == SyntaxKind::TypeAliasDeclaration,
        )
    }

    pub fn get_enum(&self, node: &Node) -> Option<&EnumData> {
        self.pool_get(&self.enums, node, node.kind == SyntaxKind::EnumDeclaration)
    }

    pub fn get_enum_member(&self, node: &Node) -> Option<&EnumMemberData> {
        self.pool_get(&self.enum_members, node, node.kind == SyntaxKind::EnumMember)
    }

    pub fn get_module(&self, node: &Node) -> Option<&ModuleData> {
        self.pool_get(&self.modules, node, node.kind == SyntaxKind::ModuleDeclaration)
    }

    pub fn get_variable_statement(&self, node: &Node) -> Option<&VariableData> {
        self.pool_get(
            &self.variables,
            node,
            node.kind == SyntaxKind::VariableStatement,
        )
    }

    pub fn get_variable_declaration(&self, node: &Node) -> Option<&VariableDeclarationData> {
        self.pool_get(
            &self.variable_declarations,
            node,
            node.kind == SyntaxKind::VariableDeclaration,
        )
    }

    pub fn get_heritage_clause(&self, node: &Node) -> Option<&HeritageClauseData> {
        self.pool_get(
            &self.heritage_clauses,
            node,
            node.kind == SyntaxKind::HeritageClause,
        )
    }

    pub fn get_expr_with_type_args(&self, node: &Node) -> Option<&ExprWithTypeArgsData> {
        self.pool_get(
            &self.expr_with_type_args,
            node,
            node.kind == SyntaxKind::ExpressionWithTypeArguments,
        )
    }

    pub fn get_import_decl(&self, node: &Node) -> Option<&ImportDeclData> {
        self.pool_get(
            &self.import_decls,
            node,
            node.kind == SyntaxKind::ImportDeclaration,
        )
    }

    pub fn get_specifier(&self, node: &Node) -> Option<&SpecifierData> {
        self.pool_get(
            &self.specifiers,
            node,
            matches!(
                node.kind,
                SyntaxKind::ImportSpecifier | SyntaxKind::ExportSpecifier
            ),
        )
    }

    pub fn get_export_decl(&self, node: &Node) -> Option<&ExportDeclData> {
        self.pool_get(
            &self.export_decls,
            node,
            node.kind == SyntaxKind::ExportDeclaration,
        )
    }

    pub fn get_export_assignment(&self, node: &Node) -> Option<&ExportAssignmentData> {
        self.pool_get(
            &self.export_assignments,
            node,
            node.kind == SyntaxKind::ExportAssignment,
        )
    }

    pub fn get_type_ref(&self, node: &Node) -> Option<&TypeRefData> {
        self.pool_get(&self.type_refs, node, node.kind == SyntaxKind::TypeReference)
    }

    pub fn get_composite_type(&self, node: &Node) -> Option<&CompositeTypeData> {
        self.pool_get(
            &self.composite_types,
            node,
            matches!(
                node.kind,
                SyntaxKind::UnionType | SyntaxKind::IntersectionType | SyntaxKind::TupleType
            ),
        )
    }

    pub fn get_wrapped_type(&self, node: &Node) -> Option<&WrappedTypeData> {
        self.pool_get(
            &self.wrapped_types,
            node,
            matches!(
                node.kind,
                SyntaxKind::ArrayType
                    | SyntaxKind::ParenthesizedType
                    | SyntaxKind::LiteralType
                    | SyntaxKind::InferType
                    | SyntaxKind::TypeQuery
            ),
        )
    }

    pub fn get_type_operator(&self, node: &Node) -> Option<&TypeOperatorData> {
        self.pool_get(
            &self.type_operators,
            node,
            node.kind == SyntaxKind::TypeOperator,
        )
    }

    pub fn get_indexed_access_type(&self, node: &Node) -> Option<&IndexedAccessData> {
        self.pool_get(
            &self.indexed_access_types,
            node,
            node.kind == SyntaxKind::IndexedAccessType,
        )
    }

    pub fn get_mapped_type(&self, node: &Node) -> Option<&MappedTypeData> {
        self.pool_get(&self.mapped_types, node, node.kind == SyntaxKind::MappedType)
    }

    pub fn get_conditional_type(&self, node: &Node) -> Option<&ConditionalTypeData> {
        self.pool_get(
            &self.conditional_types,
            node,
            node.kind == SyntaxKind::ConditionalType,
        )
    }

    pub fn get_type_predicate(&self, node: &Node) -> Option<&TypePredicateData> {
        self.pool_get(
            &self.type_predicates,
            node,
            node.kind == SyntaxKind::TypePredicate,
        )
    }

    pub fn get_type_literal(&self, node: &Node) -> Option<&TypeLiteralData> {
        self.pool_get(
            &self.type_literals,
            node,
            node.kind == SyntaxKind::TypeLiteral,
        )
    }

    /// Source-file data by node index (there is usually exactly one).
    pub fn get_source_file(&self, index: NodeIndex) -> Option<&SourceFileData> {
        let node = self.get(index)?;
        self.pool_get(&self.source_files, node, node.kind == SyntaxKind::SourceFile)
    }
}

/// Convenience for rules that need a node's statements regardless of whether
/// it is a source file or a module block.
impl NodeArena {
    pub fn statements_of(&self, index: NodeIndex) -> Option<&NodeList> {
        let node = self.get(index)?;
        match node.kind {
            SyntaxKind::SourceFile => self.get_source_file(index).map(|sf| &sf.statements),
            SyntaxKind::ModuleDeclaration => self.get_module(node).map(|m| &m.statements),
            _ => None,
        }
    }
}
