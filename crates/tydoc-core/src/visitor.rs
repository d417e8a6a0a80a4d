//! Visitor registry and dispatch engine.

use rustc_hash::FxHashMap;
use tracing::trace;
use tydoc_parser::{NodeArena, NodeIndex};
use tydoc_scanner::SyntaxKind;

use crate::docs::DocComments;
use crate::records::{DocNode, RefId};
use crate::registry::ReferenceRegistry;
use crate::rules;
use crate::scope::ScopeStack;

/// A serialization rule: visits one node and pushes its records onto `out`.
pub type RuleFn = fn(&mut DocVisitor, &mut Vec<DocNode>, NodeIndex);

/// Maps node kinds to serialization rules. Built once, passed by reference
/// to every traversal; never global state.
pub struct VisitorTable {
    rules: FxHashMap<SyntaxKind, RuleFn>,
}

impl VisitorTable {
    pub fn new() -> VisitorTable {
        VisitorTable {
            rules: FxHashMap::default(),
        }
    }

    /// Register a rule for a kind. Registering a kind twice is a
    /// configuration bug, not a runtime condition.
    pub fn register(&mut self, kind: SyntaxKind, rule: RuleFn) {
        if self.rules.insert(kind, rule).is_some() {
            panic!("duplicate visitor registration for {kind:?}");
        }
    }

    #[inline]
    pub fn get(&self, kind: SyntaxKind) -> Option<RuleFn> {
        self.rules.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The full rule set for documentation extraction.
    pub fn standard() -> VisitorTable {
        use SyntaxKind::*;
        let mut table = VisitorTable::new();

        // Declarations
        table.register(ImportDeclaration, rules::declarations::import_declaration);
        table.register(ExportDeclaration, rules::declarations::export_declaration);
        table.register(ExportAssignment, rules::declarations::export_assignment);
        table.register(ClassDeclaration, rules::declarations::class_declaration);
        table.register(
            InterfaceDeclaration,
            rules::declarations::interface_declaration,
        );
        table.register(
            TypeAliasDeclaration,
            rules::declarations::type_alias_declaration,
        );
        table.register(EnumDeclaration, rules::declarations::enum_declaration);
        table.register(EnumMember, rules::declarations::enum_member);
        table.register(
            FunctionDeclaration,
            rules::declarations::function_declaration,
        );
        table.register(VariableStatement, rules::declarations::variable_statement);
        table.register(
            VariableDeclaration,
            rules::declarations::variable_declaration,
        );
        table.register(ModuleDeclaration, rules::declarations::module_declaration);

        // Members
        table.register(
            PropertyDeclaration,
            rules::declarations::property_declaration,
        );
        table.register(Constructor, rules::declarations::constructor);
        table.register(MethodDeclaration, rules::declarations::method_declaration);
        table.register(GetAccessor, rules::declarations::get_accessor);
        table.register(SetAccessor, rules::declarations::set_accessor);
        table.register(PropertySignature, rules::declarations::property_signature);
        table.register(MethodSignature, rules::declarations::method_signature);
        table.register(CallSignature, rules::declarations::call_signature);
        table.register(ConstructSignature, rules::declarations::construct_signature);
        table.register(IndexSignature, rules::declarations::index_signature);
        table.register(Parameter, rules::declarations::parameter);

        // Names and literals
        table.register(Identifier, rules::types::identifier);
        table.register(QualifiedName, rules::types::entity_name);
        table.register(PropertyAccessExpression, rules::types::entity_name);
        table.register(ComputedPropertyName, rules::types::computed_property_name);
        table.register(StringLiteral, rules::types::string_literal);
        table.register(
            NoSubstitutionTemplateLiteral,
            rules::types::string_literal,
        );
        table.register(NumericLiteral, rules::types::numeric_literal);

        // Type expressions
        table.register(TypeParameter, rules::types::type_parameter);
        table.register(TypeReference, rules::types::type_reference);
        table.register(
            ExpressionWithTypeArguments,
            rules::types::expression_with_type_arguments,
        );
        table.register(UnionType, rules::types::union_type);
        table.register(IntersectionType, rules::types::intersection_type);
        table.register(TupleType, rules::types::tuple_type);
        table.register(ArrayType, rules::types::array_type);
        table.register(ParenthesizedType, rules::types::parenthesized_type);
        table.register(LiteralType, rules::types::literal_type);
        table.register(FunctionType, rules::types::function_type);
        table.register(ConstructorType, rules::types::function_type);
        table.register(TypeLiteral, rules::types::type_literal);
        table.register(MappedType, rules::types::mapped_type);
        table.register(ConditionalType, rules::types::conditional_type);
        table.register(IndexedAccessType, rules::types::indexed_access_type);
        table.register(TypeOperator, rules::types::type_operator);
        table.register(InferType, rules::types::infer_type);
        table.register(TypePredicate, rules::types::type_predicate);
        table.register(TypeQuery, rules::types::type_query);

        // Keywords appearing in type position
        for kind in [
            AnyKeyword,
            BigIntKeyword,
            BooleanKeyword,
            FalseKeyword,
            NeverKeyword,
            NullKeyword,
            NumberKeyword,
            ObjectKeyword,
            StringKeyword,
            SymbolKeyword,
            ThisKeyword,
            TrueKeyword,
            UndefinedKeyword,
            UnknownKeyword,
            VoidKeyword,
        ] {
            table.register(kind, rules::types::keyword);
        }

        table
    }
}

/// One traversal over one parsed file. Owns the scope stack, the reference
/// registry, and the enclosing module path.
pub struct DocVisitor<'a> {
    table: &'a VisitorTable,
    pub(crate) arena: &'a NodeArena,
    pub(crate) docs: DocComments,
    pub(crate) scope: ScopeStack,
    pub(crate) refs: ReferenceRegistry,
    pub(crate) module_path: Vec<String>,
    next_ref_id: u32,
    strict: bool,
    unsupported: Vec<String>,
}

impl<'a> DocVisitor<'a> {
    pub fn new(
        table: &'a VisitorTable,
        arena: &'a NodeArena,
        docs: DocComments,
        strict: bool,
    ) -> DocVisitor<'a> {
        DocVisitor {
            table,
            arena,
            docs,
            scope: ScopeStack::new(),
            refs: ReferenceRegistry::new(),
            module_path: Vec::new(),
            next_ref_id: 0,
            strict,
            unsupported: Vec::new(),
        }
    }

    /// Dispatch entry point: a no-op for `NodeIndex::NONE`, otherwise looks
    /// up and invokes the rule for the node's kind. Unknown kinds are
    /// skipped in lenient mode and recorded in strict mode.
    pub fn visit(&mut self, out: &mut Vec<DocNode>, node: NodeIndex) {
        if node.is_none() {
            return;
        }
        let Some(thin) = self.arena.get(node) else {
            return;
        };
        match self.table.get(thin.kind) {
            Some(rule) => rule(self, out, node),
            None => {
                if self.strict {
                    self.unsupported
                        .push(format!("{:?} at offset {}", thin.kind, thin.pos));
                } else {
                    trace!(kind = ?thin.kind, pos = thin.pos, "skipping unregistered syntax kind");
                }
            }
        }
    }

    /// Visit a node into a fresh vector and lift its first record.
    pub(crate) fn visit_first(&mut self, node: NodeIndex) -> Option<Box<DocNode>> {
        let mut out = Vec::new();
        self.visit(&mut out, node);
        out.into_iter().next().map(Box::new)
    }

    pub(crate) fn visit_all(&mut self, nodes: &[NodeIndex]) -> Vec<DocNode> {
        let mut out = Vec::new();
        for node in nodes {
            self.visit(&mut out, *node);
        }
        out
    }

    /// Visit a name node and lift its spelling plus binding identifier.
    /// Degrades to empty strings when the name is absent.
    pub(crate) fn name_of(&mut self, node: NodeIndex) -> (String, String) {
        let mut out = Vec::new();
        self.visit(&mut out, node);
        match out.into_iter().next() {
            Some(record) => {
                let text = record.name_text().unwrap_or_default().to_string();
                let ref_name = record.ref_name().unwrap_or(&text).to_string();
                (text, ref_name)
            }
            None => (String::new(), String::new()),
        }
    }

    pub(crate) fn alloc_ref_id(&mut self) -> RefId {
        let id = RefId(self.next_ref_id);
        self.next_ref_id += 1;
        id
    }

    /// Fragment anchor for a declaration at the current module path: `#`
    /// at the top level, `#Y.P` inside `namespace Y.P`.
    pub(crate) fn current_anchor(&self) -> String {
        format!("#{}", self.module_path.join("."))
    }

    /// Register a reference record for deferred resolution unless its
    /// binding name is a type parameter currently in scope.
    pub(crate) fn register_reference(&mut self, ref_name: &str, id: RefId) {
        if ref_name.is_empty() || self.scope.contains(ref_name) {
            return;
        }
        self.refs.register_pending(ref_name, id);
    }

    /// End the traversal, yielding the reference registry and the strict
    /// mode unsupported-syntax reports.
    pub fn finish(self) -> (ReferenceRegistry, Vec<String>) {
        (self.refs, self.unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_core_kinds() {
        let table = VisitorTable::standard();
        for kind in [
            SyntaxKind::ClassDeclaration,
            SyntaxKind::TypeReference,
            SyntaxKind::MappedType,
            SyntaxKind::Identifier,
            SyntaxKind::NumberKeyword,
        ] {
            assert!(table.get(kind).is_some(), "{kind:?} not registered");
        }
    }

    #[test]
    #[should_panic(expected = "duplicate visitor registration")]
    fn duplicate_registration_panics() {
        let mut table = VisitorTable::standard();
        table.register(SyntaxKind::ClassDeclaration, rules::types::keyword);
    }
}
