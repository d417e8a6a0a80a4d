//! Rules for names, literals, and type expressions.

use tydoc_parser::{NodeArena, NodeIndex};
use tydoc_scanner::SyntaxKind;

use crate::records::DocNode;
use crate::visitor::DocVisitor;

pub fn identifier(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(text) = arena.identifier_text(node) else {
        return;
    };
    let text = text.to_string();
    e.push(DocNode::Name {
        ref_name: text.clone(),
        text,
    });
}

/// `QualifiedName` and `PropertyAccessExpression`: the full dotted spelling
/// plus the leftmost identifier, which is what name resolution binds.
pub fn entity_name(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let Some((text, ref_name)) = entity_text(v.arena, node) else {
        return;
    };
    e.push(DocNode::Name { text, ref_name });
}

fn entity_text(arena: &NodeArena, node: NodeIndex) -> Option<(String, String)> {
    let thin = arena.get(node)?;
    match thin.kind {
        SyntaxKind::Identifier => {
            let text = arena.identifier_text(node)?.to_string();
            Some((text.clone(), text))
        }
        SyntaxKind::QualifiedName | SyntaxKind::PropertyAccessExpression => {
            let data = arena.get_name_pair(thin)?;
            let (left, ref_name) = entity_text(arena, data.left)?;
            let right = arena.identifier_text(data.right)?;
            Some((format!("{left}.{right}"), ref_name))
        }
        _ => None,
    }
}

pub fn computed_property_name(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_computed_property(n)) else {
        return;
    };
    v.visit(e, data.expression);
}

pub fn string_literal(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_literal(n)) else {
        return;
    };
    e.push(DocNode::StringLiteral {
        text: data.text.clone(),
    });
}

pub fn numeric_literal(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_literal(n)) else {
        return;
    };
    e.push(DocNode::NumberLiteral {
        text: data.text.clone(),
    });
}

/// Keyword tokens in type position (`number`, `void`, `this`, `null`, ...).
pub fn keyword(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let Some(thin) = v.arena.get(node) else {
        return;
    };
    let Some(name) = thin.kind.keyword_text() else {
        return;
    };
    e.push(DocNode::Keyword {
        name: name.to_string(),
    });
}

pub fn type_parameter(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_type_parameter(n)) else {
        return;
    };
    // The constraint is visited before the parameter's own name enters
    // scope, so `T extends Something<T>` still registers the self reference.
    let constraint = v.visit_first(data.constraint);
    let default = v.visit_first(data.default);
    let (text, ref_name) = v.name_of(data.name);
    v.scope.push(ref_name);
    e.push(DocNode::TypeParameter {
        name: text,
        constraint,
        default,
    });
}

pub fn type_reference(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_type_ref(n)) else {
        return;
    };
    let (text, ref_name) = v.name_of(data.type_name);
    let arguments = data
        .type_arguments
        .as_ref()
        .map(|arguments| v.visit_all(arguments));
    let id = v.alloc_ref_id();
    e.push(DocNode::TypeReference {
        name: text,
        arguments,
        filename: None,
        ref_id: id,
    });
    v.register_reference(&ref_name, id);
}

pub fn expression_with_type_arguments(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_expr_with_type_args(n)) else {
        return;
    };
    let (text, ref_name) = v.name_of(data.expression);
    let arguments = data
        .type_arguments
        .as_ref()
        .map(|arguments| v.visit_all(arguments));
    let id = v.alloc_ref_id();
    e.push(DocNode::ExpressionWithTypeArguments {
        expression: text,
        arguments,
        filename: None,
        ref_id: id,
    });
    v.register_reference(&ref_name, id);
}

pub fn union_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_composite_type(n)) else {
        return;
    };
    let types = v.visit_all(&data.types);
    e.push(DocNode::UnionType { types });
}

pub fn intersection_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_composite_type(n)) else {
        return;
    };
    let types = v.visit_all(&data.types);
    e.push(DocNode::IntersectionType { types });
}

pub fn tuple_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_composite_type(n)) else {
        return;
    };
    let element_types = v.visit_all(&data.types);
    e.push(DocNode::TupleType { element_types });
}

pub fn array_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_wrapped_type(n)) else {
        return;
    };
    let element_type = v.visit_first(data.inner);
    e.push(DocNode::ArrayType { element_type });
}

pub fn parenthesized_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_wrapped_type(n)) else {
        return;
    };
    let element_type = v.visit_first(data.inner);
    e.push(DocNode::ParenthesizedType { element_type });
}

/// A literal type is transparent: the wrapped literal record stands in for
/// it directly.
pub fn literal_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_wrapped_type(n)) else {
        return;
    };
    v.visit(e, data.inner);
}

/// `FunctionType` and `ConstructorType` share one record shape.
pub fn function_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_signature(n)) else {
        return;
    };
    let depth = v.scope.depth();
    let type_parameters = v.visit_all(&data.type_parameters);
    let parameters = v.visit_all(&data.parameters);
    let return_type = v.visit_first(data.return_type);
    e.push(DocNode::FunctionType {
        parameters,
        return_type,
        type_parameters,
    });
    v.scope.truncate(depth);
}

pub fn type_literal(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_type_literal(n)) else {
        return;
    };
    let members = v.visit_all(&data.members);
    e.push(DocNode::TypeLiteral { members });
}

pub fn mapped_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_mapped_type(n)) else {
        return;
    };
    let depth = v.scope.depth();
    let parameter = v.visit_first(data.type_parameter);
    let data_type = v.visit_first(data.type_node);
    e.push(DocNode::MappedType {
        parameter,
        data_type,
    });
    v.scope.truncate(depth);
}

pub fn conditional_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_conditional_type(n)) else {
        return;
    };
    let check_type = v.visit_first(data.check_type);
    let extends_type = v.visit_first(data.extends_type);
    let false_type = v.visit_first(data.false_type);
    let true_type = v.visit_first(data.true_type);
    e.push(DocNode::ConditionalType {
        check_type,
        extends_type,
        false_type,
        true_type,
    });
}

pub fn indexed_access_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_indexed_access_type(n)) else {
        return;
    };
    let index = v.visit_first(data.index_type);
    let object = v.visit_first(data.object_type);
    e.push(DocNode::IndexedAccessType { index, object });
}

pub fn type_operator(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_type_operator(n)) else {
        return;
    };
    let subject = v.visit_first(data.type_node);
    e.push(DocNode::TypeOperator {
        operator: format!("{:?}", data.operator),
        subject,
    });
}

/// The inferred parameter's name leaves scope again immediately; `infer U`
/// only binds inside the surrounding conditional's branches, which the
/// output format does not model.
pub fn infer_type(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_wrapped_type(n)) else {
        return;
    };
    let depth = v.scope.depth();
    let parameter = v.visit_first(data.inner);
    e.push(DocNode::InferType { parameter });
    v.scope.truncate(depth);
}

pub fn type_predicate(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_type_predicate(n)) else {
        return;
    };
    let (parameter_name, _) = v.name_of(data.parameter_name);
    let data_type = v.visit_first(data.type_node);
    e.push(DocNode::TypePredicate {
        parameter_name,
        data_type,
    });
}

pub fn type_query(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_wrapped_type(n)) else {
        return;
    };
    let name = v.visit_first(data.inner);
    e.push(DocNode::TypeQuery { name });
}
