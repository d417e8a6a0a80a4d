//! Rules for statements, declarations, and class/interface members.

use tydoc_parser::{NodeIndex, modifier_flags};
use tydoc_scanner::SyntaxKind;

use crate::records::DocNode;
use crate::visitor::DocVisitor;

fn visibility(flags: u32) -> Option<String> {
    if flags & modifier_flags::PRIVATE != 0 {
        Some("private".to_string())
    } else if flags & modifier_flags::PROTECTED != 0 {
        Some("protected".to_string())
    } else if flags & modifier_flags::PUBLIC != 0 {
        Some("public".to_string())
    } else {
        None
    }
}

fn is_private(flags: u32) -> bool {
    flags & modifier_flags::EXPORT == 0
}

pub fn import_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_import_decl(n)) else {
        return;
    };
    let specifier = arena
        .get(data.module_specifier)
        .and_then(|n| arena.get_literal(n))
        .map(|lit| lit.text.clone())
        .unwrap_or_default();

    // Every binding the import introduces resolves to the source module, so
    // later references to it link across files.
    if let Some(name) = arena.identifier_text(data.default_name) {
        v.refs.resolve(name, &specifier);
    }
    if let Some(name) = arena.identifier_text(data.namespace_name) {
        v.refs.resolve(name, &specifier);
    }
    for index in &data.named {
        let Some(spec) = arena.get(*index).and_then(|n| arena.get_specifier(n)) else {
            continue;
        };
        if let Some(name) = arena.identifier_text(spec.name) {
            v.refs.resolve(name, &specifier);
        }
    }

    e.push(DocNode::Import {
        module_specifier: specifier,
    });
}

pub fn export_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_export_decl(n)) else {
        return;
    };
    if data.specifiers.is_empty() {
        // `export * from "m"` has no named bindings to report.
        e.push(DocNode::Export {
            name: None,
            property_name: None,
            is_default: false,
        });
        return;
    }
    for index in &data.specifiers {
        let Some(spec) = arena.get(*index).and_then(|n| arena.get_specifier(n)) else {
            continue;
        };
        let name = arena.identifier_text(spec.name).map(str::to_string);
        let property_name = arena.identifier_text(spec.property_name).map(str::to_string);
        e.push(DocNode::Export {
            name,
            property_name,
            is_default: false,
        });
    }
}

/// `export = x` and `export default x` where `x` is not a declaration.
pub fn export_assignment(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_export_assignment(n)) else {
        return;
    };
    let property_name = arena.identifier_text(data.expression).map(str::to_string);
    e.push(DocNode::Export {
        name: None,
        property_name,
        is_default: data.modifier_flags & modifier_flags::DEFAULT != 0,
    });
}

pub fn class_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_class(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let name = arena.identifier_text(data.name).map(str::to_string);

    let depth = v.scope.depth();
    let type_parameters = v.visit_all(&data.type_parameters);

    // Split heritage into the single extends parent and implements entries.
    let mut parent = None;
    let mut implements_clauses = Vec::new();
    for index in &data.heritage_clauses {
        let Some(clause) = arena.get(*index).and_then(|n| arena.get_heritage_clause(n)) else {
            continue;
        };
        let entries = v.visit_all(&clause.types);
        if clause.token == SyntaxKind::ExtendsKeyword {
            parent = entries.into_iter().next().map(Box::new);
        } else {
            implements_clauses.extend(entries);
        }
    }

    let members = v.visit_all(&data.members);
    v.scope.truncate(depth);

    if let Some(name) = &name {
        let anchor = v.current_anchor();
        v.refs.resolve(name, &anchor);
    }
    e.push(DocNode::Class {
        name,
        documentation,
        parent,
        implements_clauses,
        members,
        type_parameters,
        is_abstract: data.modifier_flags & modifier_flags::ABSTRACT != 0,
        is_default: data.modifier_flags & modifier_flags::DEFAULT != 0,
        is_private: is_private(data.modifier_flags),
    });
}

pub fn interface_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_interface(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let name = arena
        .identifier_text(data.name)
        .map(str::to_string)
        .unwrap_or_default();

    let depth = v.scope.depth();
    let parameters = v.visit_all(&data.type_parameters);
    let mut heritage_clauses = Vec::new();
    for index in &data.heritage_clauses {
        let Some(clause) = arena.get(*index).and_then(|n| arena.get_heritage_clause(n)) else {
            continue;
        };
        heritage_clauses.extend(v.visit_all(&clause.types));
    }
    let members = v.visit_all(&data.members);
    v.scope.truncate(depth);

    let anchor = v.current_anchor();
    v.refs.resolve(&name, &anchor);
    e.push(DocNode::Interface {
        name,
        documentation,
        parameters,
        heritage_clauses,
        members,
        is_private: is_private(data.modifier_flags),
    });
}

pub fn type_alias_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_type_alias(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let name = arena
        .identifier_text(data.name)
        .map(str::to_string)
        .unwrap_or_default();

    let depth = v.scope.depth();
    let parameters = v.visit_all(&data.type_parameters);
    let definition = v.visit_first(data.type_node);
    v.scope.truncate(depth);

    let anchor = v.current_anchor();
    v.refs.resolve(&name, &anchor);
    e.push(DocNode::TypeAlias {
        name,
        definition,
        documentation,
        parameters,
        is_private: is_private(data.modifier_flags),
    });
}

pub fn enum_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_enum(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let name = arena
        .identifier_text(data.name)
        .map(str::to_string)
        .unwrap_or_default();
    let members = v.visit_all(&data.members);

    let anchor = v.current_anchor();
    v.refs.resolve(&name, &anchor);
    e.push(DocNode::Enum {
        name,
        documentation,
        members,
        is_private: is_private(data.modifier_flags),
    });
}

pub fn enum_member(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_enum_member(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let (name, _) = v.name_of(data.name);
    let initializer = v.visit_first(data.initializer);
    e.push(DocNode::EnumMember {
        name,
        documentation,
        initializer,
    });
}

pub fn function_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_signature(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let name = arena.identifier_text(data.name).map(str::to_string);

    let depth = v.scope.depth();
    let type_parameters = v.visit_all(&data.type_parameters);
    let parameters = v.visit_all(&data.parameters);
    let return_type = v.visit_first(data.return_type);
    v.scope.truncate(depth);

    e.push(DocNode::Function {
        name,
        documentation,
        parameters,
        return_type,
        type_parameters,
        is_default: data.modifier_flags & modifier_flags::DEFAULT != 0,
        is_private: is_private(data.modifier_flags),
    });
}

pub fn variable_statement(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_variable_statement(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let declarations = v.visit_all(&data.declarations);
    e.push(DocNode::VariableStatement {
        documentation,
        declarations,
        is_private: is_private(data.modifier_flags),
    });
}

pub fn variable_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(data) = arena.get(node).and_then(|n| arena.get_variable_declaration(n)) else {
        return;
    };
    let name = arena
        .identifier_text(data.name)
        .map(str::to_string)
        .unwrap_or_default();
    let data_type = v.visit_first(data.type_node);
    let initializer = v.visit_first(data.initializer);
    e.push(DocNode::Declaration {
        name,
        data_type,
        initializer,
    });
}

pub fn module_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_module(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let name = arena
        .identifier_text(data.name)
        .map(str::to_string)
        .or_else(|| {
            arena
                .get(data.name)
                .and_then(|n| arena.get_literal(n))
                .map(|lit| lit.text.clone())
        })
        .unwrap_or_default();

    // Declarations inside the namespace resolve to anchors under its path.
    v.module_path.push(name.clone());
    let statements = v.visit_all(&data.statements);
    v.module_path.pop();

    let anchor = v.current_anchor();
    v.refs.resolve(&name, &anchor);
    e.push(DocNode::Module {
        name,
        documentation,
        statements,
        is_private: is_private(data.modifier_flags),
    });
}

pub fn property_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_property(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let (name, _) = v.name_of(data.name);
    let data_type = v.visit_first(data.type_node);
    let initializer = v.visit_first(data.initializer);
    e.push(DocNode::PropertyDeclaration {
        name,
        documentation,
        data_type,
        initializer,
        optional: data.question,
        visibility: visibility(data.modifier_flags),
        is_static: data.modifier_flags & modifier_flags::STATIC != 0,
        is_abstract: data.modifier_flags & modifier_flags::ABSTRACT != 0,
        is_readonly: data.modifier_flags & modifier_flags::READONLY != 0,
    });
}

pub fn constructor(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_signature(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let parameters = v.visit_all(&data.parameters);
    e.push(DocNode::Constructor {
        documentation,
        parameters,
    });
}

pub fn method_declaration(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_signature(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let (name, _) = v.name_of(data.name);

    let depth = v.scope.depth();
    let type_parameters = v.visit_all(&data.type_parameters);
    let parameters = v.visit_all(&data.parameters);
    let return_type = v.visit_first(data.return_type);
    v.scope.truncate(depth);

    e.push(DocNode::MethodDeclaration {
        name,
        documentation,
        parameters,
        return_type,
        type_parameters,
        optional: data.question,
        visibility: visibility(data.modifier_flags),
        is_static: data.modifier_flags & modifier_flags::STATIC != 0,
        is_abstract: data.modifier_flags & modifier_flags::ABSTRACT != 0,
    });
}

pub fn get_accessor(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_signature(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let (name, _) = v.name_of(data.name);
    let return_type = v.visit_first(data.return_type);
    e.push(DocNode::GetAccessor {
        name,
        documentation,
        return_type,
        visibility: visibility(data.modifier_flags),
        is_static: data.modifier_flags & modifier_flags::STATIC != 0,
    });
}

pub fn set_accessor(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_signature(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let (name, _) = v.name_of(data.name);
    let parameter = data
        .parameters
        .first()
        .and_then(|p| v.visit_first(*p));
    e.push(DocNode::SetAccessor {
        name,
        documentation,
        parameter,
        visibility: visibility(data.modifier_flags),
        is_static: data.modifier_flags & modifier_flags::STATIC != 0,
    });
}

pub fn property_signature(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_property(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let (name, _) = v.name_of(data.name);
    let data_type = v.visit_first(data.type_node);
    e.push(DocNode::PropertySignature {
        name,
        documentation,
        data_type,
        optional: data.question,
        is_readonly: data.modifier_flags & modifier_flags::READONLY != 0,
    });
}

pub fn method_signature(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_signature(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let (name, _) = v.name_of(data.name);

    let depth = v.scope.depth();
    let type_parameters = v.visit_all(&data.type_parameters);
    let parameters = v.visit_all(&data.parameters);
    let return_type = v.visit_first(data.return_type);
    v.scope.truncate(depth);

    e.push(DocNode::MethodSignature {
        name,
        documentation,
        parameters,
        return_type,
        type_parameters,
        optional: data.question,
    });
}

pub fn call_signature(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_signature(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);

    let depth = v.scope.depth();
    let type_parameters = v.visit_all(&data.type_parameters);
    let parameters = v.visit_all(&data.parameters);
    let return_type = v.visit_first(data.return_type);
    v.scope.truncate(depth);

    e.push(DocNode::CallSignature {
        documentation,
        parameters,
        return_type,
        type_parameters,
    });
}

pub fn construct_signature(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_signature(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let parameters = v.visit_all(&data.parameters);
    let return_type = v.visit_first(data.return_type);
    e.push(DocNode::ConstructSignature {
        documentation,
        parameters,
        return_type,
    });
}

pub fn index_signature(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_signature(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let parameters = v.visit_all(&data.parameters);
    let return_type = v.visit_first(data.return_type);
    e.push(DocNode::IndexSignature {
        documentation,
        parameters,
        return_type,
    });
}

pub fn parameter(v: &mut DocVisitor, e: &mut Vec<DocNode>, node: NodeIndex) {
    let arena = v.arena;
    let Some(thin) = arena.get(node) else {
        return;
    };
    let Some(data) = arena.get_parameter(thin) else {
        return;
    };
    let documentation = v.docs.documentation_for(thin.pos);
    let (name, _) = v.name_of(data.name);
    let data_type = v.visit_first(data.type_node);
    let initializer = v.visit_first(data.initializer);
    e.push(DocNode::Parameter {
        name,
        documentation,
        data_type,
        optional: data.question || initializer.is_some(),
        rest: data.dot_dot_dot,
        visibility: visibility(data.modifier_flags),
        initializer,
    });
}
