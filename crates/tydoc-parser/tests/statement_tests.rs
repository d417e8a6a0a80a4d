//! Statement and declaration parsing tests.

use tydoc_parser::{NodeArena, NodeIndex, ParseDiagnostic, ParserState, modifier_flags, node_flags};
use tydoc_scanner::SyntaxKind;

fn parse(source: &str) -> (NodeArena, NodeIndex, Vec<ParseDiagnostic>) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let diagnostics = parser.get_diagnostics().to_vec();
    (parser.into_arena(), root, diagnostics)
}

fn statements(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    arena.get_source_file(root).unwrap().statements.clone()
}

#[test]
fn parses_class_with_members() {
    let (arena, root, diagnostics) = parse(
        r#"
        export class Point {
            private x: number;
            constructor(x: number, public y: number) {}
            add(other: Point): Point { return this; }
            static origin(): Point { return new Point(0, 0); }
        }
        "#,
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 1);

    let node = arena.get(stmts[0]).unwrap();
    assert_eq!(node.kind, SyntaxKind::ClassDeclaration);
    let class = arena.get_class(node).unwrap();
    assert_eq!(arena.identifier_text(class.name), Some("Point"));
    assert_ne!(class.modifier_flags & modifier_flags::EXPORT, 0);
    assert_eq!(class.members.len(), 4);

    let kinds: Vec<SyntaxKind> = class
        .members
        .iter()
        .map(|m| arena.get(*m).unwrap().kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PropertyDeclaration,
            SyntaxKind::Constructor,
            SyntaxKind::MethodDeclaration,
            SyntaxKind::MethodDeclaration,
        ]
    );

    let property = arena.get_property(arena.get(class.members[0]).unwrap()).unwrap();
    assert_ne!(property.modifier_flags & modifier_flags::PRIVATE, 0);

    let ctor = arena.get_signature(arena.get(class.members[1]).unwrap()).unwrap();
    assert_eq!(ctor.parameters.len(), 2);
    let second = arena.get_parameter(arena.get(ctor.parameters[1]).unwrap()).unwrap();
    assert_ne!(second.modifier_flags & modifier_flags::PUBLIC, 0);

    let statik = arena.get_signature(arena.get(class.members[3]).unwrap()).unwrap();
    assert_ne!(statik.modifier_flags & modifier_flags::STATIC, 0);
}

#[test]
fn parses_abstract_class_and_heritage() {
    let (arena, root, diagnostics) = parse(
        "export abstract class Derived<T> extends Base<T> implements A, B.C {}",
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    let class = arena.get_class(arena.get(stmts[0]).unwrap()).unwrap();
    assert_ne!(class.modifier_flags & modifier_flags::ABSTRACT, 0);
    assert_eq!(class.type_parameters.len(), 1);
    assert_eq!(class.heritage_clauses.len(), 2);

    let extends = arena
        .get_heritage_clause(arena.get(class.heritage_clauses[0]).unwrap())
        .unwrap();
    assert_eq!(extends.token, SyntaxKind::ExtendsKeyword);
    assert_eq!(extends.types.len(), 1);
    let target = arena
        .get_expr_with_type_args(arena.get(extends.types[0]).unwrap())
        .unwrap();
    assert_eq!(arena.identifier_text(target.expression), Some("Base"));
    assert_eq!(target.type_arguments.as_ref().map(|a| a.len()), Some(1));

    let implements = arena
        .get_heritage_clause(arena.get(class.heritage_clauses[1]).unwrap())
        .unwrap();
    assert_eq!(implements.token, SyntaxKind::ImplementsKeyword);
    assert_eq!(implements.types.len(), 2);
    let dotted = arena
        .get_expr_with_type_args(arena.get(implements.types[1]).unwrap())
        .unwrap();
    let pair = arena.get_name_pair(arena.get(dotted.expression).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(pair.left), Some("B"));
    assert_eq!(arena.identifier_text(pair.right), Some("C"));
}

#[test]
fn parses_interface_members() {
    let (arena, root, diagnostics) = parse(
        r#"
        interface Shape {
            readonly area: number;
            name?: string;
            scale(factor: number): Shape;
            (x: number): number;
            new (x: number): Shape;
            [key: string]: any;
        }
        "#,
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    let interface = arena.get_interface(arena.get(stmts[0]).unwrap()).unwrap();
    assert_eq!(interface.members.len(), 6);

    let kinds: Vec<SyntaxKind> = interface
        .members
        .iter()
        .map(|m| arena.get(*m).unwrap().kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PropertySignature,
            SyntaxKind::PropertySignature,
            SyntaxKind::MethodSignature,
            SyntaxKind::CallSignature,
            SyntaxKind::ConstructSignature,
            SyntaxKind::IndexSignature,
        ]
    );

    let readonly = arena.get_property(arena.get(interface.members[0]).unwrap()).unwrap();
    assert_ne!(readonly.modifier_flags & modifier_flags::READONLY, 0);
    let optional = arena.get_property(arena.get(interface.members[1]).unwrap()).unwrap();
    assert!(optional.question);
}

#[test]
fn parses_enum_declaration() {
    let (arena, root, diagnostics) = parse(
        r#"
        enum Operator {
            ADD = "+",
            SUB = 3,
            MUL,
        }
        "#,
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    let enum_decl = arena.get_enum(arena.get(stmts[0]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(enum_decl.name), Some("Operator"));
    assert_eq!(enum_decl.members.len(), 3);

    let add = arena.get_enum_member(arena.get(enum_decl.members[0]).unwrap()).unwrap();
    let add_init = arena.get(add.initializer).unwrap();
    assert_eq!(add_init.kind, SyntaxKind::StringLiteral);
    assert_eq!(arena.get_literal(add_init).unwrap().text, "+");

    let sub = arena.get_enum_member(arena.get(enum_decl.members[1]).unwrap()).unwrap();
    let sub_init = arena.get(sub.initializer).unwrap();
    assert_eq!(sub_init.kind, SyntaxKind::NumericLiteral);
    assert_eq!(arena.get_literal(sub_init).unwrap().text, "3");

    let mul = arena.get_enum_member(arena.get(enum_decl.members[2]).unwrap()).unwrap();
    assert!(mul.initializer.is_none());
}

#[test]
fn parses_const_enum_declaration() {
    let (arena, root, diagnostics) = parse("export const enum Direction { Up, Down }");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 1);
    let node = arena.get(stmts[0]).unwrap();
    assert_eq!(node.kind, SyntaxKind::EnumDeclaration);
    let enum_decl = arena.get_enum(node).unwrap();
    assert_eq!(arena.identifier_text(enum_decl.name), Some("Direction"));
    assert_ne!(enum_decl.modifier_flags & modifier_flags::CONST, 0);
    assert_eq!(enum_decl.members.len(), 2);
}

#[test]
fn parses_negative_initializer_as_numeric_literal() {
    let (arena, root, diagnostics) = parse("export const down = -1;");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    let statement = arena.get_variable_statement(arena.get(stmts[0]).unwrap()).unwrap();
    let down = arena
        .get_variable_declaration(arena.get(statement.declarations[0]).unwrap())
        .unwrap();
    let initializer = arena.get(down.initializer).unwrap();
    assert_eq!(initializer.kind, SyntaxKind::NumericLiteral);
    assert_eq!(arena.get_literal(initializer).unwrap().text, "-1");
}

#[test]
fn parses_import_forms() {
    let (arena, root, diagnostics) = parse(
        r#"
        import "./side-effect";
        import def from "./a";
        import * as ns from "./b";
        import { X, Y as Z } from "./c";
        import def2, { W } from "./d";
        import legacy = require("./e");
        "#,
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 6);

    let bare = arena.get_import_decl(arena.get(stmts[0]).unwrap()).unwrap();
    assert!(bare.default_name.is_none());
    let spec = arena.get(bare.module_specifier).unwrap();
    assert_eq!(arena.get_literal(spec).unwrap().text, "./side-effect");

    let default = arena.get_import_decl(arena.get(stmts[1]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(default.default_name), Some("def"));

    let namespace = arena.get_import_decl(arena.get(stmts[2]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(namespace.namespace_name), Some("ns"));

    let named = arena.get_import_decl(arena.get(stmts[3]).unwrap()).unwrap();
    assert_eq!(named.named.len(), 2);
    let renamed = arena.get_specifier(arena.get(named.named[1]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(renamed.property_name), Some("Y"));
    assert_eq!(arena.identifier_text(renamed.name), Some("Z"));

    let mixed = arena.get_import_decl(arena.get(stmts[4]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(mixed.default_name), Some("def2"));
    assert_eq!(mixed.named.len(), 1);

    let require = arena.get_import_decl(arena.get(stmts[5]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(require.default_name), Some("legacy"));
    let require_spec = arena.get(require.module_specifier).unwrap();
    assert_eq!(arena.get_literal(require_spec).unwrap().text, "./e");
}

#[test]
fn parses_export_forms() {
    let (arena, root, diagnostics) = parse(
        r#"
        export { A, B as C };
        export { D } from "./d";
        export * from "./all";
        export default point;
        "#,
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 4);

    let local = arena.get_export_decl(arena.get(stmts[0]).unwrap()).unwrap();
    assert_eq!(local.specifiers.len(), 2);
    assert!(local.module_specifier.is_none());
    let renamed = arena.get_specifier(arena.get(local.specifiers[1]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(renamed.property_name), Some("B"));
    assert_eq!(arena.identifier_text(renamed.name), Some("C"));

    let reexport = arena.get_export_decl(arena.get(stmts[1]).unwrap()).unwrap();
    assert!(reexport.module_specifier.is_some());

    let star = arena.get_export_decl(arena.get(stmts[2]).unwrap()).unwrap();
    assert!(star.specifiers.is_empty());
    assert!(star.module_specifier.is_some());

    let default = arena.get_export_assignment(arena.get(stmts[3]).unwrap()).unwrap();
    assert_ne!(default.modifier_flags & modifier_flags::DEFAULT, 0);
    assert_eq!(arena.identifier_text(default.expression), Some("point"));
}

#[test]
fn parses_export_default_class() {
    let (arena, root, diagnostics) = parse("export default class Main {}");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    let class = arena.get_class(arena.get(stmts[0]).unwrap()).unwrap();
    assert_ne!(class.modifier_flags & modifier_flags::EXPORT, 0);
    assert_ne!(class.modifier_flags & modifier_flags::DEFAULT, 0);
}

#[test]
fn parses_dotted_namespace_as_nested_modules() {
    let (arena, root, diagnostics) = parse("namespace A.B { export const x = 1; }");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    let outer = arena.get_module(arena.get(stmts[0]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(outer.name), Some("A"));
    assert_eq!(outer.statements.len(), 1);

    let inner = arena.get_module(arena.get(outer.statements[0]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(inner.name), Some("B"));
    assert_eq!(inner.statements.len(), 1);
    let variable = arena
        .get_variable_statement(arena.get(inner.statements[0]).unwrap())
        .unwrap();
    assert_ne!(variable.modifier_flags & modifier_flags::EXPORT, 0);
}

#[test]
fn parses_variable_statements() {
    let (arena, root, diagnostics) = parse("const x: number = 1, y = \"two\";\nlet z;");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 2);

    let constant = arena.get_variable_statement(arena.get(stmts[0]).unwrap()).unwrap();
    assert_eq!(constant.flags, node_flags::CONST);
    assert_eq!(constant.declarations.len(), 2);
    let x = arena
        .get_variable_declaration(arena.get(constant.declarations[0]).unwrap())
        .unwrap();
    assert_eq!(arena.identifier_text(x.name), Some("x"));
    assert!(x.type_node.is_some());
    assert!(x.initializer.is_some());

    let letting = arena.get_variable_statement(arena.get(stmts[1]).unwrap()).unwrap();
    assert_eq!(letting.flags, node_flags::LET);
}

#[test]
fn parses_function_declaration() {
    let (arena, root, diagnostics) = parse(
        "export function map<T, U>(items: T[], f: (item: T) => U): U[] { return items.map(f); }",
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    let node = arena.get(stmts[0]).unwrap();
    assert_eq!(node.kind, SyntaxKind::FunctionDeclaration);
    let function = arena.get_signature(node).unwrap();
    assert_eq!(arena.identifier_text(function.name), Some("map"));
    assert_eq!(function.type_parameters.len(), 2);
    assert_eq!(function.parameters.len(), 2);
    assert!(function.return_type.is_some());
}

#[test]
fn parses_accessors() {
    let (arena, root, diagnostics) = parse(
        r#"
        class Temperature {
            get celsius(): number { return this.value; }
            set celsius(value: number) { this.value = value; }
        }
        "#,
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    let class = arena.get_class(arena.get(stmts[0]).unwrap()).unwrap();
    assert_eq!(class.members.len(), 2);
    assert_eq!(arena.get(class.members[0]).unwrap().kind, SyntaxKind::GetAccessor);
    assert_eq!(arena.get(class.members[1]).unwrap().kind, SyntaxKind::SetAccessor);
}

#[test]
fn member_named_like_modifier_is_a_property() {
    let (arena, root, diagnostics) = parse("class X { static: number; }");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    let class = arena.get_class(arena.get(stmts[0]).unwrap()).unwrap();
    assert_eq!(class.members.len(), 1);
    let property = arena.get_property(arena.get(class.members[0]).unwrap()).unwrap();
    assert_eq!(property.modifier_flags, modifier_flags::NONE);
    assert_eq!(arena.identifier_text(property.name), Some("static"));
}

#[test]
fn skips_executable_statements() {
    let (arena, root, diagnostics) = parse(
        r#"
        console.log("hello");
        if (cond) { doThing(); }
        export const kept = 1;
        "#,
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 1);
    assert_eq!(
        arena.get(stmts[0]).unwrap().kind,
        SyntaxKind::VariableStatement
    );
}

#[test]
fn reports_diagnostics_on_malformed_input() {
    let (_arena, _root, diagnostics) = parse("interface {");
    assert!(!diagnostics.is_empty());
}
