//! End-to-end extraction tests: source text in, serialized records out.

use std::io::Write;
use std::path::Path;

use serde_json::{Value, json};
use tydoc_core::{DocError, DocOptions, generate_doc, generate_doc_full, generate_doc_source};

fn doc(source: &str) -> Vec<Value> {
    let nodes = generate_doc_source("test.ts", source, &DocOptions::default())
        .expect("extraction failed");
    nodes
        .into_iter()
        .map(|node| serde_json::to_value(node).expect("serialization failed"))
        .collect()
}

fn at<'a>(value: &'a Value, pointer: &str) -> &'a Value {
    value
        .pointer(pointer)
        .unwrap_or_else(|| panic!("missing {pointer} in {value}"))
}

#[test]
fn enum_with_documented_members() {
    let nodes = doc(r#"
/** Some values representing basic mathematical operations. */
export enum Operator {
  /** Comment for ADD */
  ADD = "+",
  /** Comment for DIV */
  DIV = "/",
  MUL = "*",
  SUB = 3
}
"#);
    assert_eq!(
        nodes[0],
        json!({
            "type": "enum",
            "name": "Operator",
            "documentation": "Some values representing basic mathematical operations.",
            "members": [
                {
                    "type": "EnumMember",
                    "name": "ADD",
                    "documentation": "Comment for ADD",
                    "initializer": { "type": "string", "text": "+" }
                },
                {
                    "type": "EnumMember",
                    "name": "DIV",
                    "documentation": "Comment for DIV",
                    "initializer": { "type": "string", "text": "/" }
                },
                {
                    "type": "EnumMember",
                    "name": "MUL",
                    "documentation": "",
                    "initializer": { "type": "string", "text": "*" }
                },
                {
                    "type": "EnumMember",
                    "name": "SUB",
                    "documentation": "",
                    "initializer": { "type": "number", "text": "3" }
                }
            ],
            "isPrivate": false
        })
    );
}

#[test]
fn interface_members_and_privacy() {
    let nodes = doc(r#"
/** Behaves like a sized collection. */
interface Sized {
  size(): number;
}
"#);
    assert_eq!(
        nodes[0],
        json!({
            "type": "interface",
            "name": "Sized",
            "documentation": "Behaves like a sized collection.",
            "parameters": [],
            "heritageClauses": [],
            "members": [
                {
                    "type": "MethodSignature",
                    "name": "size",
                    "documentation": "",
                    "parameters": [],
                    "returnType": { "type": "keyword", "name": "number" },
                    "typeParameters": [],
                    "optional": false
                }
            ],
            "isPrivate": true
        })
    );
}

#[test]
fn class_members_carry_visibility_and_flags() {
    let nodes = doc(r#"
/** A counter. */
export class Counter {
  private count: number;
  constructor(public start: number) {}
  /** Bump it. */
  increment(): number { return this.count; }
  static origin(): Counter { return new Counter(0); }
  get value(): number { return this.count; }
  set value(v: number) { this.count = v; }
}
"#);
    let class = &nodes[0];
    assert_eq!(at(class, "/type"), "class");
    assert_eq!(at(class, "/documentation"), "A counter.");
    assert_eq!(at(class, "/isPrivate"), false);

    assert_eq!(at(class, "/members/0/type"), "PropertyDeclaration");
    assert_eq!(at(class, "/members/0/visibility"), "private");

    assert_eq!(at(class, "/members/1/type"), "Constructor");
    assert_eq!(at(class, "/members/1/parameters/0/name"), "start");
    assert_eq!(at(class, "/members/1/parameters/0/visibility"), "public");

    assert_eq!(at(class, "/members/2/type"), "MethodDeclaration");
    assert_eq!(at(class, "/members/2/documentation"), "Bump it.");
    assert_eq!(at(class, "/members/2/isStatic"), false);

    assert_eq!(at(class, "/members/3/name"), "origin");
    assert_eq!(at(class, "/members/3/isStatic"), true);
    // The return type names the enclosing class, declared in this file.
    assert_eq!(at(class, "/members/3/returnType/name"), "Counter");
    assert_eq!(at(class, "/members/3/returnType/filename"), "#");

    assert_eq!(at(class, "/members/4/type"), "GetAccessor");
    assert_eq!(at(class, "/members/5/type"), "SetAccessor");
    assert_eq!(at(class, "/members/5/parameter/name"), "v");
}

#[test]
fn heritage_resolves_to_local_declarations() {
    let nodes = doc(r#"
export class Point {
  x: number;
  y: number;
}
export interface Iter {}
export class Vec4 extends Point implements Iter {}
export interface Point3 extends Point {}
"#);
    let vec4 = &nodes[2];
    assert_eq!(at(vec4, "/parent/type"), "ExpressionWithTypeArguments");
    assert_eq!(at(vec4, "/parent/expression"), "Point");
    assert_eq!(at(vec4, "/parent/filename"), "#");
    assert_eq!(at(vec4, "/implementsClauses/0/expression"), "Iter");
    assert_eq!(at(vec4, "/implementsClauses/0/filename"), "#");

    let point3 = &nodes[3];
    assert_eq!(at(point3, "/heritageClauses/0/expression"), "Point");
    assert_eq!(at(point3, "/heritageClauses/0/filename"), "#");
}

#[test]
fn namespace_declarations_get_path_anchors() {
    let nodes = doc(r#"
export namespace Y {
  export namespace P {
    export class Q {}
    export const q: Q = 1;
  }
}
"#);
    let outer = &nodes[0];
    assert_eq!(at(outer, "/type"), "module");
    assert_eq!(at(outer, "/name"), "Y");
    assert_eq!(at(outer, "/statements/0/name"), "P");
    assert_eq!(
        at(outer, "/statements/0/statements/1/declarations/0/dataType/filename"),
        "#Y.P"
    );
}

#[test]
fn imported_names_resolve_to_their_module() {
    let nodes = doc(r#"
import { Foo } from "./foo.ts";
export const f: Foo = 1;
"#);
    assert_eq!(
        nodes[0],
        json!({ "type": "import", "moduleSpecifier": "./foo.ts" })
    );
    let data_type = at(&nodes[1], "/declarations/0/dataType");
    assert_eq!(at(data_type, "/name"), "Foo");
    assert_eq!(at(data_type, "/filename"), "./foo.ts");
}

#[test]
fn export_assignment_records_property_name() {
    let nodes = doc(r#"
function hello() {}
export default hello;
"#);
    assert_eq!(at(&nodes[0], "/type"), "function");
    assert_eq!(at(&nodes[0], "/isPrivate"), true);
    assert_eq!(
        nodes[1],
        json!({ "type": "export", "propertyName": "hello", "isDefault": true })
    );
}

#[test]
fn export_list_emits_one_record_per_specifier() {
    let nodes = doc(r#"
const a = 1;
const b = 2;
export { a, b as c };
"#);
    assert_eq!(
        nodes[2],
        json!({ "type": "export", "name": "a", "isDefault": false })
    );
    assert_eq!(
        nodes[3],
        json!({ "type": "export", "name": "c", "propertyName": "b", "isDefault": false })
    );
}

#[test]
fn type_parameters_do_not_leak_out_of_their_declaration() {
    let (nodes, unresolved) = generate_doc_full(
        "test.ts",
        r#"
export function id<T>(x: T): T { return x; }
export type Alias = T;
"#,
        &DocOptions::default(),
    )
    .expect("extraction failed");

    // Inside `id`, `T` is the function's own type parameter.
    let id = serde_json::to_value(&nodes[0]).expect("serialization failed");
    assert_eq!(at(&id, "/parameters/0/dataType/name"), "T");
    assert!(at(&id, "/parameters/0/dataType").get("filename").is_none());

    // Outside it, `T` is an unknown name.
    assert_eq!(unresolved, vec!["T".to_string()]);
    let alias = serde_json::to_value(&nodes[1]).expect("serialization failed");
    assert!(at(&alias, "/definition").get("filename").is_none());
}

#[test]
fn mapped_type_over_keyof() {
    let nodes = doc("export type Readonlyish<T> = { [K in keyof T]: T[K] };");
    assert_eq!(
        at(&nodes[0], "/definition"),
        &json!({
            "type": "MappedType",
            "parameter": {
                "type": "TypeParameter",
                "name": "K",
                "constraint": {
                    "type": "TypeOperator",
                    "operator": "KeyOfKeyword",
                    "subject": { "type": "TypeReference", "name": "T" }
                }
            },
            "dataType": {
                "type": "IndexedAccessTypeNode",
                "index": { "type": "TypeReference", "name": "K" },
                "object": { "type": "TypeReference", "name": "T" }
            }
        })
    );
}

#[test]
fn reference_without_arguments_omits_the_field() {
    let nodes = doc(r#"
export type A = Promise;
export type B = Promise<string>;
"#);
    let bare = at(&nodes[0], "/definition");
    assert!(bare.get("arguments").is_none());
    let generic = at(&nodes[1], "/definition");
    assert_eq!(
        at(generic, "/arguments"),
        &json!([{ "type": "keyword", "name": "string" }])
    );
}

#[test]
fn strict_mode_accepts_supported_syntax() {
    let options = DocOptions { strict: true };
    let nodes = generate_doc_source(
        "test.ts",
        "export interface A { readonly x?: number; }",
        &options,
    )
    .expect("strict extraction failed");
    let a = serde_json::to_value(&nodes[0]).expect("serialization failed");
    assert_eq!(at(&a, "/members/0/optional"), true);
    assert_eq!(at(&a, "/members/0/isReadonly"), true);
}

#[test]
fn parse_errors_surface_with_position() {
    let err = generate_doc_source("broken.ts", "interface {", &DocOptions::default())
        .expect_err("malformed input must fail");
    match err {
        DocError::Parse { file_name, .. } => assert_eq!(file_name, "broken.ts"),
        other => panic!("expected a parse error, got {other}"),
    }
}

#[test]
fn reads_source_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "export enum E {{ A, B }}").expect("write");
    let nodes = generate_doc(file.path(), &DocOptions::default()).expect("extraction failed");
    let e = serde_json::to_value(&nodes[0]).expect("serialization failed");
    assert_eq!(at(&e, "/name"), "E");
    assert_eq!(at(&e, "/members/1/name"), "B");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = generate_doc(Path::new("/no/such/file.ts"), &DocOptions::default())
        .expect_err("missing file must fail");
    assert!(matches!(err, DocError::Io { .. }));
}
