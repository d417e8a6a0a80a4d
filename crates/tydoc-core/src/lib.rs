//! Documentation extraction for TypeScript sources.
//!
//! One file goes through three stages: parse into a thin-node arena, walk
//! the top-level statements with a [`visitor::VisitorTable`] of per-kind
//! serialization rules, then backfill `filename` links on reference records
//! from the bindings collected during the walk. The output is a tree of
//! [`records::DocNode`] values ready for JSON serialization.

pub mod docs;
pub mod records;
pub mod registry;
pub mod rules;
pub mod scope;
pub mod visitor;

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;
use tydoc_parser::ParserState;

pub use docs::DocComments;
pub use records::{DocNode, RefId};
pub use visitor::{DocVisitor, RuleFn, VisitorTable};

#[derive(Clone, Debug, Default)]
pub struct DocOptions {
    /// Error on syntax kinds with no registered rule instead of skipping
    /// them.
    pub strict: bool,
}

#[derive(Debug)]
pub enum DocError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse {
        file_name: String,
        message: String,
        start: u32,
    },
    UnsupportedSyntax {
        file_name: String,
        detail: String,
    },
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocError::Io { path, source } => write!(f, "failed to read {path}: {source}"),
            DocError::Parse {
                file_name,
                message,
                start,
            } => write!(f, "{file_name}: parse error at offset {start}: {message}"),
            DocError::UnsupportedSyntax { file_name, detail } => {
                write!(f, "{file_name}: unsupported syntax: {detail}")
            }
        }
    }
}

impl Error for DocError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DocError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Extract documentation records from a file on disk.
pub fn generate_doc(path: &Path, options: &DocOptions) -> Result<Vec<DocNode>, DocError> {
    let source = fs::read_to_string(path).map_err(|source| DocError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path.display().to_string();
    generate_doc_source(&file_name, &source, options)
}

/// Extract documentation records from in-memory source text.
pub fn generate_doc_source(
    file_name: &str,
    source: &str,
    options: &DocOptions,
) -> Result<Vec<DocNode>, DocError> {
    generate_doc_full(file_name, source, options).map(|(nodes, _)| nodes)
}

/// Full extraction result: the record tree plus the reference names that
/// never resolved to a declaration or import in this file.
pub fn generate_doc_full(
    file_name: &str,
    source: &str,
    options: &DocOptions,
) -> Result<(Vec<DocNode>, Vec<String>), DocError> {
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    if let Some(diagnostic) = parser.get_diagnostics().first() {
        return Err(DocError::Parse {
            file_name: file_name.to_string(),
            message: diagnostic.message.clone(),
            start: diagnostic.start,
        });
    }
    let arena = parser.into_arena();
    let Some(source_file) = arena.get_source_file(root) else {
        return Ok((Vec::new(), Vec::new()));
    };

    let docs = DocComments::new(source_file.comments.clone(), source_file.text.clone());
    let table = VisitorTable::standard();
    let mut visitor = DocVisitor::new(&table, &arena, docs, options.strict);
    let mut nodes = Vec::new();
    for statement in &source_file.statements {
        visitor.visit(&mut nodes, *statement);
    }
    let (refs, unsupported) = visitor.finish();
    if options.strict && !unsupported.is_empty() {
        return Err(DocError::UnsupportedSyntax {
            file_name: file_name.to_string(),
            detail: unsupported.join(", "),
        });
    }

    let (resolved, unresolved) = refs.into_parts();
    for node in &mut nodes {
        patch_filenames(node, &resolved);
    }
    if !unresolved.is_empty() {
        debug!(file = file_name, names = ?unresolved, "unresolved type references");
    }
    Ok((nodes, unresolved))
}

fn patch_opt(node: &mut Option<Box<DocNode>>, resolved: &FxHashMap<RefId, String>) {
    if let Some(node) = node {
        patch_filenames(node, resolved);
    }
}

fn patch_all(nodes: &mut [DocNode], resolved: &FxHashMap<RefId, String>) {
    for node in nodes {
        patch_filenames(node, resolved);
    }
}

/// Backfill `filename` on reference records throughout the tree once every
/// declaration and import in the file has registered its binding.
fn patch_filenames(node: &mut DocNode, resolved: &FxHashMap<RefId, String>) {
    match node {
        DocNode::TypeReference {
            arguments,
            filename,
            ref_id,
            ..
        }
        | DocNode::ExpressionWithTypeArguments {
            arguments,
            filename,
            ref_id,
            ..
        } => {
            if let Some(found) = resolved.get(ref_id) {
                *filename = Some(found.clone());
            }
            if let Some(arguments) = arguments {
                patch_all(arguments, resolved);
            }
        }

        DocNode::Class {
            parent,
            implements_clauses,
            members,
            type_parameters,
            ..
        } => {
            patch_opt(parent, resolved);
            patch_all(implements_clauses, resolved);
            patch_all(members, resolved);
            patch_all(type_parameters, resolved);
        }
        DocNode::Interface {
            parameters,
            heritage_clauses,
            members,
            ..
        } => {
            patch_all(parameters, resolved);
            patch_all(heritage_clauses, resolved);
            patch_all(members, resolved);
        }
        DocNode::Enum { members, .. } | DocNode::TypeLiteral { members } => {
            patch_all(members, resolved);
        }
        DocNode::EnumMember { initializer, .. } | DocNode::InferType {
            parameter: initializer,
        } => {
            patch_opt(initializer, resolved);
        }
        DocNode::TypeAlias {
            definition,
            parameters,
            ..
        } => {
            patch_opt(definition, resolved);
            patch_all(parameters, resolved);
        }
        DocNode::Function {
            parameters,
            return_type,
            type_parameters,
            ..
        }
        | DocNode::MethodDeclaration {
            parameters,
            return_type,
            type_parameters,
            ..
        }
        | DocNode::MethodSignature {
            parameters,
            return_type,
            type_parameters,
            ..
        }
        | DocNode::CallSignature {
            parameters,
            return_type,
            type_parameters,
            ..
        }
        | DocNode::FunctionType {
            parameters,
            return_type,
            type_parameters,
        } => {
            patch_all(parameters, resolved);
            patch_opt(return_type, resolved);
            patch_all(type_parameters, resolved);
        }
        DocNode::Module { statements, .. } => patch_all(statements, resolved),
        DocNode::VariableStatement { declarations, .. } => patch_all(declarations, resolved),
        DocNode::Declaration {
            data_type,
            initializer,
            ..
        }
        | DocNode::PropertyDeclaration {
            data_type,
            initializer,
            ..
        }
        | DocNode::Parameter {
            data_type,
            initializer,
            ..
        } => {
            patch_opt(data_type, resolved);
            patch_opt(initializer, resolved);
        }
        DocNode::Constructor { parameters, .. } => patch_all(parameters, resolved),
        DocNode::GetAccessor { return_type, .. } => patch_opt(return_type, resolved),
        DocNode::SetAccessor { parameter, .. } => patch_opt(parameter, resolved),
        DocNode::PropertySignature { data_type, .. }
        | DocNode::TypePredicate { data_type, .. } => patch_opt(data_type, resolved),
        DocNode::ConstructSignature {
            parameters,
            return_type,
            ..
        }
        | DocNode::IndexSignature {
            parameters,
            return_type,
            ..
        } => {
            patch_all(parameters, resolved);
            patch_opt(return_type, resolved);
        }
        DocNode::TypeParameter {
            constraint,
            default,
            ..
        } => {
            patch_opt(constraint, resolved);
            patch_opt(default, resolved);
        }
        DocNode::UnionType { types } | DocNode::IntersectionType { types } => {
            patch_all(types, resolved);
        }
        DocNode::ArrayType { element_type } | DocNode::ParenthesizedType { element_type } => {
            patch_opt(element_type, resolved);
        }
        DocNode::TupleType { element_types } => patch_all(element_types, resolved),
        DocNode::MappedType {
            parameter,
            data_type,
        } => {
            patch_opt(parameter, resolved);
            patch_opt(data_type, resolved);
        }
        DocNode::ConditionalType {
            check_type,
            extends_type,
            false_type,
            true_type,
        } => {
            patch_opt(check_type, resolved);
            patch_opt(extends_type, resolved);
            patch_opt(false_type, resolved);
            patch_opt(true_type, resolved);
        }
        DocNode::IndexedAccessType { index, object } => {
            patch_opt(index, resolved);
            patch_opt(object, resolved);
        }
        DocNode::TypeOperator { subject, .. } => patch_opt(subject, resolved),
        DocNode::TypeQuery { name } => patch_opt(name, resolved),

        DocNode::Import { .. }
        | DocNode::Export { .. }
        | DocNode::Name { .. }
        | DocNode::Keyword { .. }
        | DocNode::StringLiteral { .. }
        | DocNode::NumberLiteral { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patches_nested_reference_filenames() {
        let mut resolved = FxHashMap::default();
        resolved.insert(RefId(0), "#".to_string());
        let mut node = DocNode::ArrayType {
            element_type: Some(Box::new(DocNode::TypeReference {
                name: "Point".to_string(),
                arguments: None,
                filename: None,
                ref_id: RefId(0),
            })),
        };
        patch_filenames(&mut node, &resolved);
        let DocNode::ArrayType {
            element_type: Some(inner),
        } = node
        else {
            panic!("array type lost its element");
        };
        let DocNode::TypeReference { filename, .. } = *inner else {
            panic!("element is not a reference");
        };
        assert_eq!(filename.as_deref(), Some("#"));
    }

    #[test]
    fn unresolved_references_keep_no_filename() {
        let resolved = FxHashMap::default();
        let mut node = DocNode::TypeReference {
            name: "Unknown".to_string(),
            arguments: None,
            filename: None,
            ref_id: RefId(7),
        };
        patch_filenames(&mut node, &resolved);
        let DocNode::TypeReference { filename, .. } = node else {
            unreachable!();
        };
        assert!(filename.is_none());
    }
}
