//! Project introspection: import path, API namespace and database dialect.
//!
//! These read generated project files (`main.go`, `router/router.go`,
//! `db/db.go`) only for the few facts the templates need.

use std::path::Path;

use serde::Serialize;
use tree_sitter::{Node, Tree};

use crate::diagnostic::GeneratorError;
use super::parser::GoParser;
use super::tag::unquote;

/// Import prefix of gorm's dialect packages; the last segment names the database.
pub const DB_DIALECT_PREFIX: &str = "github.com/jinzhu/gorm/dialects/";

/// The project's root import directory, split into its segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPath {
    /// Full directory, e.g. `github.com/wantedly/api-server`.
    pub dir: String,
    pub vcs: String,
    pub user: String,
    /// Everything after the user segment.
    pub project: String,
}

impl ImportPath {
    /// Splits `host/user/project`; fewer than three segments is an error.
    pub fn parse(dir: &str) -> Result<Self, GeneratorError> {
        let mut parts = dir.splitn(3, '/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(vcs), Some(user), Some(project))
                if !vcs.is_empty() && !user.is_empty() && !project.is_empty() =>
            {
                Ok(Self {
                    dir: dir.to_string(),
                    vcs: vcs.to_string(),
                    user: user.to_string(),
                    project: project.to_string(),
                })
            }
            _ => Err(GeneratorError::InvalidImportPath { path: dir.to_string() }),
        }
    }
}

/// Reads and parses a Go file, rejecting syntax errors.
fn parse_file(path: &Path) -> Result<(String, Tree), GeneratorError> {
    let source = super::read_source(path)?;
    let mut parser = GoParser::new()?;
    let tree = parser.parse_tree(&source, path)?;
    Ok((source, tree))
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// String literal value of a node, if it is one.
fn string_literal(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "interpreted_string_literal" | "raw_string_literal" => unquote(text(node, source)),
        _ => None,
    }
}

/// Every import path declared by a file, in declaration order.
pub fn parse_imports(path: &Path) -> Result<Vec<String>, GeneratorError> {
    let (source, tree) = parse_file(path)?;
    Ok(imports_of(tree.root_node(), &source))
}

fn imports_of(root: Node, source: &str) -> Vec<String> {
    let mut imports = Vec::new();
    let mut cursor = root.walk();

    for decl in root.named_children(&mut cursor) {
        if decl.kind() != "import_declaration" {
            continue;
        }

        let mut specs = Vec::new();
        let mut decl_cursor = decl.walk();
        for child in decl.named_children(&mut decl_cursor) {
            match child.kind() {
                "import_spec" => specs.push(child),
                "import_spec_list" => {
                    let mut list_cursor = child.walk();
                    specs.extend(
                        child
                            .named_children(&mut list_cursor)
                            .filter(|n| n.kind() == "import_spec"),
                    );
                }
                _ => {}
            }
        }

        imports.extend(
            specs
                .into_iter()
                .filter_map(|spec| spec.child_by_field_name("path"))
                .filter_map(|lit| string_literal(lit, source)),
        );
    }

    imports
}

/// Reduces import paths to their parent directories, deduplicated in
/// first-seen order.
///
/// Single-segment imports (`fmt`, `os`) have no parent and are dropped.
pub fn format_import_dirs(imports: &[String]) -> Vec<String> {
    let mut dirs: Vec<String> = Vec::new();

    for import in imports {
        let Some((dir, _)) = import.rsplit_once('/') else {
            continue;
        };
        if dir.is_empty() || dirs.iter().any(|d| d == dir) {
            continue;
        }
        dirs.push(dir.to_string());
    }

    dirs
}

/// Detects the project's root import directory from the entry file.
pub fn detect_import_path(entry_file: &Path) -> Result<String, GeneratorError> {
    let imports = parse_imports(entry_file)?;
    let mut dirs = format_import_dirs(&imports);

    match dirs.len() {
        0 => Err(GeneratorError::ImportPathNotFound {
            file: entry_file.to_path_buf(),
        }),
        1 => Ok(dirs.remove(0)),
        _ => Err(GeneratorError::ConflictingImportPath {
            file: entry_file.to_path_buf(),
            candidates: dirs,
        }),
    }
}

/// Detects the API namespace declared in the routing file's `Initialize`.
///
/// Looks for the first assignment whose right-hand side calls something
/// with a string literal, e.g. `api := r.Group("/api")`. An absent
/// namespace is returned as an empty string.
pub fn detect_namespace(routing_file: &Path) -> Result<String, GeneratorError> {
    let (source, tree) = parse_file(routing_file)?;
    let namespace = namespace_of(tree.root_node(), &source).unwrap_or_default();

    if namespace.is_empty() {
        tracing::debug!(file = %routing_file.display(), "no namespace declared");
    }
    Ok(namespace)
}

fn namespace_of(root: Node, source: &str) -> Option<String> {
    let mut cursor = root.walk();
    let initialize = root.named_children(&mut cursor).find(|n| {
        n.kind() == "function_declaration"
            && n.child_by_field_name("name").map(|name| text(name, source)) == Some("Initialize")
    })?;
    let body = initialize.child_by_field_name("body")?;

    statements(body)
        .into_iter()
        .filter(|stmt| matches!(stmt.kind(), "short_var_declaration" | "assignment_statement"))
        .find_map(|stmt| assignment_literal(stmt, source))
}

/// Top-level statements of a block; newer grammars wrap them in a `statement_list`.
fn statements(block: Node) -> Vec<Node> {
    let mut out = Vec::new();
    let mut cursor = block.walk();
    for child in block.named_children(&mut cursor) {
        if child.kind() == "statement_list" {
            let mut inner = child.walk();
            out.extend(child.named_children(&mut inner));
        } else {
            out.push(child);
        }
    }
    out
}

fn assignment_literal(stmt: Node, source: &str) -> Option<String> {
    let right = stmt.child_by_field_name("right")?;
    let mut cursor = right.walk();
    let calls: Vec<Node> = right
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "call_expression")
        .collect();

    calls.into_iter().find_map(|call| {
        let args = call.child_by_field_name("arguments")?;
        let mut arg_cursor = args.walk();
        let found = args
            .named_children(&mut arg_cursor)
            .find_map(|arg| string_literal(arg, source));
        found
    })
}

/// Detects the database dialect from the gorm dialect import in `db_file`.
///
/// Returns `None` when the file is missing, does not parse or imports no
/// dialect.
pub fn detect_database(db_file: &Path) -> Result<Option<String>, GeneratorError> {
    if !db_file.is_file() {
        return Ok(None);
    }

    let imports = match parse_imports(db_file) {
        Ok(imports) => imports,
        Err(GeneratorError::SyntaxError { line, column, .. }) => {
            tracing::warn!(
                file = %db_file.display(),
                line,
                column,
                "database file does not parse, assuming the default database"
            );
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    Ok(imports
        .iter()
        .find_map(|import| import.strip_prefix(DB_DIALECT_PREFIX))
        .map(str::to_string))
}
