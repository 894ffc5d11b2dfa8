//! Go model parser using tree-sitter.

use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

use crate::diagnostic::{GeneratorError, Span};
use crate::ir::{Field, FieldType, Model, TypeRef};
use super::tag;

/// Go parser.
///
/// Not shareable between threads; every worker creates its own.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Creates a new Go parser.
    pub fn new() -> Result<Self, GeneratorError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|_| GeneratorError::ParserInitFailed)?;
        Ok(Self { parser })
    }

    /// Parses a Go source file into a syntax tree.
    ///
    /// Files containing any syntax error are rejected with the position of
    /// the first one.
    pub fn parse_tree(&mut self, source: &str, path: &Path) -> Result<Tree, GeneratorError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| GeneratorError::ParseFailed { path: path.to_path_buf() })?;

        if let Some(node) = first_error(tree.root_node()) {
            let span = Span::from_node(path.to_path_buf(), node);
            return Err(GeneratorError::SyntaxError {
                file: span.file,
                line: span.start_line,
                column: span.start_col,
            });
        }

        Ok(tree)
    }

    /// Parses every struct declaration of a Go source file into a model.
    pub fn parse_models(&mut self, source: &str, path: &Path) -> Result<Vec<Model>, GeneratorError> {
        let tree = self.parse_tree(source, path)?;
        let mut visitor = Visitor::new(source, path);
        visitor.visit_source_file(tree.root_node())?;
        Ok(visitor.models)
    }
}

/// Finds the first error or missing node, depth first.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found.or(Some(node))
}

/// Extracts models from tree-sitter nodes.
struct Visitor<'a> {
    source: &'a str,
    path: &'a Path,
    models: Vec<Model>,
}

impl<'a> Visitor<'a> {
    fn new(source: &'a str, path: &'a Path) -> Self {
        Self {
            source,
            path,
            models: Vec::new(),
        }
    }

    fn span(&self, node: Node) -> Span {
        Span::from_node(self.path.to_path_buf(), node)
    }

    fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn visit_source_file(&mut self, node: Node) -> Result<(), GeneratorError> {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "type_declaration" {
                self.visit_type_declaration(child)?;
            }
        }
        Ok(())
    }

    /// `type X struct {...}` or a grouped `type ( ... )` block.
    fn visit_type_declaration(&mut self, node: Node) -> Result<(), GeneratorError> {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "type_spec" {
                self.visit_type_spec(child)?;
            }
        }
        Ok(())
    }

    fn visit_type_spec(&mut self, node: Node) -> Result<(), GeneratorError> {
        let (Some(name_node), Some(type_node)) =
            (node.child_by_field_name("name"), node.child_by_field_name("type"))
        else {
            return Ok(());
        };

        // Only structs become models.
        if type_node.kind() != "struct_type" {
            return Ok(());
        }

        let name = self.node_text(name_node).to_string();
        let mut fields = Vec::new();

        let mut cursor = type_node.walk();
        for list in type_node.named_children(&mut cursor) {
            if list.kind() != "field_declaration_list" {
                continue;
            }
            let mut list_cursor = list.walk();
            for decl in list.named_children(&mut list_cursor) {
                if decl.kind() == "field_declaration" {
                    fields.push(self.visit_field(&name, decl)?);
                }
            }
        }

        self.models.push(Model::new(name, fields, self.span(node)));
        Ok(())
    }

    fn visit_field(&self, model: &str, node: Node) -> Result<Field, GeneratorError> {
        let mut cursor = node.walk();
        let names: Vec<&str> = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.node_text(n))
            .collect();
        let type_node = node.child_by_field_name("type");

        if names.len() > 1 {
            return Err(GeneratorError::MultipleFieldNames {
                model: model.to_string(),
                names: names.join(", "),
                file: self.path.to_path_buf(),
                line: self.span(node).start_line,
            });
        }

        let (name, declared_type) = match names.first() {
            Some(name) => (
                name.to_string(),
                type_node.map(|t| self.visit_type(t)).unwrap_or_default(),
            ),
            // Embedded field: named after its type, type left undetermined.
            None => (
                type_node.map(|t| self.embedded_name(t)).unwrap_or_default(),
                FieldType::Undetermined,
            ),
        };

        let raw_tag = node
            .child_by_field_name("tag")
            .map(|t| self.node_text(t).to_string());
        let serialized_name = raw_tag
            .as_deref()
            .and_then(tag::json_name)
            .unwrap_or_else(|| name.clone());

        Ok(Field {
            name,
            serialized_name,
            declared_type,
            raw_tag,
            association: None,
        })
    }

    fn visit_type(&self, node: Node) -> FieldType {
        match node.kind() {
            // []T, []*T, [N]T
            "slice_type" | "array_type" => node
                .child_by_field_name("element")
                .and_then(|element| self.visit_element(element))
                .map(|t| FieldType::from(t.collection()))
                .unwrap_or_default(),
            _ => self
                .visit_element(node)
                .map(FieldType::from)
                .unwrap_or_default(),
        }
    }

    /// `T`, `pkg.T`, `*T` or `*pkg.T`.
    fn visit_element(&self, node: Node) -> Option<TypeRef> {
        match node.kind() {
            "pointer_type" => {
                let inner = node.named_child(0)?;
                self.visit_named(inner).map(TypeRef::pointer)
            }
            _ => self.visit_named(node),
        }
    }

    fn visit_named(&self, node: Node) -> Option<TypeRef> {
        match node.kind() {
            "type_identifier" => Some(TypeRef::named(self.node_text(node))),
            "qualified_type" => {
                let package = node.child_by_field_name("package")?;
                let name = node.child_by_field_name("name")?;
                Some(TypeRef::qualified(self.node_text(package), self.node_text(name)))
            }
            _ => None,
        }
    }

    /// Go names an embedded field after its type identifier.
    fn embedded_name(&self, node: Node) -> String {
        match node.kind() {
            "qualified_type" => node
                .child_by_field_name("name")
                .map(|n| self.node_text(n).to_string())
                .unwrap_or_default(),
            "generic_type" => node
                .child_by_field_name("type")
                .map(|n| self.embedded_name(n))
                .unwrap_or_default(),
            _ => self.node_text(node).to_string(),
        }
    }
}
