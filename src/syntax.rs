//! TypeScript syntax front end
//!
//! Parses source text with tree-sitter and exposes the small, typed view of
//! the tree the extractor needs:
//!
//! - [`NodeKind`]: the node kinds the extractor distinguishes
//! - [`visit_all`]: one pre-order visitor over the whole tree
//! - [`Declaration`] / [`Member`]: borrowed views over class-like
//!   declarations and their fields, methods and accessors, with their
//!   decorators and JSDoc comments
//!
//! Views borrow the [`ParsedSource`] and are only valid while it lives.

use tree_sitter::{Node, Parser, Tree};

use crate::annotation::Annotation;
use crate::doc::DocComment;
use crate::error::{HtmlDataError, Result};
use crate::lang::Lang;

/// Node kinds the extractor cares about; everything else is `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ClassDeclaration,
    AbstractClassDeclaration,
    /// `class { ... }` used as an expression (`export default class {}`)
    ClassExpression,
    ExportStatement,
    Decorator,
    ClassBody,
    FieldDefinition,
    /// Methods, getters and setters
    MethodDefinition,
    Comment,
    Other,
}

impl NodeKind {
    /// Classify a tree-sitter node
    pub fn of(node: &Node) -> Self {
        // Keywords are anonymous nodes whose kind is their text (`class`)
        if !node.is_named() {
            return Self::Other;
        }
        match node.kind() {
            "class_declaration" => Self::ClassDeclaration,
            "abstract_class_declaration" => Self::AbstractClassDeclaration,
            "class" => Self::ClassExpression,
            "export_statement" => Self::ExportStatement,
            "decorator" => Self::Decorator,
            "class_body" => Self::ClassBody,
            "public_field_definition" | "field_definition" => Self::FieldDefinition,
            "method_definition" => Self::MethodDefinition,
            "comment" => Self::Comment,
            _ => Self::Other,
        }
    }

    /// Kinds that can carry an element-defining decorator
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            Self::ClassDeclaration | Self::AbstractClassDeclaration | Self::ClassExpression
        )
    }

    /// Kinds that can carry an input/output decorator
    pub fn is_member(self) -> bool {
        matches!(self, Self::FieldDefinition | Self::MethodDefinition)
    }
}

/// Visit every node under `root` (inclusive) in pre-order
pub fn visit_all<'t, F>(root: Node<'t>, mut visit: F)
where
    F: FnMut(Node<'t>, NodeKind),
{
    let mut cursor = root.walk();
    let mut depth = 0usize;

    loop {
        let node = cursor.node();
        visit(node, NodeKind::of(&node));

        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }

        loop {
            if depth == 0 {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            cursor.goto_parent();
            depth -= 1;
        }
    }
}

/// Source text of a node, empty if the range is not valid UTF-8
pub fn node_text<'t>(node: &Node<'t>, source: &'t str) -> &'t str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Value of a string literal node: quoted strings and template strings
/// without substitutions. `None` for any other node.
pub fn string_literal_value(node: &Node, source: &str) -> Option<String> {
    match node.kind() {
        "string" => {
            let mut value = String::new();
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "string_fragment" => value.push_str(node_text(&child, source)),
                    "escape_sequence" => value.push_str(&unescape(node_text(&child, source))),
                    _ => {}
                }
            }
            Some(value)
        }
        "template_string" => {
            let mut cursor = node.walk();
            let has_substitution = node
                .children(&mut cursor)
                .any(|child| child.kind() == "template_substitution");
            if has_substitution {
                return None;
            }
            let text = node_text(node, source);
            let inner = text
                .strip_prefix('`')
                .and_then(|t| t.strip_suffix('`'))
                .unwrap_or(text);
            Some(inner.to_string())
        }
        _ => None,
    }
}

fn unescape(sequence: &str) -> String {
    match sequence {
        "\\n" => "\n".to_string(),
        "\\t" => "\t".to_string(),
        "\\r" => "\r".to_string(),
        _ => sequence.strip_prefix('\\').unwrap_or(sequence).to_string(),
    }
}

/// First JSDoc block among `comments` (source order), parsed
fn first_doc_comment(comments: &[Node], source: &str) -> Option<DocComment> {
    comments
        .iter()
        .map(|c| node_text(c, source))
        .find(|text| DocComment::is_jsdoc(text))
        .map(DocComment::parse)
}

/// Comments directly preceding `node`, plus comments among its own leading
/// decorators, in source order
fn leading_comments<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut before = Vec::new();
    let mut sibling = node.prev_named_sibling();
    while let Some(prev) = sibling {
        if NodeKind::of(&prev) != NodeKind::Comment {
            break;
        }
        before.push(prev);
        sibling = prev.prev_named_sibling();
    }
    before.reverse();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match NodeKind::of(&child) {
            NodeKind::Comment => before.push(child),
            NodeKind::Decorator => {}
            _ => break,
        }
    }
    before
}

fn decorator_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| NodeKind::of(child) == NodeKind::Decorator)
        .collect()
}

/// A parsed source unit
pub struct ParsedSource<'s> {
    source: &'s str,
    tree: Tree,
}

impl<'s> ParsedSource<'s> {
    /// Parse TypeScript source text
    pub fn parse(source: &'s str, lang: Lang) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&lang.tree_sitter_language())
            .map_err(|e| HtmlDataError::ParseFailure {
                message: format!("Failed to set language: {:?}", e),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| HtmlDataError::ParseFailure {
                message: "Failed to parse source".to_string(),
            })?;

        Ok(Self { source, tree })
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Whether tree-sitter had to recover from syntax errors
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Every class-like declaration at any depth, in source order
    pub fn declarations(&self) -> Vec<Declaration<'_>> {
        let mut declarations = Vec::new();
        visit_all(self.root(), |node, kind| {
            if kind.is_class_like() {
                declarations.push(Declaration {
                    node,
                    source: self.source,
                });
            }
        });
        declarations
    }
}

/// Borrowed view of a class-like declaration
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'t> {
    node: Node<'t>,
    source: &'t str,
}

impl<'t> Declaration<'t> {
    /// Class name, `None` for anonymous class expressions
    pub fn name(&self) -> Option<&'t str> {
        self.node
            .child_by_field_name("name")
            .map(|n| node_text(&n, self.source))
    }

    /// The node decorators and leading comments hang off: the enclosing
    /// `export` statement for exported classes, the class itself otherwise
    fn anchor(&self) -> Node<'t> {
        match self.node.parent() {
            Some(parent) if NodeKind::of(&parent) == NodeKind::ExportStatement => parent,
            _ => self.node,
        }
    }

    /// Decorators in source order
    pub fn annotations(&self) -> Vec<Annotation<'t>> {
        let anchor = self.anchor();
        let mut decorators = Vec::new();
        if anchor != self.node {
            decorators.extend(decorator_children(anchor));
        }
        decorators.extend(decorator_children(self.node));

        decorators
            .into_iter()
            .filter_map(|d| Annotation::from_decorator(d, self.source))
            .collect()
    }

    /// Fields, methods and accessors of the class body, in source order
    pub fn members(&self) -> Vec<Member<'t>> {
        let Some(body) = self.node.child_by_field_name("body") else {
            return Vec::new();
        };

        let mut members = Vec::new();
        let mut decorators = Vec::new();
        let mut comments = Vec::new();

        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            match NodeKind::of(&child) {
                // Decorators of methods and accessors are class body children
                NodeKind::Decorator => decorators.push(child),
                NodeKind::Comment => comments.push(child),
                kind if kind.is_member() => members.push(Member {
                    node: child,
                    decorators: std::mem::take(&mut decorators),
                    comments: std::mem::take(&mut comments),
                    source: self.source,
                }),
                _ => {
                    decorators.clear();
                    comments.clear();
                }
            }
        }
        members
    }

    /// The JSDoc block documenting this declaration
    pub fn doc_comment(&self) -> Option<DocComment> {
        let anchor = self.anchor();
        let mut comments = leading_comments(anchor);
        if anchor != self.node {
            comments.extend(leading_comments(self.node));
        }
        first_doc_comment(&comments, self.source)
    }
}

/// Borrowed view of a class member
#[derive(Debug, Clone)]
pub struct Member<'t> {
    node: Node<'t>,
    /// Decorators written before a method or accessor in the class body
    decorators: Vec<Node<'t>>,
    /// Comments between the previous member and this one
    comments: Vec<Node<'t>>,
    source: &'t str,
}

impl<'t> Member<'t> {
    /// Property name; empty for computed or numeric names
    pub fn name(&self) -> String {
        let Some(name) = self.node.child_by_field_name("name") else {
            return String::new();
        };
        match name.kind() {
            "property_identifier" | "private_property_identifier" => {
                node_text(&name, self.source).to_string()
            }
            _ => string_literal_value(&name, self.source).unwrap_or_default(),
        }
    }

    /// Decorators in source order
    pub fn annotations(&self) -> Vec<Annotation<'t>> {
        self.decorators
            .iter()
            .copied()
            .chain(decorator_children(self.node))
            .filter_map(|d| Annotation::from_decorator(d, self.source))
            .collect()
    }

    /// The JSDoc block documenting this member
    pub fn doc_comment(&self) -> Option<DocComment> {
        let mut comments = self.comments.clone();
        comments.extend(leading_comments_inside(self.node));
        first_doc_comment(&comments, self.source)
    }
}

/// Comments among a field's own decorators (before its modifiers and name)
fn leading_comments_inside<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut comments = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match NodeKind::of(&child) {
            NodeKind::Comment => comments.push(child),
            NodeKind::Decorator => {}
            _ => break,
        }
    }
    comments
}
