//! Decorator matching
//!
//! Recognizes the Angular decorators that define the markup surface and
//! reads their object-literal configuration. All recognized names live in
//! [`AnnotationKind`]; nothing else in the crate compares decorator names.

use tree_sitter::Node;

use crate::syntax::{node_text, string_literal_value, NodeKind};

/// Decorators that contribute to the custom HTML data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Component,
    Directive,
    Input,
    Output,
}

impl AnnotationKind {
    /// Decorators that define an element or attribute selector
    pub const ELEMENT: &'static [AnnotationKind] = &[Self::Component, Self::Directive];

    /// Decorators that expose a class member as an attribute
    pub const MEMBER: &'static [AnnotationKind] = &[Self::Input, Self::Output];

    /// Look up a decorator by its identifier
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Component" => Some(Self::Component),
            "Directive" => Some(Self::Directive),
            "Input" => Some(Self::Input),
            "Output" => Some(Self::Output),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Component => "Component",
            Self::Directive => "Directive",
            Self::Input => "Input",
            Self::Output => "Output",
        }
    }
}

/// A decorator applied to a declaration or member
#[derive(Debug, Clone, Copy)]
pub struct Annotation<'t> {
    /// Callee text as written (`Component`, `core.Component`, ...)
    pub name: &'t str,
    /// Recognized kind; `None` for unknown or namespaced decorators
    pub kind: Option<AnnotationKind>,
    arguments: Option<Node<'t>>,
    source: &'t str,
}

impl<'t> Annotation<'t> {
    /// Read a `decorator` node. Handles `@Name(...)` and bare `@Name`;
    /// only a plain identifier callee resolves to an [`AnnotationKind`].
    pub fn from_decorator(node: Node<'t>, source: &'t str) -> Option<Self> {
        let mut cursor = node.walk();
        let expression = node
            .named_children(&mut cursor)
            .find(|child| NodeKind::of(child) != NodeKind::Comment)?;

        let (callee, arguments) = match expression.kind() {
            "call_expression" => (
                expression.child_by_field_name("function")?,
                expression.child_by_field_name("arguments"),
            ),
            _ => (expression, None),
        };

        let name = node_text(&callee, source);
        let kind = match callee.kind() {
            "identifier" => AnnotationKind::from_name(name),
            _ => None,
        };

        Some(Self {
            name,
            kind,
            arguments,
            source,
        })
    }

    /// First call argument, if the decorator was called with any
    pub fn first_argument(&self) -> Option<Node<'t>> {
        let arguments = self.arguments?;
        let mut cursor = arguments.walk();
        let first = arguments
            .named_children(&mut cursor)
            .find(|child| NodeKind::of(child) != NodeKind::Comment);
        first
    }
}

/// First annotation (in source order) whose kind is one of `kinds`
pub fn find_annotation<'a, 't>(
    annotations: &'a [Annotation<'t>],
    kinds: &[AnnotationKind],
) -> Option<&'a Annotation<'t>> {
    annotations
        .iter()
        .find(|a| a.kind.is_some_and(|kind| kinds.contains(&kind)))
}

/// Whether any annotation is of `kind`
pub fn has_annotation(annotations: &[Annotation], kind: AnnotationKind) -> bool {
    find_annotation(annotations, &[kind]).is_some()
}

/// Configuration object passed to a decorator: `@Component({ selector: 'x' })`.
///
/// Empty when the decorator has no argument or its first argument is not an
/// object literal.
pub fn annotation_config(annotation: &Annotation) -> AnnotationConfig {
    match annotation.first_argument() {
        Some(argument) if argument.kind() == "object" => {
            object_config(&argument, annotation.source)
        }
        _ => AnnotationConfig::default(),
    }
}

/// A literal value inside a decorator configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
    Array(Vec<ConfigValue>),
    Object(AnnotationConfig),
    /// Any non-literal expression, kept as source text
    Expression(String),
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Ordered key/value pairs of a decorator configuration object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationConfig {
    entries: Vec<(String, ConfigValue)>,
}

impl AnnotationConfig {
    /// Value for `key`; the last occurrence wins, as in an object literal
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// String value for `key`, `None` if absent or not a string literal
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn object_config(object: &Node, source: &str) -> AnnotationConfig {
    let mut entries = Vec::new();
    let mut cursor = object.walk();

    for property in object.named_children(&mut cursor) {
        match property.kind() {
            "pair" => {
                let (Some(key), Some(value)) = (
                    property.child_by_field_name("key"),
                    property.child_by_field_name("value"),
                ) else {
                    continue;
                };
                if let Some(key) = property_key(&key, source) {
                    entries.push((key, evaluate(&value, source)));
                }
            }
            "shorthand_property_identifier" => {
                let name = node_text(&property, source).to_string();
                entries.push((name.clone(), ConfigValue::Expression(name)));
            }
            "method_definition" => {
                if let Some(key) = property
                    .child_by_field_name("name")
                    .and_then(|n| property_key(&n, source))
                {
                    let text = node_text(&property, source).to_string();
                    entries.push((key, ConfigValue::Expression(text)));
                }
            }
            _ => {}
        }
    }

    AnnotationConfig { entries }
}

/// Static property key; computed keys are skipped
fn property_key(key: &Node, source: &str) -> Option<String> {
    match key.kind() {
        "property_identifier" | "number" => Some(node_text(key, source).to_string()),
        "string" => string_literal_value(key, source),
        _ => None,
    }
}

fn evaluate(node: &Node, source: &str) -> ConfigValue {
    let text = node_text(node, source);
    match node.kind() {
        "string" | "template_string" => match string_literal_value(node, source) {
            Some(value) => ConfigValue::String(value),
            None => ConfigValue::Expression(text.to_string()),
        },
        "number" => text
            .replace('_', "")
            .parse::<f64>()
            .map(ConfigValue::Number)
            .unwrap_or_else(|_| ConfigValue::Expression(text.to_string())),
        "true" => ConfigValue::Bool(true),
        "false" => ConfigValue::Bool(false),
        "null" | "undefined" => ConfigValue::Null,
        "array" => {
            let mut cursor = node.walk();
            let items = node
                .named_children(&mut cursor)
                .filter(|child| NodeKind::of(child) != NodeKind::Comment)
                .map(|child| evaluate(&child, source))
                .collect();
            ConfigValue::Array(items)
        }
        "object" => ConfigValue::Object(object_config(node, source)),
        _ => ConfigValue::Expression(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Lang;
    use crate::syntax::ParsedSource;

    fn parse(source: &str) -> ParsedSource<'_> {
        ParsedSource::parse(source, Lang::TypeScript).unwrap()
    }

    #[test]
    fn test_kind_lookup() {
        assert_eq!(AnnotationKind::from_name("Component"), Some(AnnotationKind::Component));
        assert_eq!(AnnotationKind::from_name("Output"), Some(AnnotationKind::Output));
        assert_eq!(AnnotationKind::from_name("Injectable"), None);
        assert_eq!(AnnotationKind::from_name("component"), None);
        assert_eq!(AnnotationKind::Directive.name(), "Directive");
    }

    #[test]
    fn test_find_element_annotation() {
        let parsed = parse(
            r#"
            @Injectable()
            @Directive({ selector: '[tooltip]' })
            @Component({ selector: 'ignored' })
            class Tooltip {}
            "#,
        );
        let annotations = parsed.declarations()[0].annotations();

        let found = find_annotation(&annotations, AnnotationKind::ELEMENT).unwrap();
        assert_eq!(found.kind, Some(AnnotationKind::Directive));
        assert!(!has_annotation(&annotations, AnnotationKind::Input));
    }

    #[test]
    fn test_namespaced_decorator_is_not_recognized() {
        let parsed = parse("@core.Component({ selector: 'x' }) class X {}");
        let annotations = parsed.declarations()[0].annotations();

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].name, "core.Component");
        assert_eq!(annotations[0].kind, None);
        assert!(find_annotation(&annotations, AnnotationKind::ELEMENT).is_none());
    }

    #[test]
    fn test_config_values() {
        let parsed = parse(
            r#"
            @Component({
              selector: 'app-card',
              'standalone': true,
              imports: [CommonModule, 'x'],
              host: { role: 'button' },
              changeDetection: ChangeDetectionStrategy.OnPush,
              priority: 1_000,
              providers,
            })
            class Card {}
            "#,
        );
        let annotations = parsed.declarations()[0].annotations();
        let config = annotation_config(&annotations[0]);

        assert_eq!(config.len(), 7);
        assert_eq!(config.get_str("selector"), Some("app-card"));
        assert_eq!(config.get("standalone"), Some(&ConfigValue::Bool(true)));
        assert_eq!(
            config.get("imports"),
            Some(&ConfigValue::Array(vec![
                ConfigValue::Expression("CommonModule".to_string()),
                ConfigValue::String("x".to_string()),
            ]))
        );
        match config.get("host") {
            Some(ConfigValue::Object(host)) => assert_eq!(host.get_str("role"), Some("button")),
            other => panic!("unexpected host value: {:?}", other),
        }
        assert_eq!(
            config.get("changeDetection"),
            Some(&ConfigValue::Expression("ChangeDetectionStrategy.OnPush".to_string()))
        );
        assert_eq!(config.get("priority"), Some(&ConfigValue::Number(1000.0)));
        assert_eq!(config.get_str("providers"), None);
    }

    #[test]
    fn test_config_without_object_argument() {
        let parsed = parse(
            r#"
            @Component() class A {}
            @Component(SHARED_CONFIG) class B {}
            @Component class C {}
            "#,
        );
        for decl in parsed.declarations() {
            let annotations = decl.annotations();
            assert_eq!(annotations[0].kind, Some(AnnotationKind::Component));
            assert!(annotation_config(&annotations[0]).is_empty());
        }
    }

    #[test]
    fn test_non_string_selector() {
        let parsed = parse("@Component({ selector: SELECTOR }) class A {}");
        let annotations = parsed.declarations()[0].annotations();
        let config = annotation_config(&annotations[0]);

        assert!(config.get("selector").is_some());
        assert_eq!(config.get_str("selector"), None);
    }
}
