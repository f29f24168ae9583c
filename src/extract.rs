//! Tag extraction orchestration
//!
//! Walks a parsed source unit, finds classes decorated with `@Component` or
//! `@Directive`, and turns their selectors, `@Input`/`@Output` members and
//! JSDoc into [`Tag`]s and global [`Attribute`]s.
//!
//! A declaration that cannot contribute (no element decorator, no string
//! selector) is skipped; extraction of the rest of the unit continues.

use tracing::debug;

use crate::annotation::{annotation_config, find_annotation, has_annotation, AnnotationKind};
use crate::error::Result;
use crate::format::{
    AttributeDescriptionFormatter, FormatterKind, SimpleAttributeDescriptionFormatter,
    SimpleTagDescriptionFormatter, TagDescriptionFormatter,
};
use crate::html_data::{Attribute, ExtractResult, Tag};
use crate::lang::Lang;
use crate::selector::{classify, SelectorFragment};
use crate::syntax::{Declaration, ParsedSource};

/// Extracts custom HTML data from Angular components and directives.
///
/// Formatters are fixed when the extractor is built, so one extractor can be
/// shared across threads.
pub struct Extractor {
    tag_formatter: Box<dyn TagDescriptionFormatter>,
    attribute_formatter: Box<dyn AttributeDescriptionFormatter>,
    lang: Lang,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Extractor {
    /// Extractor with the simple formatters, parsing TypeScript
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::default()
    }

    /// Parse `code` and extract from it
    pub fn extract_source(&self, code: &str) -> Result<ExtractResult> {
        let parsed = ParsedSource::parse(code, self.lang)?;
        Ok(self.extract(&parsed))
    }

    /// Extract from every class-like declaration in the unit, in source order
    pub fn extract(&self, parsed: &ParsedSource) -> ExtractResult {
        let mut result = ExtractResult::default();
        for declaration in parsed.declarations() {
            result.append(self.extract_declaration(&declaration));
        }
        result
    }

    /// Contribution of a single declaration
    pub fn extract_declaration(&self, declaration: &Declaration) -> ExtractResult {
        let mut result = ExtractResult::default();
        let name = declaration.name().unwrap_or("<anonymous>");

        let annotations = declaration.annotations();
        let Some(element) = find_annotation(&annotations, AnnotationKind::ELEMENT) else {
            return result;
        };

        let config = annotation_config(element);
        let Some(selector) = config.get_str("selector").filter(|s| !s.trim().is_empty()) else {
            debug!(declaration = name, decorator = element.name, "skipping: no string selector");
            return result;
        };

        let description = declaration
            .doc_comment()
            .map(|doc| self.tag_formatter.format_tag(&doc))
            .unwrap_or_default();
        let attributes = self.member_attributes(declaration);

        for fragment in classify(selector) {
            match fragment {
                SelectorFragment::Element(tag) => result.tags.push(Tag {
                    name: tag,
                    description: description.clone(),
                    attributes: attributes.clone(),
                }),
                SelectorFragment::ElementAttribute { element, attribute } => {
                    result.tags.push(Tag {
                        name: element,
                        description: String::new(),
                        attributes: vec![Attribute::new(attribute, description.clone())],
                    })
                }
                SelectorFragment::GlobalAttribute(attribute) => result
                    .global_attributes
                    .push(Attribute::new(attribute, description.clone())),
            }
        }

        debug!(
            declaration = name,
            selector,
            tags = result.tags.len(),
            global_attributes = result.global_attributes.len(),
            "extracted declaration"
        );
        result
    }

    /// `@Input`/`@Output` members as attributes. A name is reported once per
    /// declaration (first occurrence), so a decorated getter/setter pair
    /// yields a single attribute.
    fn member_attributes(&self, declaration: &Declaration) -> Vec<Attribute> {
        let mut attributes: Vec<Attribute> = Vec::new();

        for member in declaration.members() {
            let annotations = member.annotations();
            if find_annotation(&annotations, AnnotationKind::MEMBER).is_none() {
                continue;
            }
            let is_input = has_annotation(&annotations, AnnotationKind::Input);
            let is_output = has_annotation(&annotations, AnnotationKind::Output);

            let name = member.name();
            if name.is_empty() || attributes.iter().any(|a| a.name == name) {
                continue;
            }

            let description = member
                .doc_comment()
                .map(|doc| {
                    self.attribute_formatter
                        .format_attribute(&doc, is_input, is_output)
                })
                .unwrap_or_default();
            attributes.push(Attribute { name, description });
        }

        attributes
    }
}

/// Configures an [`Extractor`]
#[derive(Default)]
pub struct ExtractorBuilder {
    tag_formatter: Option<Box<dyn TagDescriptionFormatter>>,
    attribute_formatter: Option<Box<dyn AttributeDescriptionFormatter>>,
    lang: Lang,
}

impl ExtractorBuilder {
    pub fn tag_formatter<F>(mut self, formatter: F) -> Self
    where
        F: TagDescriptionFormatter + 'static,
    {
        self.tag_formatter = Some(Box::new(formatter));
        self
    }

    pub fn attribute_formatter<F>(mut self, formatter: F) -> Self
    where
        F: AttributeDescriptionFormatter + 'static,
    {
        self.attribute_formatter = Some(Box::new(formatter));
        self
    }

    /// Use built-in formatters chosen by name
    pub fn formatter_kinds(mut self, tag: FormatterKind, attribute: FormatterKind) -> Self {
        self.tag_formatter = Some(tag.tag_formatter());
        self.attribute_formatter = Some(attribute.attribute_formatter());
        self
    }

    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    pub fn build(self) -> Extractor {
        Extractor {
            tag_formatter: self
                .tag_formatter
                .unwrap_or_else(|| Box::new(SimpleTagDescriptionFormatter)),
            attribute_formatter: self
                .attribute_formatter
                .unwrap_or_else(|| Box::new(SimpleAttributeDescriptionFormatter)),
            lang: self.lang,
        }
    }
}
