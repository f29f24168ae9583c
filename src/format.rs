//! Description formatters
//!
//! Formatters turn a [`DocComment`] into the markdown shown on hover and in
//! completion lists. Tags and attributes each have their own strategy so a
//! caller can, for example, keep full tag documentation but show only the
//! summary for attributes.
//!
//! Any `Fn(&DocComment) -> String` is a tag formatter and any
//! `Fn(&DocComment, bool, bool) -> String` is an attribute formatter.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::doc::{DocComment, DocTagBody};

const MDASH: &str = "\u{2014}";

/// Renders the description of a component or directive
pub trait TagDescriptionFormatter: Send + Sync {
    fn format_tag(&self, doc: &DocComment) -> String;
}

/// Renders the description of an `@Input`/`@Output` member
pub trait AttributeDescriptionFormatter: Send + Sync {
    fn format_attribute(&self, doc: &DocComment, is_input: bool, is_output: bool) -> String;
}

impl<F> TagDescriptionFormatter for F
where
    F: Fn(&DocComment) -> String + Send + Sync,
{
    fn format_tag(&self, doc: &DocComment) -> String {
        self(doc)
    }
}

impl<F> AttributeDescriptionFormatter for F
where
    F: Fn(&DocComment, bool, bool) -> String + Send + Sync,
{
    fn format_attribute(&self, doc: &DocComment, is_input: bool, is_output: bool) -> String {
        self(doc, is_input, is_output)
    }
}

/// Summary followed by every block tag, one paragraph each
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTagDescriptionFormatter;

impl TagDescriptionFormatter for SimpleTagDescriptionFormatter {
    fn format_tag(&self, doc: &DocComment) -> String {
        render_with_tags(doc).trim().to_string()
    }
}

/// Like [`SimpleTagDescriptionFormatter`], then `_@Input_` / `_@Output_`
/// markers
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleAttributeDescriptionFormatter;

impl AttributeDescriptionFormatter for SimpleAttributeDescriptionFormatter {
    fn format_attribute(&self, doc: &DocComment, is_input: bool, is_output: bool) -> String {
        let mut comment = render_with_tags(doc);
        if is_input {
            comment.push_str("\n\n_@Input_");
        }
        if is_output {
            comment.push_str("\n\n_@Output_");
        }
        comment.trim().to_string()
    }
}

/// Summary text only
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryTagDescriptionFormatter;

impl TagDescriptionFormatter for SummaryTagDescriptionFormatter {
    fn format_tag(&self, doc: &DocComment) -> String {
        doc.summary_text().trim().to_string()
    }
}

/// Summary text only, without input/output markers
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryAttributeDescriptionFormatter;

impl AttributeDescriptionFormatter for SummaryAttributeDescriptionFormatter {
    fn format_attribute(&self, doc: &DocComment, _is_input: bool, _is_output: bool) -> String {
        doc.summary_text().trim().to_string()
    }
}

fn render_with_tags(doc: &DocComment) -> String {
    let mut comment = doc.summary_text().to_string();
    for tag in &doc.tags {
        match &tag.body {
            DocTagBody::Parameter { name, text } => {
                comment.push_str(&format!("\n\n_@param_ `{}` {} {}", name, MDASH, text));
            }
            DocTagBody::Text(text) if tag.name == "see" => {
                comment.push_str(&format!("\n\n_@see_ {} {}", MDASH, text));
            }
            DocTagBody::Text(text) => {
                comment.push_str(&format!("\n\n_@{}_ {}", tag.name, text));
            }
        }
    }
    comment
}

/// Built-in formatters selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// Summary plus block tags (and input/output markers for attributes)
    #[default]
    Simple,
    /// Summary text only
    Summary,
}

impl FormatterKind {
    pub fn tag_formatter(self) -> Box<dyn TagDescriptionFormatter> {
        match self {
            Self::Simple => Box::new(SimpleTagDescriptionFormatter),
            Self::Summary => Box::new(SummaryTagDescriptionFormatter),
        }
    }

    pub fn attribute_formatter(self) -> Box<dyn AttributeDescriptionFormatter> {
        match self {
            Self::Simple => Box::new(SimpleAttributeDescriptionFormatter),
            Self::Summary => Box::new(SummaryAttributeDescriptionFormatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::DocTag;

    fn tag(doc: &DocComment) -> String {
        SimpleTagDescriptionFormatter.format_tag(doc)
    }

    fn attribute(doc: &DocComment, is_input: bool, is_output: bool) -> String {
        SimpleAttributeDescriptionFormatter.format_attribute(doc, is_input, is_output)
    }

    #[test]
    fn test_tag_empty() {
        assert_eq!(tag(&DocComment::default()), "");
    }

    #[test]
    fn test_tag_summary() {
        let doc = DocComment::with_summary("Test element description.");
        assert_eq!(tag(&doc), "Test element description.");
    }

    #[test]
    fn test_tag_param() {
        let doc = DocComment::default().tag(DocTag::parameter("testing", "This is the comment."));
        assert_eq!(tag(&doc), "_@param_ `testing` \u{2014} This is the comment.");
    }

    #[test]
    fn test_tag_param_without_comment() {
        let doc = DocComment::default().tag(DocTag::parameter("testing", ""));
        assert_eq!(tag(&doc), "_@param_ `testing` \u{2014}");
    }

    #[test]
    fn test_tag_see() {
        let doc = DocComment::default().tag(DocTag::text("see", "This is the comment."));
        assert_eq!(tag(&doc), "_@see_ \u{2014} This is the comment.");

        let doc = DocComment::default().tag(DocTag::text("see", ""));
        assert_eq!(tag(&doc), "_@see_ \u{2014}");
    }

    #[test]
    fn test_tag_default_kind() {
        let doc = DocComment::default().tag(DocTag::text("deprecated", "This is the comment."));
        assert_eq!(tag(&doc), "_@deprecated_ This is the comment.");

        let doc = DocComment::default().tag(DocTag::text("deprecated", ""));
        assert_eq!(tag(&doc), "_@deprecated_");
    }

    #[test]
    fn test_tag_summary_and_tags_are_paragraphs() {
        let doc = DocComment::with_summary("A button.")
            .tag(DocTag::text("see", "MatButton"))
            .tag(DocTag::text("deprecated", "Use v2."));
        assert_eq!(
            tag(&doc),
            "A button.\n\n_@see_ \u{2014} MatButton\n\n_@deprecated_ Use v2."
        );
    }

    #[test]
    fn test_attribute_markers() {
        let doc = DocComment::default();
        assert_eq!(attribute(&doc, false, false), "");
        assert_eq!(attribute(&doc, true, false), "_@Input_");
        assert_eq!(attribute(&doc, false, true), "_@Output_");
        assert_eq!(attribute(&doc, true, true), "_@Input_\n\n_@Output_");
    }

    #[test]
    fn test_attribute_summary() {
        assert_eq!(attribute(&DocComment::with_summary("Testing"), false, false), "Testing");
    }

    #[test]
    fn test_attribute_tags_then_markers() {
        let doc = DocComment::default().tag(DocTag::text("deprecated", "This is the comment."));
        assert_eq!(
            attribute(&doc, true, true),
            "_@deprecated_ This is the comment.\n\n_@Input_\n\n_@Output_"
        );
    }

    #[test]
    fn test_summary_formatters_ignore_tags() {
        let doc = DocComment::with_summary(" Test attribute description. ")
            .tag(DocTag::text("deprecated", "old"));
        assert_eq!(
            SummaryTagDescriptionFormatter.format_tag(&doc),
            "Test attribute description."
        );
        assert_eq!(
            SummaryAttributeDescriptionFormatter.format_attribute(&doc, true, true),
            "Test attribute description."
        );
    }

    #[test]
    fn test_closures_are_formatters() {
        let upper = |doc: &DocComment| doc.summary_text().to_uppercase();
        assert_eq!(upper.format_tag(&DocComment::with_summary("hi")), "HI");

        let flags = |_: &DocComment, input: bool, output: bool| format!("{input}/{output}");
        assert_eq!(flags.format_attribute(&DocComment::default(), true, false), "true/false");
    }

    #[test]
    fn test_formatter_kind_selects_implementation() {
        let doc = DocComment::with_summary("Docs").tag(DocTag::text("see", "x"));
        assert_eq!(FormatterKind::Simple.tag_formatter().format_tag(&doc), "Docs\n\n_@see_ \u{2014} x");
        assert_eq!(FormatterKind::Summary.tag_formatter().format_tag(&doc), "Docs");
    }
}
