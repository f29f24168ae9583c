//! JSDoc comments attached to declarations and members
//!
//! A [`DocComment`] is the structured form of a `/** ... */` block: an
//! optional free-text summary followed by the block tags (`@param`, `@see`,
//! `@deprecated`, ...) in source order.

use once_cell::sync::Lazy;
use regex::Regex;

/// Block tag at the start of a comment line: `@name rest`
static TAG_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@([A-Za-z_]\w*)(.*)$").unwrap());

/// `@param` body: optional `{type}`, the name (optionally `[name=default]`),
/// an optional `-` separator and the description.
static PARAM_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:\{[^}]*\}\s*)?(\[[^\]]*\]|\S+)?\s*(?:-\s+)?(.*)$").unwrap()
});

/// Leading `{type}` expression on tags such as `@returns {string} text`
static TYPE_EXPRESSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{[^}]*\}\s*").unwrap());

/// Tags whose first token may be a type expression that is not part of the text
const TYPED_TAGS: &[&str] = &["returns", "return", "throws", "type"];

/// Parsed JSDoc block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Free text before the first block tag
    pub summary: Option<String>,
    /// Block tags in source order
    pub tags: Vec<DocTag>,
}

/// One block tag of a [`DocComment`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    /// Tag name without the `@`
    pub name: String,
    pub body: DocTagBody,
}

/// Tag-specific payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTagBody {
    /// `@param name text`
    Parameter { name: String, text: String },
    /// Any other tag: its trailing text
    Text(String),
}

impl DocTag {
    /// Build a `@param` entry
    pub fn parameter(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: "param".to_string(),
            body: DocTagBody::Parameter {
                name: name.into(),
                text: text.into(),
            },
        }
    }

    /// Build a plain-text entry such as `@see` or `@deprecated`
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: DocTagBody::Text(text.into()),
        }
    }
}

impl DocComment {
    /// A comment with only a summary
    pub fn with_summary(summary: impl Into<String>) -> Self {
        let summary = summary.into();
        Self {
            summary: (!summary.is_empty()).then_some(summary),
            tags: Vec::new(),
        }
    }

    /// Append a tag, builder style
    pub fn tag(mut self, tag: DocTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Summary text, empty when absent
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }

    /// Whether a raw comment is a JSDoc block (`/** ... */`, not `/**/`)
    pub fn is_jsdoc(raw: &str) -> bool {
        raw.starts_with("/**") && !raw.starts_with("/**/") && raw.ends_with("*/")
    }

    /// Parse the raw text of a `/** ... */` comment
    pub fn parse(raw: &str) -> Self {
        let body = raw.strip_prefix("/**").unwrap_or(raw);
        let body = body.strip_suffix("*/").unwrap_or(body);

        let mut summary_lines: Vec<&str> = Vec::new();
        let mut current: Option<(String, Vec<String>)> = None;
        let mut tags = Vec::new();

        for line in body.lines().map(strip_line_decoration) {
            if let Some(caps) = TAG_LINE.captures(line) {
                if let Some((name, lines)) = current.take() {
                    tags.push(build_tag(name, &lines));
                }
                let rest = caps.get(2).map_or("", |m| m.as_str()).trim_start();
                current = Some((caps[1].to_string(), vec![rest.to_string()]));
                continue;
            }

            match current.as_mut() {
                Some((_, lines)) => lines.push(line.to_string()),
                None => summary_lines.push(line),
            }
        }
        if let Some((name, lines)) = current.take() {
            tags.push(build_tag(name, &lines));
        }

        let summary = summary_lines.join("\n").trim().to_string();
        Self {
            summary: (!summary.is_empty()).then_some(summary),
            tags,
        }
    }
}

/// Remove the indentation and leading `*` gutter of one comment line
fn strip_line_decoration(line: &str) -> &str {
    let line = line.trim_start();
    let line = line.strip_prefix('*').unwrap_or(line);
    let line = line.strip_prefix(' ').unwrap_or(line);
    line.trim_end()
}

fn build_tag(name: String, lines: &[String]) -> DocTag {
    let text = lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    if name == "param" {
        let (param, text) = match PARAM_BODY.captures(&text) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            None => ("", text.as_str()),
        };
        return DocTag::parameter(parameter_name(param), text.trim());
    }

    if TYPED_TAGS.contains(&name.as_str()) {
        let text = TYPE_EXPRESSION.replace(&text, "");
        return DocTag::text(name, text.trim());
    }

    DocTag::text(name, text)
}

/// `[name=default]` and `[name]` both name `name`
fn parameter_name(raw: &str) -> String {
    let raw = raw.trim_start_matches('[').trim_end_matches(']');
    raw.split('=').next().unwrap_or("").trim().to_string()
}
