//! ng-html-data: custom HTML data for Angular libraries
//!
//! Reads TypeScript sources, finds classes decorated with `@Component` or
//! `@Directive`, and produces the custom data document VS Code's HTML
//! language service uses for completion and hover: one tag per element
//! selector, attributes for `@Input`/`@Output` members, and global
//! attributes for `[attr]` selectors. Descriptions come from JSDoc.
//!
//! # Example
//!
//! ```ignore
//! use ng_html_data::{Extractor, HtmlData};
//!
//! let source = r#"
//! /** A card. */
//! @Component({ selector: 'app-card' })
//! export class CardComponent {
//!   /** Card title. */
//!   @Input() title = '';
//! }
//! "#;
//!
//! let result = Extractor::new().extract_source(source)?;
//! let data = HtmlData::from(result);
//! println!("{}", data.to_json_pretty()?);
//! ```

pub mod annotation;
pub mod cli;
pub mod config;
pub mod doc;
pub mod error;
pub mod extract;
pub mod format;
pub mod html_data;
pub mod indexing;
pub mod lang;
pub mod selector;
pub mod syntax;

// Re-export commonly used types
pub use annotation::{Annotation, AnnotationConfig, AnnotationKind, ConfigValue};
pub use cli::Cli;
pub use config::{Config, ConfigLayer};
pub use doc::{DocComment, DocTag, DocTagBody};
pub use error::{HtmlDataError, Result};
pub use extract::{Extractor, ExtractorBuilder};
pub use format::{
    AttributeDescriptionFormatter, FormatterKind, SimpleAttributeDescriptionFormatter,
    SimpleTagDescriptionFormatter, SummaryAttributeDescriptionFormatter,
    SummaryTagDescriptionFormatter, TagDescriptionFormatter,
};
pub use html_data::{Attribute, ExtractResult, HtmlData, Tag};
pub use lang::Lang;
pub use selector::{classify, SelectorFragment};
pub use syntax::{Declaration, Member, ParsedSource};
