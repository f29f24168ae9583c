//! Selector classification
//!
//! A directive selector is a comma separated list. Each part names an
//! element (`app-card`), an attribute scoped to an element (`input[test]`)
//! or an attribute on any element (`[test]`).
//!
//! Classification is best effort: bracket syntax is not validated. A part
//! with an unclosed `[` takes the rest of the part as the attribute name,
//! and anything after the first `]` is ignored.

/// One comma separated unit of a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorFragment {
    /// `app-card`
    Element(String),
    /// `input[test]`
    ElementAttribute { element: String, attribute: String },
    /// `[test]`
    GlobalAttribute(String),
}

/// Split a selector on commas and classify each non-empty trimmed part,
/// preserving order
pub fn classify(selector: &str) -> Vec<SelectorFragment> {
    selector
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(classify_part)
        .collect()
}

fn classify_part(part: &str) -> SelectorFragment {
    match part.find('[') {
        None => SelectorFragment::Element(part.to_string()),
        Some(0) => SelectorFragment::GlobalAttribute(bracket_content(&part[1..])),
        Some(open) => SelectorFragment::ElementAttribute {
            element: part[..open].to_string(),
            attribute: bracket_content(&part[open + 1..]),
        },
    }
}

/// Text up to the first `]`, or all of it when unclosed
fn bracket_content(rest: &str) -> String {
    rest.find(']').map_or(rest, |close| &rest[..close]).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use SelectorFragment::*;

    #[test]
    fn test_element() {
        assert_eq!(classify("test-element"), vec![Element("test-element".to_string())]);
    }

    #[test]
    fn test_element_and_element_attribute() {
        assert_eq!(
            classify("test-element, input[test]"),
            vec![
                Element("test-element".to_string()),
                ElementAttribute {
                    element: "input".to_string(),
                    attribute: "test".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_global_attribute() {
        assert_eq!(classify("[test]"), vec![GlobalAttribute("test".to_string())]);
    }

    #[test]
    fn test_empty_parts_are_dropped() {
        assert!(classify("").is_empty());
        assert!(classify(" , ,").is_empty());
        assert_eq!(
            classify(",a,, [b] ,"),
            vec![Element("a".to_string()), GlobalAttribute("b".to_string())]
        );
    }

    #[test]
    fn test_order_is_preserved() {
        let names: Vec<_> = classify("[a], b, c[d], e")
            .into_iter()
            .map(|f| match f {
                Element(n) | GlobalAttribute(n) => n,
                ElementAttribute { element, .. } => element,
            })
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "e"]);
    }

    #[test]
    fn test_only_first_bracket_pair_is_read() {
        assert_eq!(
            classify("button[mat-button][color]"),
            vec![ElementAttribute {
                element: "button".to_string(),
                attribute: "mat-button".to_string(),
            }]
        );
        assert_eq!(
            classify("[type=submit]"),
            vec![GlobalAttribute("type=submit".to_string())]
        );
    }

    #[test]
    fn test_unclosed_bracket_is_best_effort() {
        assert_eq!(classify("[open"), vec![GlobalAttribute("open".to_string())]);
        assert_eq!(
            classify("div[open"),
            vec![ElementAttribute {
                element: "div".to_string(),
                attribute: "open".to_string(),
            }]
        );
        assert_eq!(classify("stray]"), vec![Element("stray]".to_string())]);
    }
}
