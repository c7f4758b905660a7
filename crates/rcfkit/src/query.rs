//! Locator evaluation over a [`Document`].
//!
//! Locators use the small path-query subset deviation tables need:
//! tag-name steps, `*`, child (`/`) and descendant (`//`) axes, and
//! attribute predicates (`[@name]`, `[@name='value']`). A locator is
//! always evaluated relative to the document root, so a leading
//! separator is normalized away rather than treated as an absolute
//! search. Results come back in document order with duplicates removed.

use crate::document::{Document, NodeId};
use crate::error::{Error, Result};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    HasAttr(String),
    AttrEquals(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
    predicates: Vec<Predicate>,
}

/// Resolve a locator against the document, returning every matching
/// node. Callers enforce their own match-count contract.
pub fn select(doc: &Document, locator: &str) -> Result<Vec<NodeId>> {
    let steps = parse(locator)?;

    let mut context = vec![doc.root()];
    for step in &steps {
        let mut next = Vec::new();
        let mut seen = HashSet::new();
        for &node in &context {
            let candidates = match step.axis {
                Axis::Child => doc.children(node).to_vec(),
                Axis::Descendant => doc.descendants(node),
            };
            for candidate in candidates {
                if matches_step(doc, candidate, step) && seen.insert(candidate) {
                    next.push(candidate);
                }
            }
        }
        context = next;
    }

    Ok(context)
}

fn matches_step(doc: &Document, id: NodeId, step: &Step) -> bool {
    let el = doc.get(id);
    let name_ok = match &step.test {
        NameTest::Any => true,
        NameTest::Name(name) => el.name == *name,
    };
    name_ok
        && step.predicates.iter().all(|predicate| match predicate {
            Predicate::HasAttr(name) => el.attr(name).is_some(),
            Predicate::AttrEquals(name, value) => el.attr(name) == Some(value.as_str()),
        })
}

fn parse(locator: &str) -> Result<Vec<Step>> {
    let fail = |message: String| Error::Locator {
        locator: locator.to_string(),
        message,
    };

    let mut steps = Vec::new();
    let mut rest = locator;
    let mut need_separator = false;

    loop {
        let axis = if let Some(stripped) = rest.strip_prefix("//") {
            rest = stripped;
            Axis::Descendant
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
            Axis::Child
        } else if need_separator {
            return Err(fail("expected '/' between steps".to_string()));
        } else {
            Axis::Child
        };

        let end = step_end(rest);
        let token = &rest[..end];
        rest = &rest[end..];

        if token.is_empty() {
            return Err(fail("empty step".to_string()));
        }

        if token == "." {
            // Explicit self step; the context is already the root.
            if axis == Axis::Descendant {
                return Err(fail("unsupported step \".\" on descendant axis".to_string()));
            }
        } else {
            steps.push(parse_step(token, axis).map_err(fail)?);
        }

        need_separator = true;
        if rest.is_empty() {
            break;
        }
    }

    Ok(steps)
}

/// Byte offset of the next step separator, skipping `/` characters
/// inside predicates and quoted values.
fn step_end(s: &str) -> usize {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' if depth > 0 => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '/' if depth == 0 => return i,
                _ => {}
            },
        }
    }
    s.len()
}

fn parse_step(token: &str, axis: Axis) -> std::result::Result<Step, String> {
    let (name_part, mut predicates_part) = match token.find('[') {
        Some(i) => (&token[..i], &token[i..]),
        None => (token, ""),
    };

    let test = match name_part {
        "" => return Err("missing element name in step".to_string()),
        "*" => NameTest::Any,
        name if is_name(name) => NameTest::Name(name.to_string()),
        name => return Err(format!("invalid step \"{name}\"")),
    };

    let mut predicates = Vec::new();
    while !predicates_part.is_empty() {
        let inner = predicates_part
            .strip_prefix('[')
            .ok_or_else(|| format!("unexpected text after predicate: \"{predicates_part}\""))?;
        let end = predicate_end(inner).ok_or_else(|| "unterminated predicate".to_string())?;
        predicates.push(parse_predicate(&inner[..end])?);
        predicates_part = &inner[end + 1..];
    }

    Ok(Step {
        axis,
        test,
        predicates,
    })
}

/// Byte offset of the closing `]`, skipping any inside quoted values.
fn predicate_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                ']' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

fn parse_predicate(inner: &str) -> std::result::Result<Predicate, String> {
    let inner = inner.trim();
    let attr = inner
        .strip_prefix('@')
        .ok_or_else(|| format!("only attribute predicates are supported, got \"[{inner}]\""))?;

    match attr.find('=') {
        None => {
            if !is_name(attr) {
                return Err(format!("invalid attribute name \"{attr}\""));
            }
            Ok(Predicate::HasAttr(attr.to_string()))
        }
        Some(i) => {
            let name = attr[..i].trim_end();
            let value = attr[i + 1..].trim_start();
            if !is_name(name) {
                return Err(format!("invalid attribute name \"{name}\""));
            }
            let unquoted = strip_quotes(value)
                .ok_or_else(|| format!("attribute value must be quoted, got \"{value}\""))?;
            Ok(Predicate::AttrEquals(name.to_string(), unquoted.to_string()))
        }
    }
}

fn strip_quotes(s: &str) -> Option<&str> {
    for quote in ['\'', '"'] {
        if let Some(body) = s.strip_prefix(quote)
            && let Some(body) = body.strip_suffix(quote)
            && !body.contains(quote)
        {
            return Some(body);
        }
    }
    None
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_string;

    const SAMPLE: &str = "<rcf>\
        <group name=\"core\">\
            <rule id=\"R1\" active=\"yes\"/>\
            <rule id=\"R2\" active=\"no\"/>\
        </group>\
        <group name=\"extra\">\
            <rule id=\"R3\"/>\
        </group>\
    </rcf>";

    fn ids(doc: &Document, nodes: &[NodeId]) -> Vec<String> {
        nodes
            .iter()
            .map(|&id| doc.get(id).attr("id").unwrap_or("?").to_string())
            .collect()
    }

    #[test]
    fn test_select_child_steps() {
        let doc = parse_string(SAMPLE).unwrap();
        let nodes = select(&doc, "group/rule").unwrap();
        assert_eq!(ids(&doc, &nodes), vec!["R1", "R2", "R3"]);
    }

    #[test]
    fn test_select_descendant_axis() {
        let doc = parse_string(SAMPLE).unwrap();
        let nodes = select(&doc, "//rule").unwrap();
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_select_attribute_equals() {
        let doc = parse_string(SAMPLE).unwrap();
        let nodes = select(&doc, "//rule[@id='R2']").unwrap();
        assert_eq!(ids(&doc, &nodes), vec!["R2"]);
    }

    #[test]
    fn test_select_attribute_equals_double_quotes() {
        let doc = parse_string(SAMPLE).unwrap();
        let nodes = select(&doc, "//rule[@id=\"R3\"]").unwrap();
        assert_eq!(ids(&doc, &nodes), vec!["R3"]);
    }

    #[test]
    fn test_select_bare_attribute_predicate() {
        let doc = parse_string(SAMPLE).unwrap();
        let nodes = select(&doc, "//rule[@active]").unwrap();
        assert_eq!(ids(&doc, &nodes), vec!["R1", "R2"]);
    }

    #[test]
    fn test_select_multiple_predicates() {
        let doc = parse_string(SAMPLE).unwrap();
        let nodes = select(&doc, "//rule[@active='yes'][@id='R1']").unwrap();
        assert_eq!(ids(&doc, &nodes), vec!["R1"]);
    }

    #[test]
    fn test_select_wildcard() {
        let doc = parse_string(SAMPLE).unwrap();
        let nodes = select(&doc, "group[@name='core']/*").unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_select_leading_slash_normalized() {
        let doc = parse_string(SAMPLE).unwrap();
        let nodes = select(&doc, "/group[@name='extra']/rule").unwrap();
        assert_eq!(ids(&doc, &nodes), vec!["R3"]);
    }

    #[test]
    fn test_select_leading_double_slash() {
        let doc = parse_string(SAMPLE).unwrap();
        let nodes = select(&doc, "//rule[@id='R1']").unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_select_dot_prefix() {
        let doc = parse_string(SAMPLE).unwrap();
        let nodes = select(&doc, ".//rule[@id='R1']").unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_select_no_match_is_empty() {
        let doc = parse_string(SAMPLE).unwrap();
        assert!(select(&doc, "//missing").unwrap().is_empty());
        assert!(select(&doc, "rule").unwrap().is_empty());
    }

    #[test]
    fn test_select_root_not_matched_by_name() {
        // Steps look at children of the context, never the context itself.
        let doc = parse_string(SAMPLE).unwrap();
        assert!(select(&doc, "rcf").unwrap().is_empty());
    }

    #[test]
    fn test_select_slash_inside_quoted_value() {
        let doc = parse_string("<rcf><rule path=\"a/b\"/></rcf>").unwrap();
        let nodes = select(&doc, "//rule[@path='a/b']").unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_select_descendants_deduplicated() {
        let doc = parse_string("<rcf><a><a><b/></a></a></rcf>").unwrap();
        let nodes = select(&doc, "//a//b").unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_invalid_locator_empty() {
        let doc = parse_string(SAMPLE).unwrap();
        assert!(matches!(
            select(&doc, "").unwrap_err(),
            Error::Locator { .. }
        ));
        assert!(matches!(
            select(&doc, "/").unwrap_err(),
            Error::Locator { .. }
        ));
        assert!(matches!(
            select(&doc, "group/").unwrap_err(),
            Error::Locator { .. }
        ));
    }

    #[test]
    fn test_invalid_locator_unterminated_predicate() {
        let doc = parse_string(SAMPLE).unwrap();
        let err = select(&doc, "//rule[@id='R1'").unwrap_err();
        assert!(matches!(err, Error::Locator { .. }));
    }

    #[test]
    fn test_invalid_locator_unsupported_predicate() {
        let doc = parse_string(SAMPLE).unwrap();
        let err = select(&doc, "//group[1]").unwrap_err();
        assert!(matches!(err, Error::Locator { .. }));
    }

    #[test]
    fn test_invalid_locator_unquoted_value() {
        let doc = parse_string(SAMPLE).unwrap();
        let err = select(&doc, "//rule[@id=R1]").unwrap_err();
        assert!(matches!(err, Error::Locator { .. }));
    }

    #[test]
    fn test_error_names_offending_locator() {
        let doc = parse_string(SAMPLE).unwrap();
        let err = select(&doc, "//rule[@id=R1]").unwrap_err();
        assert!(err.to_string().contains("//rule[@id=R1]"));
    }
}
