//! # Message Rendering
//!
//! Fills named `{placeholder}` arguments into a message template. Rendering
//! is deliberately tolerant: if any placeholder is unresolved, the raw
//! template is returned unmodified rather than a partially filled string or
//! a secondary failure.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Renders `template` against `args`.
///
/// Every named placeholder must have a non-null value in `args`; otherwise
/// the template comes back untouched, placeholders still literal. This
/// function never fails, there is nothing worse than losing the original
/// message while already handling an error.
pub fn render(template: &str, args: &Map<String, Value>) -> String {
    if template.is_empty() {
        return String::new();
    }

    for caps in PLACEHOLDER.captures_iter(template) {
        match args.get(&caps[1]) {
            Some(value) if !value.is_null() => {}
            _ => return template.to_string(),
        }
    }

    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            args.get(&caps[1])
                .map(value_text)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// String form of an argument value; strings are inserted bare, everything
/// else uses its JSON rendering.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let template = "The value for input '{input_key}' should be a list, but received {value_type}.";
        let rendered = render(
            template,
            &args(&[("input_key", json!("rows")), ("value_type", json!("str"))]),
        );
        assert_eq!(
            rendered,
            "The value for input 'rows' should be a list, but received str."
        );
    }

    #[test]
    fn test_render_missing_placeholder_returns_template() {
        let template = "The value for input '{input_key}' should be a list, but received {value_type}.";
        let rendered = render(template, &args(&[("input_key", json!("rows"))]));
        assert_eq!(rendered, template);
        assert!(rendered.contains("{value_type}"));
    }

    #[test]
    fn test_render_null_value_returns_template() {
        let template = "Node '{node_name}' is invalid.";
        let rendered = render(template, &args(&[("node_name", Value::Null)]));
        assert_eq!(rendered, template);
    }

    #[test]
    fn test_render_empty_args_returns_template() {
        let template = "Run name '{name}' cannot be found.";
        assert_eq!(render(template, &Map::new()), template);
    }

    #[test]
    fn test_render_non_string_values() {
        let rendered = render(
            "Retry limit {limit} reached after {elapsed} seconds.",
            &args(&[("limit", json!(3)), ("elapsed", json!(12.5))]),
        );
        assert_eq!(rendered, "Retry limit 3 reached after 12.5 seconds.");
    }

    #[test]
    fn test_render_template_without_placeholders() {
        let template = "The flow graph contains a cycle.";
        assert_eq!(render(template, &Map::new()), template);
        assert_eq!(render(template, &args(&[("unused", json!("x"))])), template);
    }

    #[test]
    fn test_render_empty_template() {
        assert_eq!(render("", &Map::new()), "");
    }
}
