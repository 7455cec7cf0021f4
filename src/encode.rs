//! Structured rendering of JSON documents for human inspection.
//!
//! Two formats: pretty-printed JSON (delegated to the serializer) and a
//! YAML-like rendering produced by a small recursive encoder, so the
//! display path never pulls in a full YAML engine.
//!
//! The YAML output is display-oriented: strings are quoted only when they
//! would otherwise be ambiguous (empty, special characters, leading or
//! trailing whitespace, or text that reads as a boolean/null/number
//! literal). Round-tripping through a real YAML parser is not guaranteed
//! and quoting is deliberately not extended beyond that rule.
//!
//! Inputs are decoded API payloads, which are acyclic by construction;
//! cyclic values are an unchecked precondition.

use serde_json::{Number, Value};

/// Output format for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Yaml,
    Json,
}

impl RenderFormat {
    /// Parse a format name from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render a JSON value tree as a single text block.
pub fn encode(value: &Value, format: RenderFormat) -> String {
    match format {
        RenderFormat::Json => {
            // Serializing an in-memory Value cannot hit I/O or key errors.
            serde_json::to_string_pretty(value).expect("JSON value serialization does not fail")
        }
        RenderFormat::Yaml => render(value, 0),
    }
}

/// Characters that force quoting when present anywhere in a string.
const SPECIAL: &[char] = &[
    ':', '-', '?', '[', ']', '{', '}', ',', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
];

fn render(value: &Value, depth: usize) -> String {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            items
                .iter()
                .map(|item| {
                    if item.is_object() || item.is_array() {
                        // Splice the nested render's first line onto the
                        // "- " prefix; subsequent lines keep their deeper
                        // indent.
                        format!("{}- {}", indent(depth), render(item, depth + 1).trim_start())
                    } else {
                        format!("{}- {}", indent(depth), scalar(item))
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            map.iter()
                .map(|(key, val)| {
                    let key_text = if needs_quotes(key) {
                        quote(key)
                    } else {
                        key.clone()
                    };
                    if val.is_object() || val.is_array() {
                        format!("{}{}:\n{}", indent(depth), key_text, render(val, depth + 1))
                    } else {
                        format!("{}{}: {}", indent(depth), key_text, scalar(val))
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        _ => scalar(value),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => {
            if needs_quotes(s) {
                quote(s)
            } else {
                s.clone()
            }
        }
        // Containers are dispatched by render(); quote anything else.
        other => quote(&other.to_string()),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return itoa::Buffer::new().format(i).to_string();
    }
    if let Some(u) = n.as_u64() {
        return itoa::Buffer::new().format(u).to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => ryu::Buffer::new().format(f).to_string(),
        Some(f) => quote(&f.to_string()),
        None => quote(&n.to_string()),
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// A string must be quoted if it is empty, contains a special character,
/// has leading or trailing whitespace, or parses entirely as a
/// boolean/null/numeric literal that a reader would reinterpret.
fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.contains(SPECIAL)
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || is_ambiguous_literal(s)
}

fn is_ambiguous_literal(s: &str) -> bool {
    s.eq_ignore_ascii_case("true")
        || s.eq_ignore_ascii_case("false")
        || s.eq_ignore_ascii_case("null")
        || s == "~"
        || is_numeric_literal(s)
}

/// Matches a signed integer or decimal: `-?digits(.digits)?`.
fn is_numeric_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match frac_part {
        Some(f) => !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn yaml(value: Value) -> String {
        encode(&value, RenderFormat::Yaml)
    }

    #[test]
    fn test_bare_and_quoted_scalars() {
        assert_eq!(yaml(json!("hello")), "hello");
        assert_eq!(yaml(json!("true")), "\"true\"");
        assert_eq!(yaml(json!("False")), "\"False\"");
        assert_eq!(yaml(json!("null")), "\"null\"");
        assert_eq!(yaml(json!("~")), "\"~\"");
        assert_eq!(yaml(json!("42")), "\"42\"");
        assert_eq!(yaml(json!("-1.5")), "\"-1.5\"");
        assert_eq!(yaml(json!("")), "\"\"");
        assert_eq!(yaml(json!(" padded")), "\" padded\"");
        assert_eq!(yaml(json!("a: b")), "\"a: b\"");
    }

    #[test]
    fn test_non_literal_lookalikes_stay_bare() {
        assert_eq!(yaml(json!("1.2.3")), "1.2.3");
        assert_eq!(yaml(json!("1.")), "1.");
        assert_eq!(yaml(json!("truely")), "truely");
    }

    #[test]
    fn test_quote_escaping() {
        assert_eq!(yaml(json!("say \"hi\"")), "\"say \\\"hi\\\"\"");
        assert_eq!(yaml(json!("back\\slash, kind of")), "\"back\\\\slash, kind of\"");
    }

    #[test]
    fn test_native_scalars() {
        assert_eq!(yaml(json!(null)), "null");
        assert_eq!(yaml(json!(true)), "true");
        assert_eq!(yaml(json!(42)), "42");
        assert_eq!(yaml(json!(-7)), "-7");
        assert_eq!(yaml(json!(2.5)), "2.5");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(yaml(json!({})), "{}");
        assert_eq!(yaml(json!([])), "[]");
    }

    #[test]
    fn test_array_nesting() {
        assert_eq!(yaml(json!({"a": [1, 2]})), "a:\n  - 1\n  - 2");
    }

    #[test]
    fn test_object_in_array_splices_first_line() {
        let out = yaml(json!([{"name": "web", "cpu": 8}, {"name": "db"}]));
        assert_eq!(out, "- name: web\n  cpu: 8\n- name: db");
    }

    #[test]
    fn test_dashed_names_are_quoted() {
        assert_eq!(yaml(json!("node-000")), "\"node-000\"");
        assert_eq!(
            yaml(json!({"started_at": "2026-08-05 12:00:00"})),
            "started_at: \"2026-08-05 12:00:00\""
        );
    }

    #[test]
    fn test_array_in_array() {
        let out = yaml(json!([[1, 2], [3]]));
        assert_eq!(out, "- - 1\n  - 2\n- - 3");
    }

    #[test]
    fn test_deep_nesting_indent() {
        let out = yaml(json!({"a": {"b": {"c": "d"}}}));
        assert_eq!(out, "a:\n  b:\n    c: d");
    }

    #[test]
    fn test_keys_follow_quoting_rule() {
        let out = yaml(json!({"plain": 1, "needs: quoting": 2}));
        assert_eq!(out, "plain: 1\n\"needs: quoting\": 2");
    }

    #[test]
    fn test_key_order_preserved() {
        let out = yaml(json!({"z": 1, "a": 2, "m": 3}));
        assert_eq!(out, "z: 1\na: 2\nm: 3");
    }

    #[test]
    fn test_json_mode_two_space_indent() {
        let out = encode(&json!({"a": [1]}), RenderFormat::Json);
        assert_eq!(out, "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(RenderFormat::from_str("YAML"), Some(RenderFormat::Yaml));
        assert_eq!(RenderFormat::from_str("yml"), Some(RenderFormat::Yaml));
        assert_eq!(RenderFormat::from_str("json"), Some(RenderFormat::Json));
        assert_eq!(RenderFormat::from_str("toml"), None);
    }
}
