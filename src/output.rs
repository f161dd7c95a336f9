//! Output template resolution (spec.md §4.3).

use serde_json::Value;

use crate::path::Path;
use crate::traversal::get;

/// Resolves an `output` template against `(root, working)`. A missing
/// template, or a template that is the empty object `{}`, both default to
/// returning `working` as-is.
pub fn resolve_output(root: &Value, working: &Value, template: Option<&Value>) -> Value {
    match template {
        None => working.clone(),
        Some(t) => resolve(root, working, t),
    }
}

fn resolve(root: &Value, working: &Value, template: &Value) -> Value {
    match template {
        Value::Object(map) if map.is_empty() => working.clone(),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve(root, working, v)))
                .collect(),
        ),
        Value::String(s) => resolve_string(root, working, s),
        other => other.clone(),
    }
}

fn resolve_string(root: &Value, working: &Value, s: &str) -> Value {
    if let Some(rest) = s.strip_prefix("$root") {
        return resolve_prefixed(root, rest, s);
    }
    if let Some(rest) = s.strip_prefix("$working") {
        return resolve_prefixed(working, rest, s);
    }
    Value::String(s.to_string())
}

fn resolve_prefixed(base: &Value, rest: &str, original: &str) -> Value {
    if rest.is_empty() {
        return base.clone();
    }
    match rest.strip_prefix('.') {
        Some(suffix) => get(base, &Path::parse(suffix)),
        None => Value::String(original.to_string()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_output_returns_working() {
        let root = json!({"s": "hi"});
        let working = json!({"k": "v"});
        assert_eq!(resolve_output(&root, &working, None), working);
    }

    #[test]
    fn test_empty_object_defaults_to_working() {
        let root = json!({});
        let working = json!({"k": "v"});
        let template = json!({});
        assert_eq!(resolve_output(&root, &working, Some(&template)), working);
    }

    #[test]
    fn test_root_and_working_field_substitution() {
        let root = json!({"s": "hi"});
        let working = json!({"k": "v", "x": 1});
        let template = json!({"k": "$working.k", "meta": "$root.s"});
        assert_eq!(
            resolve_output(&root, &working, Some(&template)),
            json!({"k": "v", "meta": "hi"})
        );
    }

    #[test]
    fn test_whole_working_reference() {
        let root = json!({});
        let working = json!({"events": [1, 2]});
        let template = json!({"r": "$working"});
        assert_eq!(
            resolve_output(&root, &working, Some(&template)),
            json!({"r": working})
        );
    }

    #[test]
    fn test_literal_string_not_matching_prefix() {
        let root = json!({});
        let working = json!({});
        let template = json!({"k": "$rootless-literal"});
        assert_eq!(
            resolve_output(&root, &working, Some(&template)),
            json!({"k": "$rootless-literal"})
        );
    }

    #[test]
    fn test_arrays_and_primitives_are_literal() {
        let root = json!({});
        let working = json!({});
        let template = json!({"arr": ["$root", "$working"], "n": 5, "b": true});
        assert_eq!(
            resolve_output(&root, &working, Some(&template)),
            json!({"arr": ["$root", "$working"], "n": 5, "b": true})
        );
    }
}
