//! Cleanup operator: `prune` (spec.md §4.2 "Cleanup").

use serde_json::{Map, Value};

/// `strategy: "empty_values"` recursively deletes object entries and array
/// elements equal to `Null`, `""`, `{}`, or `[]`, pruning children first so
/// an object that becomes empty only after its own children are pruned is
/// itself removed from its parent. Any other strategy — including
/// `"null_values"`, which spec.md documents but whose source never
/// implements — leaves the value unchanged (see DESIGN.md).
pub fn prune(working: Value, strategy: &str) -> Value {
    if strategy != "empty_values" {
        return working;
    }
    prune_value(working)
}

fn prune_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (k, v) in map {
                let pruned = prune_value(v);
                if !is_empty(&pruned) {
                    out.insert(k, pruned);
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(prune_value)
                .filter(|v| !is_empty(v))
                .collect(),
        ),
        other => other,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prune_empty_values_scenario() {
        let v = json!({"a":"x","b":"","c":null,"d":{},"e":{"k":"y","m":""}});
        assert_eq!(prune(v, "empty_values"), json!({"a":"x","e":{"k":"y"}}));
    }

    #[test]
    fn test_prune_is_idempotent() {
        let v = json!({"a":"x","b":"","c":null,"d":{},"e":{"k":"y","m":""}});
        let once = prune(v, "empty_values");
        let twice = prune(once.clone(), "empty_values");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_prune_removes_empty_array_elements() {
        let v = json!({"xs": [1, null, "", [], {}, 2]});
        assert_eq!(prune(v, "empty_values"), json!({"xs": [1, 2]}));
    }

    #[test]
    fn test_prune_null_values_strategy_is_noop() {
        let v = json!({"a": null, "b": ""});
        assert_eq!(prune(v.clone(), "null_values"), v);
    }

    #[test]
    fn test_prune_unknown_strategy_is_noop() {
        let v = json!({"a": null});
        assert_eq!(prune(v.clone(), "bogus"), v);
    }
}
