//! List-shaping operators: `list_to_map`, `list_to_dynamic_map`,
//! `promote_list_to_keys`, `truncate_list`, `aggregate_list`
//! (spec.md §4.2 "List shaping").

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::path::Path;
use crate::traversal::{get, update};

fn fold_list_to_map(value: Value, key_from: &str, value_from: &str) -> Value {
    match value {
        Value::Array(items) => {
            let mut out = Map::new();
            for item in items {
                if let Value::Object(obj) = item {
                    if let Some(Value::String(k)) = obj.get(key_from) {
                        let v = obj.get(value_from).cloned().unwrap_or(Value::Null);
                        out.insert(k.clone(), v);
                    }
                }
            }
            Value::Object(out)
        }
        other => other,
    }
}

pub fn list_to_map(working: Value, path: &str, key_from: &str, value_from: &str) -> Value {
    update(working, &Path::parse(path), &|v| {
        fold_list_to_map(v, key_from, value_from)
    })
}

pub fn list_to_dynamic_map(working: Value, path: &str, key_from: &str, value_from: &str) -> Value {
    update(working, &Path::parse(path), &|v| match v {
        Value::Array(items) => {
            let mut groups: IndexMap<String, Vec<Value>> = IndexMap::new();
            for item in items {
                if let Value::Object(obj) = item {
                    if let Some(Value::String(k)) = obj.get(key_from) {
                        let val = obj.get(value_from).cloned().unwrap_or(Value::Null);
                        groups.entry(k.clone()).or_default().push(val);
                    }
                }
            }
            Value::Object(
                groups
                    .into_iter()
                    .map(|(k, vals)| (k, Value::Array(vals)))
                    .collect(),
            )
        }
        other => other,
    })
}

pub fn promote_list_to_keys(
    working: Value,
    path: &str,
    child_list: &str,
    key_from: &str,
    value_from: &str,
) -> Value {
    update(working, &Path::parse(path), &|v| match v {
        Value::Object(mut map) => {
            let child = map.remove(child_list).unwrap_or(Value::Null);
            if let Value::Object(folded) = fold_list_to_map(child, key_from, value_from) {
                for (k, val) in folded {
                    map.insert(k, val);
                }
            }
            Value::Object(map)
        }
        other => other,
    })
}

fn parse_two_usize(inner: &str) -> Option<(usize, usize)> {
    let mut parts = inner.splitn(2, ',');
    let i = parts.next()?.trim().parse().ok()?;
    let j = parts.next()?.trim().parse().ok()?;
    Some((i, j))
}

fn parse_three_args(inner: &str) -> Option<(usize, usize, String)> {
    let mut parts = inner.splitn(3, ',');
    let i = parts.next()?.trim().parse().ok()?;
    let j = parts.next()?.trim().parse().ok()?;
    let p = parts.next()?.trim().to_string();
    Some((i, j, p))
}

fn bounded_slice(items: &[Value], i: usize, j: usize) -> &[Value] {
    let i = i.min(items.len());
    let j = j.min(items.len());
    if i >= j {
        &[]
    } else {
        &items[i..j]
    }
}

fn resolve_truncate_leaf(leaf: &str, items: &[Value]) -> Value {
    if leaf == "$length" {
        return Value::from(items.len());
    }
    if let Some(inner) = leaf.strip_prefix("$slice(").and_then(|r| r.strip_suffix(')')) {
        if let Some((i, j)) = parse_two_usize(inner) {
            return Value::Array(bounded_slice(items, i, j).to_vec());
        }
    }
    if let Some(inner) = leaf
        .strip_prefix("$map_slice(")
        .and_then(|r| r.strip_suffix(')'))
    {
        if let Some((i, j, p)) = parse_three_args(inner) {
            let path = Path::parse(&p);
            return Value::Array(
                bounded_slice(items, i, j)
                    .iter()
                    .map(|x| get(x, &path))
                    .collect(),
            );
        }
    }
    Value::String(leaf.to_string())
}

fn resolve_shape<F>(shape: &Value, items: &[Value], resolve_leaf: &F) -> Value
where
    F: Fn(&str, &[Value]) -> Value,
{
    match shape {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve_shape(v, items, resolve_leaf)))
                .collect(),
        ),
        Value::Array(arr) => Value::Array(
            arr.iter()
                .map(|v| resolve_shape(v, items, resolve_leaf))
                .collect(),
        ),
        Value::String(s) => resolve_leaf(s, items),
        other => other.clone(),
    }
}

pub fn truncate_list(working: Value, path: &str, shape: &Value) -> Value {
    update(working, &Path::parse(path), &|v| match v {
        Value::Array(items) => resolve_shape(shape, &items, &resolve_truncate_leaf),
        other => other,
    })
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let xf = x.as_f64().unwrap_or(0.0);
            let yf = y.as_f64().unwrap_or(0.0);
            xf.partial_cmp(&yf).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn aggregate(items: &[Value], path_str: &str, want: Ordering) -> Value {
    let path = Path::parse(path_str);
    let mut best: Option<Value> = None;
    for item in items {
        let v = get(item, &path);
        if v.is_null() {
            continue;
        }
        best = Some(match best {
            None => v,
            Some(cur) => {
                if compare_values(&v, &cur) == want {
                    v
                } else {
                    cur
                }
            }
        });
    }
    best.unwrap_or(Value::Null)
}

fn resolve_aggregate_leaf(leaf: &str, items: &[Value]) -> Value {
    if let Some(p) = leaf.strip_prefix("$min(").and_then(|r| r.strip_suffix(')')) {
        return aggregate(items, p, Ordering::Less);
    }
    if let Some(p) = leaf.strip_prefix("$max(").and_then(|r| r.strip_suffix(')')) {
        return aggregate(items, p, Ordering::Greater);
    }
    Value::String(leaf.to_string())
}

pub fn aggregate_list(working: Value, path: &str, shape: &Value) -> Value {
    update(working, &Path::parse(path), &|v| match v {
        Value::Array(items) => resolve_shape(shape, &items, &resolve_aggregate_leaf),
        other => other,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_to_map_last_wins_on_duplicate_keys() {
        let v = json!({"cfg": [{"k": "t", "v": "dark"}, {"k": "l", "v": "en"}, {"k": "t", "v": "light"}]});
        let out = list_to_map(v, "cfg", "k", "v");
        assert_eq!(out, json!({"cfg": {"t": "light", "l": "en"}}));
    }

    #[test]
    fn test_list_to_map_under_wildcard_nested_scenario() {
        let v = json!({"events":[{"id":1,"cfg":[{"k":"t","v":"dark"},{"k":"l","v":"en"}]}]});
        let out = update(v, &Path::parse("events[].cfg"), &|x| fold_list_to_map(x, "k", "v"));
        assert_eq!(
            out,
            json!({"events":[{"id":1,"cfg":{"t":"dark","l":"en"}}]})
        );
    }

    #[test]
    fn test_list_to_dynamic_map_groups() {
        let v = json!({"xs": [{"k": "a", "v": 1}, {"k": "b", "v": 2}, {"k": "a", "v": 3}]});
        let out = list_to_dynamic_map(v, "xs", "k", "v");
        assert_eq!(out, json!({"xs": {"a": [1, 3], "b": [2]}}));
    }

    #[test]
    fn test_promote_list_to_keys() {
        let v = json!({"p": {"name": "x", "tags": [{"k": "color", "v": "red"}]}});
        let out = promote_list_to_keys(v, "p", "tags", "k", "v");
        assert_eq!(out, json!({"p": {"name": "x", "color": "red"}}));
    }

    #[test]
    fn test_truncate_list_length_and_slice() {
        let v = json!({"xs": [1, 2, 3, 4, 5]});
        let shape = json!({"count": "$length", "first_two": "$slice(0,2)"});
        let out = truncate_list(v, "xs", &shape);
        assert_eq!(out, json!({"xs": {"count": 5, "first_two": [1, 2]}}));
    }

    #[test]
    fn test_truncate_list_map_slice() {
        let v = json!({"xs": [{"n": "a"}, {"n": "b"}, {"n": "c"}]});
        let shape = json!({"names": "$map_slice(0,2,n)"});
        let out = truncate_list(v, "xs", &shape);
        assert_eq!(out, json!({"xs": {"names": ["a", "b"]}}));
    }

    #[test]
    fn test_aggregate_list_min_max() {
        let v = json!({"xs": [{"p": 3}, {"p": 1}, {"p": 2}]});
        let shape = json!({"low": "$min(p)", "high": "$max(p)"});
        let out = aggregate_list(v, "xs", &shape);
        assert_eq!(out, json!({"xs": {"low": 1, "high": 3}}));
    }

    #[test]
    fn test_aggregate_list_empty_is_null() {
        let v = json!({"xs": []});
        let shape = json!({"low": "$min(p)"});
        let out = aggregate_list(v, "xs", &shape);
        assert_eq!(out, json!({"xs": {"low": Value::Null}}));
    }

    #[test]
    fn test_aggregate_list_skips_null_items() {
        let v = json!({"xs": [{"p": null}, {"p": 2}]});
        let shape = json!({"low": "$min(p)"});
        let out = aggregate_list(v, "xs", &shape);
        assert_eq!(out, json!({"xs": {"low": 2}}));
    }
}
