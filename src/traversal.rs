//! The five traversal primitives every operator is built from: `get`,
//! `put`, `update`, `delete`, all wildcard-aware. Keeping every operator
//! derived from these makes wildcard semantics uniform across the whole
//! catalogue instead of each operator reinventing array handling.

use serde_json::{Map, Value};

use crate::path::{Path, Segment};

/// Recursion past this many segments degrades to identity rather than
/// risking stack exhaustion on a pathological path/document.
const MAX_DEPTH: usize = 1024;

/// `get(v, [])` is `v`; `get(Obj(m), [k|rest])` recurses into `m[k]` or
/// `Null` if absent; `get(Arr(xs), [[]|rest])` lifts the recursion over
/// every element, producing an array of results.
pub fn get(value: &Value, path: &Path) -> Value {
    get_seg(value, path.segments(), 0)
}

fn get_seg(value: &Value, segs: &[Segment], depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return Value::Null;
    }
    match segs.split_first() {
        None => value.clone(),
        Some((Segment::Field(key), rest)) => match value {
            Value::Object(map) => match map.get(key) {
                Some(v) => get_seg(v, rest, depth + 1),
                None => Value::Null,
            },
            _ => Value::Null,
        },
        Some((Segment::Wildcard, rest)) => match value {
            Value::Array(items) => {
                Value::Array(items.iter().map(|x| get_seg(x, rest, depth + 1)).collect())
            }
            _ => Value::Null,
        },
    }
}

/// `put(v, [], w)` replaces the whole value; `put(Obj(m), [k], w)` sets
/// `m[k] = w`, creating the object along the way if an intermediate was
/// missing; `put(Arr(xs), [[]|rest], w)` broadcasts `w` to every element.
/// Writing through a non-Obj/non-Arr segment leaves `value` unchanged.
pub fn put(value: Value, path: &Path, replacement: Value) -> Value {
    put_seg(value, path.segments(), replacement, 0)
}

fn put_seg(value: Value, segs: &[Segment], replacement: Value, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return value;
    }
    match segs.split_first() {
        None => replacement,
        Some((Segment::Field(key), rest)) => match value {
            Value::Object(mut map) => {
                let existing = map.remove(key).unwrap_or(Value::Null);
                map.insert(key.clone(), put_seg(existing, rest, replacement, depth + 1));
                Value::Object(map)
            }
            Value::Null => {
                let mut map = Map::new();
                map.insert(key.clone(), put_seg(Value::Null, rest, replacement, depth + 1));
                Value::Object(map)
            }
            other => other,
        },
        Some((Segment::Wildcard, rest)) => match value {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| put_seg(item, rest, replacement.clone(), depth + 1))
                    .collect(),
            ),
            other => other,
        },
    }
}

/// `update(v, p, f)` is `put(v, p, f(get(v, p)))` in the non-wildcard case;
/// under `[]` it applies `f` pointwise to each element rather than to the
/// array as a whole. If the traversed shape is absent or wrong, `value` is
/// returned unchanged.
pub fn update<F>(value: Value, path: &Path, f: &F) -> Value
where
    F: Fn(Value) -> Value,
{
    update_seg(value, path.segments(), f, 0)
}

fn update_seg<F>(value: Value, segs: &[Segment], f: &F, depth: usize) -> Value
where
    F: Fn(Value) -> Value,
{
    if depth > MAX_DEPTH {
        return value;
    }
    match segs.split_first() {
        None => f(value),
        Some((Segment::Field(key), rest)) => match value {
            Value::Object(mut map) => {
                let existing = map.remove(key).unwrap_or(Value::Null);
                map.insert(key.clone(), update_seg(existing, rest, f, depth + 1));
                Value::Object(map)
            }
            other => other,
        },
        Some((Segment::Wildcard, rest)) => match value {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| update_seg(item, rest, f, depth + 1))
                    .collect(),
            ),
            other => other,
        },
    }
}

/// `delete(Obj(m), [k])` removes `k`; deeper deletes recurse; under `[]`,
/// delete is mapped over each element. Deleting an absent key is a no-op.
pub fn delete(value: Value, path: &Path) -> Value {
    delete_seg(value, path.segments(), 0)
}

fn delete_seg(value: Value, segs: &[Segment], depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return value;
    }
    match segs.split_first() {
        None => value,
        Some((Segment::Field(key), [])) => match value {
            Value::Object(mut map) => {
                map.remove(key);
                Value::Object(map)
            }
            other => other,
        },
        Some((Segment::Field(key), rest)) => match value {
            Value::Object(mut map) => {
                if let Some(existing) = map.remove(key) {
                    map.insert(key.clone(), delete_seg(existing, rest, depth + 1));
                }
                Value::Object(map)
            }
            other => other,
        },
        Some((Segment::Wildcard, rest)) => match value {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| delete_seg(item, rest, depth + 1))
                    .collect(),
            ),
            other => other,
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_plain() {
        let v = json!({"a": {"b": 1}});
        assert_eq!(get(&v, &Path::parse("a.b")), json!(1));
    }

    #[test]
    fn test_get_missing_is_null() {
        let v = json!({"a": 1});
        assert_eq!(get(&v, &Path::parse("missing.deep")), Value::Null);
    }

    #[test]
    fn test_get_wildcard_lifts() {
        let v = json!({"xs": [{"n": 1}, {"n": 2}]});
        assert_eq!(get(&v, &Path::parse("xs[].n")), json!([1, 2]));
    }

    #[test]
    fn test_get_wildcard_on_non_array_is_null() {
        let v = json!({"xs": 5});
        assert_eq!(get(&v, &Path::parse("xs[].n")), Value::Null);
    }

    #[test]
    fn test_put_creates_intermediate_objects() {
        let v = json!({});
        let out = put(v, &Path::parse("a.b.c"), json!(42));
        assert_eq!(out, json!({"a": {"b": {"c": 42}}}));
    }

    #[test]
    fn test_put_root_replaces_whole_value() {
        let v = json!({"a": 1});
        let out = put(v, &Path::root(), json!("replaced"));
        assert_eq!(out, json!("replaced"));
    }

    #[test]
    fn test_put_wildcard_broadcasts() {
        let v = json!({"xs": [{"n": 1}, {"n": 2}]});
        let out = put(v, &Path::parse("xs[].tag"), json!("t"));
        assert_eq!(out, json!({"xs": [{"n": 1, "tag": "t"}, {"n": 2, "tag": "t"}]}));
    }

    #[test]
    fn test_put_through_non_obj_non_arr_is_unchanged() {
        let v = json!({"a": 1});
        let out = put(v.clone(), &Path::parse("a.b"), json!(2));
        assert_eq!(out, v);
    }

    #[test]
    fn test_update_applies_pointwise_under_wildcard() {
        let v = json!({"xs": [{"n": 1}, {"n": 2}]});
        let out = update(v, &Path::parse("xs[].n"), &|x| match x {
            Value::Number(n) => json!(n.as_i64().unwrap() * 10),
            other => other,
        });
        assert_eq!(out, json!({"xs": [{"n": 10}, {"n": 20}]}));
    }

    #[test]
    fn test_update_identity_is_noop() {
        let v = json!({"a": {"b": 1}, "c": [1, 2, 3]});
        let out = update(v.clone(), &Path::parse("a.b"), &|x| x);
        assert_eq!(out, v);
    }

    #[test]
    fn test_delete_plain() {
        let v = json!({"a": 1, "b": 2});
        assert_eq!(delete(v, &Path::parse("a")), json!({"b": 2}));
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let v = json!({"a": 1});
        assert_eq!(delete(v.clone(), &Path::parse("missing")), v);
    }

    #[test]
    fn test_delete_wildcard_mapped() {
        let v = json!({"xs": [{"n": 1, "x": 1}, {"n": 2, "x": 2}]});
        let out = delete(v, &Path::parse("xs[].x"));
        assert_eq!(out, json!({"xs": [{"n": 1}, {"n": 2}]}));
    }

    #[test]
    fn test_get_put_roundtrip_property() {
        let v = json!({"a": {"b": {"c": 1}}});
        let p = Path::parse("a.b.c");
        let out = put(v, &p, json!("x"));
        assert_eq!(get(&out, &p), json!("x"));
    }
}
