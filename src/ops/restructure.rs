//! Restructuring operators: `drop`, `project`, `project_and_replace`,
//! `rename`, `hoist_map_values` (spec.md §4.2 "Restructuring").

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::path::{common_prefix_len, slice_has_wildcard, Path};
use crate::traversal::{delete, get, put, update};

pub fn drop_paths(working: Value, paths: &[String]) -> Value {
    paths
        .iter()
        .fold(working, |w, p| delete(w, &Path::parse(p)))
}

pub fn project(working: Value, path: &str, mapping: &IndexMap<String, String>) -> Value {
    let path = Path::parse(path);
    let subtree = get(&working, &path);
    let projected = project_value(&subtree, mapping);
    put(working, &path, projected)
}

pub fn project_and_replace(working: Value, projection: &IndexMap<String, String>) -> Value {
    project_one(&working, projection)
}

fn project_value(v: &Value, mapping: &IndexMap<String, String>) -> Value {
    match v {
        Value::Object(_) => project_one(v, mapping),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| project_one(item, mapping)).collect())
        }
        other => other.clone(),
    }
}

fn project_one(source: &Value, mapping: &IndexMap<String, String>) -> Value {
    let mut out = Map::new();
    for (new_key, source_path) in mapping {
        out.insert(new_key.clone(), get(source, &Path::parse(source_path)));
    }
    Value::Object(out)
}

/// Locates the common segment prefix of `from`/`to`, then — at the first
/// divergence point — reads the value at `from`'s suffix, writes it at
/// `to`'s suffix, and deletes `from`'s suffix. A wildcard inside the
/// common prefix broadcasts pointwise over the array it addresses (this
/// falls naturally out of reusing `update`, which is itself
/// wildcard-aware). A wildcard appearing only in one of the two suffixes —
/// i.e. not shared by both sides — can't be reconciled into a single
/// pointwise rewrite, so that pair is left untouched.
pub fn rename(working: Value, mapping: &IndexMap<String, String>) -> Value {
    mapping
        .iter()
        .fold(working, |w, (from, to)| rename_one(w, from, to))
}

fn rename_one(working: Value, from: &str, to: &str) -> Value {
    let from_segs = Path::parse(from).segments().to_vec();
    let to_segs = Path::parse(to).segments().to_vec();

    let common_len = common_prefix_len(&from_segs, &to_segs);

    let suffix_from = &from_segs[common_len..];
    let suffix_to = &to_segs[common_len..];

    if slice_has_wildcard(suffix_from) || slice_has_wildcard(suffix_to) {
        return working;
    }

    let common_prefix = Path::from_segments(from_segs[..common_len].to_vec());
    let suffix_from_path = Path::from_segments(suffix_from.to_vec());
    let suffix_to_path = Path::from_segments(suffix_to.to_vec());

    update(working, &common_prefix, &|sub| {
        let value = get(&sub, &suffix_from_path);
        let sub = put(sub, &suffix_to_path, value);
        delete(sub, &suffix_from_path)
    })
}

/// At `path`, finds object `P` and its nested object `P[child_key] = C`. If
/// `replace_parent`, returns `(P \ child_key) ⊔ C` (right-wins shallow
/// merge, `C` winning conflicts). If not `replace_parent`, this is a no-op:
/// the teacher's source documents this case as "merge" but never actually
/// implements it, and this crate preserves that observed behavior rather
/// than inventing a merge the original never shipped (see DESIGN.md).
pub fn hoist_map_values(
    working: Value,
    path: &str,
    child_key: &str,
    replace_parent: bool,
) -> Value {
    if !replace_parent {
        return working;
    }
    update(working, &Path::parse(path), &|parent| match parent {
        Value::Object(mut map) => {
            match map.remove(child_key) {
                Some(Value::Object(child)) => {
                    for (k, v) in child {
                        map.insert(k, v);
                    }
                }
                Some(other) => {
                    map.insert(child_key.to_string(), other);
                }
                None => {}
            }
            Value::Object(map)
        }
        other => other,
    })
}
