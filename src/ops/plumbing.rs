//! Path-plumbing operators: `set`, `copy`, `move` (spec.md §4.2 "Path
//! plumbing"). All three share one alignment rule: when the source and
//! destination paths start with the same wildcard-bearing prefix, the
//! copy happens array-aligned (element `i`'s source feeds element `i`'s
//! destination); otherwise it's a plain read-then-put, which naturally
//! lifts into an array when only one side carries a `[]`.

use serde_json::Value;

use crate::path::{common_prefix_len, slice_has_wildcard, Path};
use crate::traversal::{delete, get, put, update};

fn copy_value(working: Value, from: &str, to: &str) -> Value {
    let from_segs = Path::parse(from).segments().to_vec();
    let to_segs = Path::parse(to).segments().to_vec();
    let common_len = common_prefix_len(&from_segs, &to_segs);

    if common_len > 0 && slice_has_wildcard(&from_segs[..common_len]) {
        let common_prefix = Path::from_segments(from_segs[..common_len].to_vec());
        let suffix_from = Path::from_segments(from_segs[common_len..].to_vec());
        let suffix_to = Path::from_segments(to_segs[common_len..].to_vec());
        update(working, &common_prefix, &|elem| {
            let v = get(&elem, &suffix_from);
            put(elem, &suffix_to, v)
        })
    } else {
        let from_path = Path::from_segments(from_segs);
        let to_path = Path::from_segments(to_segs);
        let v = get(&working, &from_path);
        put(working, &to_path, v)
    }
}

pub fn copy(working: Value, from: &str, to: &str) -> Value {
    copy_value(working, from, to)
}

pub fn move_path(working: Value, from: &str, to: &str) -> Value {
    let copied = copy_value(working, from, to);
    delete(copied, &Path::parse(from))
}

/// A `value` beginning with `$path:` names a source path to read (using
/// the same alignment rule as `copy`); any other value is a literal,
/// broadcast via `put` into every element the target path's wildcards
/// reach.
pub fn set(working: Value, path: &str, value: &Value) -> Value {
    match value {
        Value::String(s) if s.starts_with("$path:") => {
            let source = &s["$path:".len()..];
            copy_value(working, source, path)
        }
        literal => put(working, &Path::parse(path), literal.clone()),
    }
}
