//! The operator catalogue (spec.md §4.2): one pure `Value -> Value` handler
//! per operator kind, dispatched from a tagged enum. Unknown `op` tags, and
//! operation records that fail to deserialize into their kind's parameter
//! shape, both degrade to identity — the dispatcher never propagates an
//! error past itself.

pub mod cleanup;
pub mod dates;
pub mod list_shape;
pub mod plumbing;
pub mod restructure;
pub mod transform;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// One parsed pipeline step. Tagged on the `op` field, the rest of the
/// record's keys deserialize straight into the matching variant — this
/// mirrors the `#[serde(tag = "operation", content = "spec")]` shape the
/// teacher crate uses for its own (much smaller) operator set, flattened
/// here since this DSL's operation records are flat objects rather than
/// `{operation, spec}` envelopes.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Drop {
        paths: Vec<String>,
    },
    Project {
        path: String,
        mapping: IndexMap<String, String>,
    },
    ProjectAndReplace {
        projection: IndexMap<String, String>,
    },
    Rename {
        mapping: IndexMap<String, String>,
    },
    HoistMapValues {
        path: String,
        child_key: String,
        #[serde(default)]
        replace_parent: bool,
    },
    ListToMap {
        path: String,
        key_from: String,
        value_from: String,
    },
    ListToDynamicMap {
        path: String,
        key_from: String,
        value_from: String,
    },
    PromoteListToKeys {
        path: String,
        child_list: String,
        key_from: String,
        value_from: String,
    },
    TruncateList {
        path: String,
        #[serde(default)]
        max_size: Option<i64>,
        shape: Value,
    },
    AggregateList {
        path: String,
        shape: Value,
    },
    Prune {
        strategy: String,
    },
    Set {
        path: String,
        value: Value,
    },
    Copy {
        from: String,
        to: String,
    },
    Move {
        from: String,
        to: String,
    },
    Transform {
        path: String,
        function: String,
        #[serde(default)]
        args: Vec<Value>,
    },
    CurrentTimestamp {
        path: String,
        #[serde(default = "dates::default_format")]
        format: String,
        #[serde(default = "dates::default_timezone")]
        timezone: String,
    },
    FormatDate {
        path: String,
        format: String,
    },
    ParseDate {
        path: String,
        #[serde(default = "dates::default_format")]
        output_format: String,
    },
    DateAdd {
        path: String,
        amount: i64,
        unit: String,
        #[serde(default = "dates::default_format")]
        output_format: String,
    },
    DateDiff {
        from_path: String,
        to_path: String,
        result_path: String,
        #[serde(default = "dates::default_unit")]
        unit: String,
    },
}

/// Parses one raw pipeline-step record into an [`Operation`]. Returns
/// `None` on any shape mismatch (wrong types, missing required keys,
/// unknown `op` tag) — the evaluator treats `None` as "leave `working`
/// unchanged", per the error policy in spec.md §7.
pub fn parse_step(raw: &Value) -> Option<Operation> {
    serde_json::from_value(raw.clone()).ok()
}

/// Applies one already-parsed operation to `working`, producing the next
/// `working` value. Each handler is internally best-effort: a path miss, a
/// type mismatch, or an unparseable date all resolve to identity on that
/// sub-part rather than aborting the whole operation.
pub fn apply(working: Value, op: &Operation) -> Value {
    match op {
        Operation::Drop { paths } => restructure::drop_paths(working, paths),
        Operation::Project { path, mapping } => restructure::project(working, path, mapping),
        Operation::ProjectAndReplace { projection } => {
            restructure::project_and_replace(working, projection)
        }
        Operation::Rename { mapping } => restructure::rename(working, mapping),
        Operation::HoistMapValues {
            path,
            child_key,
            replace_parent,
        } => restructure::hoist_map_values(working, path, child_key, *replace_parent),
        Operation::ListToMap {
            path,
            key_from,
            value_from,
        } => list_shape::list_to_map(working, path, key_from, value_from),
        Operation::ListToDynamicMap {
            path,
            key_from,
            value_from,
        } => list_shape::list_to_dynamic_map(working, path, key_from, value_from),
        Operation::PromoteListToKeys {
            path,
            child_list,
            key_from,
            value_from,
        } => list_shape::promote_list_to_keys(working, path, child_list, key_from, value_from),
        Operation::TruncateList { path, shape, .. } => {
            list_shape::truncate_list(working, path, shape)
        }
        Operation::AggregateList { path, shape } => {
            list_shape::aggregate_list(working, path, shape)
        }
        Operation::Prune { strategy } => cleanup::prune(working, strategy),
        Operation::Set { path, value } => plumbing::set(working, path, value),
        Operation::Copy { from, to } => plumbing::copy(working, from, to),
        Operation::Move { from, to } => plumbing::move_path(working, from, to),
        Operation::Transform {
            path,
            function,
            args,
        } => transform::transform(working, path, function, args),
        Operation::CurrentTimestamp {
            path,
            format,
            timezone,
        } => dates::current_timestamp(working, path, format, timezone),
        Operation::FormatDate { path, format } => dates::format_date(working, path, format),
        Operation::ParseDate { path, output_format } => {
            dates::parse_date(working, path, output_format)
        }
        Operation::DateAdd {
            path,
            amount,
            unit,
            output_format,
        } => dates::date_add(working, path, *amount, unit, output_format),
        Operation::DateDiff {
            from_path,
            to_path,
            result_path,
            unit,
        } => dates::date_diff(working, from_path, to_path, result_path, unit),
    }
}
