//! The validator surface collaborator (spec.md §4.5). Unlike the evaluator,
//! `validate` is strict: it rejects a configuration the evaluator would
//! happily run in its more permissive, identity-on-mismatch mode. It is
//! never called by `execute`.

use serde_json::Value;

use crate::error::Error;

/// Checks that `config` is an `Obj` containing a `pipeline` array whose
/// every step has an `op` string and that op's required parameters, in the
/// shapes the operator table demands. Returns the first offending step's
/// error as a string; `Ok(())` means the configuration would drive every
/// step without a parameter-shape failure (it says nothing about whether
/// individual paths exist in a given input).
pub fn validate(config: &Value) -> Result<(), String> {
    validate_inner(config).map_err(|e| e.to_string())
}

fn validate_inner(config: &Value) -> Result<(), Error> {
    let Value::Object(map) = config else {
        return Err(Error::ConfigNotObject);
    };

    if let Some(version) = map.get("version") {
        let valid = match version {
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.is_i64() || n.is_u64(),
            _ => false,
        };
        if !valid {
            return Err(Error::InvalidVersion);
        }
    }

    let pipeline = match map.get("pipeline") {
        Some(Value::Array(steps)) => steps,
        _ => return Err(Error::PipelineNotArray),
    };

    for (index, step) in pipeline.iter().enumerate() {
        validate_step(index, step)?;
    }
    Ok(())
}

fn validate_step(index: usize, step: &Value) -> Result<(), Error> {
    let op = step
        .get("op")
        .and_then(Value::as_str)
        .ok_or(Error::MissingOpTag { index })?;

    let required: &[(&'static str, Shape)] = match op {
        "drop" => &[("paths", Shape::Array)],
        "project" => &[("path", Shape::String), ("mapping", Shape::Object)],
        "project_and_replace" => &[("projection", Shape::Object)],
        "rename" => &[("mapping", Shape::Object)],
        "hoist_map_values" => &[("path", Shape::String), ("child_key", Shape::String)],
        "list_to_map" | "list_to_dynamic_map" => {
            &[("path", Shape::String), ("key_from", Shape::String), ("value_from", Shape::String)]
        }
        "promote_list_to_keys" => &[
            ("path", Shape::String),
            ("child_list", Shape::String),
            ("key_from", Shape::String),
            ("value_from", Shape::String),
        ],
        "truncate_list" => &[("path", Shape::String), ("shape", Shape::Object)],
        "aggregate_list" => &[("path", Shape::String), ("shape", Shape::Object)],
        "prune" => &[("strategy", Shape::String)],
        "set" => &[("path", Shape::String)],
        "transform" => &[("path", Shape::String), ("function", Shape::String)],
        "copy" | "move" => &[("from", Shape::String), ("to", Shape::String)],
        "current_timestamp" => &[("path", Shape::String)],
        "format_date" => &[("path", Shape::String), ("format", Shape::String)],
        "parse_date" => &[("path", Shape::String)],
        "date_add" => &[("path", Shape::String), ("amount", Shape::Number), ("unit", Shape::String)],
        "date_diff" => &[
            ("from_path", Shape::String),
            ("to_path", Shape::String),
            ("result_path", Shape::String),
        ],
        other => {
            return Err(Error::UnknownOp {
                index,
                op: other.to_string(),
            })
        }
    };

    for (param, shape) in required {
        match step.get(param) {
            Some(v) if shape.matches(v) => {}
            Some(_) => {
                return Err(Error::WrongParamType {
                    index,
                    op: op.to_string(),
                    param,
                })
            }
            None => {
                return Err(Error::MissingParam {
                    index,
                    op: op.to_string(),
                    param,
                })
            }
        }
    }

    if op == "set" && step.get("value").is_none() {
        return Err(Error::MissingParam {
            index,
            op: op.to_string(),
            param: "value",
        });
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum Shape {
    String,
    Array,
    Object,
    Number,
}

impl Shape {
    fn matches(self, v: &Value) -> bool {
        match self {
            Shape::String => v.is_string(),
            Shape::Array => v.is_array(),
            Shape::Object => v.is_object(),
            Shape::Number => v.is_number(),
        }
    }
}
