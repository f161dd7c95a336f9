//! The DSL configuration grammar (spec.md §3 "DSL configuration", §6
//! "Configuration grammar").
//!
//! Deliberately permissive: `Config` only pins down the shape the
//! evaluator actually consumes (`root`, `pipeline`, `output`); individual
//! pipeline steps stay as raw [`serde_json::Value`] here and are parsed
//! into concrete [`crate::ops::Operation`] values one at a time by the
//! evaluator, so that one malformed step never prevents the rest of the
//! pipeline from running.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Accepted for forward compatibility; unused by the evaluator.
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub root: Option<RootConfig>,
    #[serde(default)]
    pub pipeline: Vec<Value>,
    #[serde(default)]
    pub output: Option<Value>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub on_null: Option<String>,
}

impl Config {
    /// Parses a whole configuration document. Used by the validator and by
    /// convenience entry points; the evaluator can also work directly off
    /// a `&Value` that failed to parse as `Config` (it just falls back to
    /// the all-defaults configuration, since a malformed top-level shape is
    /// itself a "shape mismatch" per the error policy).
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_full_config() {
        let cfg: Config = serde_json::from_value(json!({
            "root": {"path": "d", "on_null": "return_original"},
            "pipeline": [{"op": "drop", "paths": ["x"]}],
            "output": {"k": "$working.k"}
        }))
        .expect("valid config");
        assert_eq!(cfg.root.unwrap().path, "d");
        assert_eq!(cfg.pipeline.len(), 1);
    }

    #[test]
    fn test_missing_sections_default() {
        let cfg: Config = serde_json::from_value(json!({})).expect("defaults");
        assert!(cfg.root.is_none());
        assert!(cfg.pipeline.is_empty());
        assert!(cfg.output.is_none());
    }
}
