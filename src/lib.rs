//! A declarative JSON-to-JSON rewrite engine: a path-addressed operator
//! catalogue, folded over an input document by a pipeline evaluator.
//!
//! The two primary entry points are [`execute`] and [`validate`]. `execute`
//! is total — no input/config combination makes it panic or return an
//! error; malformed pipeline steps are simply skipped. `validate` is the
//! stricter surface for checking a configuration document ahead of time.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod ops;
pub mod output;
pub mod path;
pub mod traversal;
pub mod validator;

pub use config::{Config, RootConfig};
pub use error::{Error, Result};
pub use evaluator::execute;
pub use ops::Operation;
pub use path::{Path, Segment};
pub use validator::validate;

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_execute_end_to_end() {
        let input = json!({"u": [{"n": "A"}, {"n": "B"}], "s": {}});
        let config = json!({
            "pipeline": [{"op": "copy", "from": "u[].n", "to": "s.names"}],
            "output": {"names": "$working.s.names"}
        });
        assert_eq!(execute(&input, &config), json!({"names": ["A", "B"]}));
    }

    #[test]
    fn test_validate_accepts_what_execute_runs() {
        let config = json!({"pipeline": [{"op": "drop", "paths": ["x"]}]});
        assert!(validate(&config).is_ok());
    }
}
