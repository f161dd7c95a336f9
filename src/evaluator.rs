//! The pipeline evaluator: root resolution, sequential operation reduction,
//! output assembly (spec.md §4.4). `execute` is the crate's single entry
//! point and is a total, pure function of its two arguments.

use serde_json::{Map, Value};

use crate::config::Config;
use crate::ops;
use crate::output::resolve_output;
use crate::path::Path;
use crate::traversal::get;

/// Resolves `config.root`, folds `config.pipeline` over `working`, and
/// resolves `config.output` against `(root, working)`. `root` is always the
/// unmodified `input`; a pipeline step that fails to parse is identity.
pub fn execute(input: &Value, config: &Value) -> Value {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("execute").entered();

    let parsed = Config::from_value(config).unwrap_or_default();
    let root = input.clone();
    let mut working = resolve_root(input, parsed.root.as_ref());

    for (index, raw_step) in parsed.pipeline.iter().enumerate() {
        working = match ops::parse_step(raw_step) {
            Some(op) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(step = index, "applying operation");
                ops::apply(working, &op)
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(step = index, "unparseable operation, leaving working unchanged");
                working
            }
        };
    }

    resolve_output(&root, &working, parsed.output.as_ref())
}

fn resolve_root(input: &Value, root_config: Option<&crate::config::RootConfig>) -> Value {
    let Some(cfg) = root_config else {
        return input.clone();
    };
    let resolved = get(input, &Path::parse(&cfg.path));
    if resolved.is_null() {
        match cfg.on_null.as_deref() {
            Some("return_original") => input.clone(),
            _ => Value::Object(Map::new()),
        }
    } else {
        resolved
    }
}
