//! jq pre-filter over an input document, backed by jaq.
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct JqError(pub String);

/// Run `filter_src` over `input`; every output of the filter becomes one
/// document.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>, JqError> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    for item in outputs {
        let val = item.map_err(|e| JqError(format!("{e:?}")))?;
        // Val displays as JSON text
        let text = val.to_string();
        let value = serde_json::from_str(&text)
            .map_err(|e| JqError(format!("filter produced non-JSON output `{text}`: {e}")))?;
        out.push(value);
    }
    tracing::debug!(filter = filter_src, outputs = out.len(), "jq filter applied");
    Ok(out)
}

fn format_parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> JqError {
    let lines = errs.into_iter()
        .map(|(file, err)| format!("parse error: {err:?} in `{}`", file.code))
        .collect::<Vec<_>>();
    JqError(lines.join("\n"))
}

fn format_undefined_errors(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> JqError {
    let lines = errs.into_iter()
        .flat_map(|(file, list)| {
            list.into_iter()
                .map(move |(name, undef)| format!("undefined `{name}`: {undef:?} in `{}`", file.code))
        })
        .collect::<Vec<_>>();
    JqError(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selects_and_iterates() {
        let input = json!({"data": {"users": [{"id": 1}, {"id": 2}]}});
        let out = run_jaq(".data.users[]", &input).unwrap();
        assert_eq!(out, vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn bad_filter_is_an_error() {
        assert!(run_jaq(".[", &json!({})).is_err());
        assert!(run_jaq("no_such_function", &json!({})).is_err());
    }
}
