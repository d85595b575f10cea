//! Errors of the command-line shell. The core (`inference`, `registry`,
//! `codegen`, `generator`) is total and has none.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("`{}` is not valid JSON (line {line}, column {column}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        source: serde_json::Error,
    },
    #[error("invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("glob pattern matched no files: {0}")]
    NoMatch(String),
    #[error(transparent)]
    GlobEntry(#[from] glob::GlobError),
    #[error("JSON pointer `{pointer}` selects nothing in `{}`", .path.display())]
    PointerMiss {
        pointer: String,
        path: PathBuf,
    },
    #[error("jq expression failed on `{}`: {source}", .path.display())]
    Jq {
        path: PathBuf,
        source: crate::jq_exec::JqError,
    },
}

impl InputError {
    pub(crate) fn parse(path: PathBuf, source: serde_json::Error) -> Self {
        InputError::Parse { path, line: source.line(), column: source.column(), source }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to write `{}`: {source}", .path.display())]
pub struct OutputError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_file_and_position() {
        let source = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let error = InputError::parse(PathBuf::from("data.json"), source);
        let message = error.to_string();
        assert!(message.starts_with("`data.json` is not valid JSON (line 2, column"));
    }
}
