//! `{{ env.VAR }}` placeholder expansion over raw configuration text
//!
//! Expansion runs before TOML parsing so config structs can hold plain
//! strings. `{{ env.VAR | default("x") }}` supplies a fallback for unset
//! variables. Comment lines are copied through untouched.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpandError {
    #[error("environment variable not found: `{0}`")]
    MissingVar(String),
    #[error("unsupported placeholder `{0}`, only `env.` variables are available")]
    UnsupportedScope(String),
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#).expect("must be valid regex")
    })
}

pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    let mut output = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut last_end = 0;
        for captures in placeholder().captures_iter(line) {
            let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            output.push_str(&line[last_end..whole.start()]);
            output.push_str(&resolve(key.as_str(), captures.get(2).map(|m| m.as_str()))?);
            last_end = whole.end();
        }
        output.push_str(&line[last_end..]);
    }

    Ok(output)
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, ExpandError> {
    let var = key
        .strip_prefix("env.")
        .filter(|name| !name.is_empty() && !name.contains('.'))
        .ok_or_else(|| ExpandError::UnsupportedScope(key.to_owned()))?;

    match std::env::var(var) {
        Ok(value) => Ok(value),
        Err(_) => default
            .map(str::to_owned)
            .ok_or_else(|| ExpandError::MissingVar(var.to_owned())),
    }
}
