//! Hyperparameter coercion.
//!
//! Pass-through arguments arrive as `--name value` pairs of strings. Each value
//! is converted to the most specific type it looks like: `None`, a boolean, an
//! integer, a float, or else a string.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, TrainError};

/// Names the spaCy launcher sets itself.
pub const SPACY_LOCKED: &[&str] = &["lang", "pipeline", "output_path", "train_path", "dev_path"];

/// Raw flags the transformers launcher sets itself.
pub const TRANSFORMERS_LOCKED: &[&str] = &[
    "--do_train",
    "--do-eval",
    "--evaluate_during_train",
    "--data_dir",
    "--output_dir",
    "--label",
];

/// A coerced hyperparameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HyperValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for HyperValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HyperValue::None => f.write_str("None"),
            HyperValue::Bool(true) => f.write_str("True"),
            HyperValue::Bool(false) => f.write_str("False"),
            HyperValue::Int(v) => write!(f, "{v}"),
            HyperValue::Float(v) => write!(f, "{v}"),
            HyperValue::Str(v) => f.write_str(v),
        }
    }
}

type Parser = fn(&str) -> Option<HyperValue>;

// Most specific first.
const PARSERS: &[Parser] = &[parse_none, parse_bool, parse_int, parse_float];

fn parse_none(s: &str) -> Option<HyperValue> {
    (s == "None").then_some(HyperValue::None)
}

fn parse_bool(s: &str) -> Option<HyperValue> {
    match s {
        "True" => Some(HyperValue::Bool(true)),
        "False" => Some(HyperValue::Bool(false)),
        _ => None,
    }
}

fn looks_fractional(s: &str) -> bool {
    s.contains('.') || s.contains(['e', 'E'])
}

fn parse_int(s: &str) -> Option<HyperValue> {
    if looks_fractional(s) {
        return None;
    }
    s.trim().parse().ok().map(HyperValue::Int)
}

fn parse_float(s: &str) -> Option<HyperValue> {
    if !looks_fractional(s) {
        return None;
    }
    s.trim().parse().ok().map(HyperValue::Float)
}

/// Coerce one value.
///
/// ```
/// use gtner_trainer::hyperparams::{HyperValue, coerce};
///
/// assert_eq!(coerce("10"), HyperValue::Int(10));
/// assert_eq!(coerce("0.01"), HyperValue::Float(0.01));
/// assert_eq!(coerce("True"), HyperValue::Bool(true));
/// assert_eq!(coerce("foo"), HyperValue::Str("foo".into()));
/// ```
pub fn coerce(value: &str) -> HyperValue {
    PARSERS
        .iter()
        .find_map(|parse| parse(value))
        .unwrap_or_else(|| HyperValue::Str(value.to_string()))
}

/// Hyperparameters in the order they were first given.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Hyperparameters(Vec<(String, HyperValue)>);

impl Hyperparameters {
    pub fn get(&self, name: &str) -> Option<&HyperValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    /// A repeated name keeps its first position and its last value.
    fn insert(&mut self, name: String, value: HyperValue) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Render back as command-line flags: `--name value`, a bare `--name` for
    /// `True`, nothing for `False` and `None`. Underscores in names become
    /// hyphens, so `n_iter` is passed as `--n-iter`.
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::with_capacity(self.0.len() * 2);
        for (name, value) in &self.0 {
            let name = name.replace('_', "-");
            match value {
                HyperValue::None | HyperValue::Bool(false) => {}
                HyperValue::Bool(true) => flags.push(format!("--{name}")),
                value => {
                    flags.push(format!("--{name}"));
                    flags.push(value.to_string());
                }
            }
        }
        flags
    }

    /// Fail if any name is locked. `-` and `_` are interchangeable, so
    /// `output-path` matches a locked `output_path`.
    pub fn check_locked(&self, locked: &[&str]) -> Result<()> {
        let keys: Vec<String> = locked.iter().map(|n| option_key(n)).collect();
        let violations = self
            .names()
            .filter(|name| keys.contains(&option_key(name)))
            .map(str::to_string)
            .collect();
        locked_error(violations, locked)
    }
}

/// Parse alternating `--name value` tokens. The first two characters of each
/// name are dropped; a trailing name without a value is ignored.
pub fn parse_hyperparameters<S: AsRef<str>>(tokens: &[S]) -> Hyperparameters {
    let mut params = Hyperparameters::default();
    for pair in tokens.chunks_exact(2) {
        let name = pair[0].as_ref();
        let name = name.get(2..).unwrap_or_default();
        params.insert(name.to_string(), coerce(pair[1].as_ref()));
    }
    params
}

fn option_key(name: &str) -> String {
    name.replace('-', "_")
}

/// Fail with every name from `names` that appears in `locked`.
pub fn check_locked<'a, I>(names: I, locked: &[&str]) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let violations = names
        .into_iter()
        .filter(|name| locked.contains(name))
        .map(str::to_string)
        .collect();
    locked_error(violations, locked)
}

fn locked_error(mut violations: Vec<String>, locked: &[&str]) -> Result<()> {
    if violations.is_empty() {
        return Ok(());
    }
    violations.sort();
    violations.dedup();
    Err(TrainError::LockedArguments {
        violations,
        locked: locked.iter().map(|s| s.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion() {
        let params = parse_hyperparameters(&["--epochs", "10", "--lr", "0.01", "--debug", "True", "--note", "foo"]);
        assert_eq!(params.get("epochs"), Some(&HyperValue::Int(10)));
        assert_eq!(params.get("lr"), Some(&HyperValue::Float(0.01)));
        assert_eq!(params.get("debug"), Some(&HyperValue::Bool(true)));
        assert_eq!(params.get("note"), Some(&HyperValue::Str("foo".into())));
    }

    #[test]
    fn test_coercion_edge_cases() {
        assert_eq!(coerce("None"), HyperValue::None);
        assert_eq!(coerce("False"), HyperValue::Bool(false));
        assert_eq!(coerce("true"), HyperValue::Str("true".into()));
        assert_eq!(coerce("1e-3"), HyperValue::Float(0.001));
        assert_eq!(coerce("-4"), HyperValue::Int(-4));
        assert_eq!(coerce("3."), HyperValue::Float(3.0));
        assert_eq!(coerce("inf"), HyperValue::Str("inf".into()));
        assert_eq!(coerce("1.2.3"), HyperValue::Str("1.2.3".into()));
        assert_eq!(coerce(""), HyperValue::Str(String::new()));
    }

    #[test]
    fn test_dangling_name_is_ignored() {
        let params = parse_hyperparameters(&["--n_iter", "5", "--dropout"]);
        assert_eq!(params.len(), 1);
        assert!(params.get("dropout").is_none());
    }

    #[test]
    fn test_repeated_name_keeps_last_value() {
        let params = parse_hyperparameters(&["--a", "1", "--b", "2", "--a", "3"]);
        let names: Vec<_> = params.names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(params.get("a"), Some(&HyperValue::Int(3)));
    }

    #[test]
    fn test_to_flags() {
        let params = parse_hyperparameters(&[
            "--n-iter", "20", "--dropout", "0.2", "--gpu-id", "None", "--verbose", "True", "--no-tagger", "False", "--base-model", "en",
        ]);
        assert_eq!(
            params.to_flags(),
            ["--n-iter", "20", "--dropout", "0.2", "--verbose", "--base-model", "en"]
        );
    }

    #[test]
    fn test_to_flags_hyphenates_names() {
        let params = parse_hyperparameters(&["--n_iter", "10", "--use_gpu", "0"]);
        assert_eq!(params.to_flags(), ["--n-iter", "10", "--use-gpu", "0"]);
    }

    #[test]
    fn test_locked_names_ignore_separator() {
        let params = parse_hyperparameters(&["--output-path", "/tmp/x", "--train_path", "t", "--n-iter", "3"]);
        match params.check_locked(SPACY_LOCKED).unwrap_err() {
            TrainError::LockedArguments { violations, .. } => {
                assert_eq!(violations, ["output-path", "train_path"])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_locked_names() {
        let params = parse_hyperparameters(&["--lang", "de", "--n_iter", "3"]);
        let err = params.check_locked(SPACY_LOCKED).unwrap_err();
        match err {
            TrainError::LockedArguments { violations, .. } => assert_eq!(violations, ["lang"]),
            other => panic!("unexpected error: {other}"),
        }

        let ok = parse_hyperparameters(&["--n_iter", "3"]);
        assert!(ok.check_locked(SPACY_LOCKED).is_ok());
    }

    #[test]
    fn test_serialize() {
        let params = parse_hyperparameters(&["--n_iter", "3", "--dropout", "0.5", "--gpu", "None"]);
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"[["n_iter",3],["dropout",0.5],["gpu",null]]"#
        );
    }
}
