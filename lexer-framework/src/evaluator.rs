//! Per-kind value post-processing.
//!
//! When a token of kind `k` is emitted, its buffered text is wrapped in
//! [`Value::Str`] and passed through every evaluator registered for `k`, in
//! registration order. Kinds without evaluators keep the plain text.

use crate::token::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The value could not be converted to the expected type.
    #[error("cannot read {input:?} as {expected}")]
    Invalid {
        input: String,
        expected: &'static str,
    },

    #[error("{0}")]
    Custom(String),
}

pub type Evaluator = Arc<dyn Fn(Value) -> Result<Value, EvalError> + Send + Sync>;

/// Evaluator chains keyed by token kind.
#[derive(Clone, Default)]
pub struct Evaluators {
    chains: HashMap<String, Vec<Evaluator>>,
}

impl Evaluators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `evaluator` to the chain of `kind`.
    pub fn add<F>(&mut self, kind: impl Into<String>, evaluator: F)
    where
        F: Fn(Value) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.chains
            .entry(kind.into())
            .or_default()
            .push(Arc::new(evaluator));
    }

    pub fn has(&self, kind: &str) -> bool {
        self.chains.contains_key(kind)
    }

    pub fn evaluate(&self, kind: &str, text: String) -> Result<Value, EvalError> {
        match self.chains.get(kind) {
            Some(chain) => chain
                .iter()
                .try_fold(Value::Str(text), |value, evaluator| evaluator(value)),
            None => Ok(Value::Str(text)),
        }
    }
}

impl fmt::Debug for Evaluators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self
            .chains
            .iter()
            .map(|(kind, chain)| (kind.as_str(), chain.len()))
            .collect();
        kinds.sort_unstable();
        f.debug_struct("Evaluators").field("chains", &kinds).finish()
    }
}

/// Parses decimal text into [`Value::Int`].
pub fn integer(value: Value) -> Result<Value, EvalError> {
    match value {
        Value::Str(s) => s.parse().map(Value::Int).map_err(|_| EvalError::Invalid {
            input: s,
            expected: "integer",
        }),
        Value::Int(_) => Ok(value),
        other => Err(EvalError::Invalid {
            input: other.to_string(),
            expected: "integer",
        }),
    }
}

/// Parses text into [`Value::Float`].
pub fn float(value: Value) -> Result<Value, EvalError> {
    match value {
        Value::Str(s) => s.parse().map(Value::Float).map_err(|_| EvalError::Invalid {
            input: s,
            expected: "float",
        }),
        Value::Int(n) => Ok(Value::Float(n as f64)),
        Value::Float(_) => Ok(value),
        other => Err(EvalError::Invalid {
            input: other.to_string(),
            expected: "float",
        }),
    }
}

/// Parses `true`/`false` into [`Value::Bool`].
pub fn boolean(value: Value) -> Result<Value, EvalError> {
    match value {
        Value::Bool(_) => Ok(value),
        Value::Str(ref s) if s == "true" => Ok(Value::Bool(true)),
        Value::Str(ref s) if s == "false" => Ok(Value::Bool(false)),
        other => Err(EvalError::Invalid {
            input: other.to_string(),
            expected: "boolean",
        }),
    }
}

/// Strips leading and trailing whitespace from text values.
pub fn trim(value: Value) -> Result<Value, EvalError> {
    Ok(match value {
        Value::Str(s) => Value::Str(s.trim().to_string()),
        other => other,
    })
}
