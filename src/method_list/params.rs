//! Method parameter schema, live test values, and argument binding.

use serde_json::{Map, Value};

use super::action::ActionError;

/// One declared parameter of a method.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ParamSpec {
    pub key: String,
    #[serde(default)]
    pub required: bool,
    /// Raw text typed into the test view; not persisted.
    #[serde(skip)]
    pub test_value: String,
}

impl ParamSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            required: false,
            test_value: String::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Arguments handed to a bound action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// Positional arguments exactly as supplied by the caller.
    pub args: Vec<Value>,
    /// Arguments keyed by the declared parameter at the same position.
    pub named: Map<String, Value>,
}

impl Invocation {
    /// Looks up `key` as a declared parameter name, then as a positional index.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.named.get(key) {
            return Some(value);
        }
        key.parse::<usize>()
            .ok()
            .and_then(|index| self.args.get(index))
    }
}

/// Binds positional `args` onto `schema` keys in declaration order.
///
/// Extra arguments stay available positionally. A required parameter that is
/// absent or `null` fails the binding.
pub fn bind_params(schema: &[ParamSpec], args: Vec<Value>) -> Result<Invocation, ActionError> {
    let mut named = Map::new();
    for (index, param) in schema.iter().enumerate() {
        let value = args.get(index).cloned().unwrap_or(Value::Null);
        if param.required && value.is_null() {
            return Err(ActionError::MissingParam {
                key: param.key.clone(),
            });
        }
        if param.key.is_empty() {
            continue;
        }
        named.insert(param.key.clone(), value);
    }
    Ok(Invocation { args, named })
}

/// Interprets test-view text: empty is `null`, valid JSON is itself, anything else a string.
pub fn parse_test_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Collects the live test values of `schema` as positional arguments.
pub fn test_params(schema: &[ParamSpec]) -> Vec<Value> {
    schema
        .iter()
        .map(|param| parse_test_value(&param.test_value))
        .collect()
}
