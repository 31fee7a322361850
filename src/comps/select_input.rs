//! Select input with required / custom-rule validation.

use serde_json::{json, Value};

use super::{CompAction, ExposedComponent};
use crate::method_list::action::{ready, ActionError, ActionFuture};

pub(crate) const REQUIRED_HELP: &str = "Required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidateStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidateResult {
    pub status: ValidateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl ValidateResult {
    fn success() -> Self {
        Self {
            status: ValidateStatus::Success,
            help: None,
        }
    }

    fn error(help: impl Into<String>) -> Self {
        Self {
            status: ValidateStatus::Error,
            help: Some(help.into()),
        }
    }
}

/// A custom rule message always wins; otherwise a required select must hold
/// a non-empty value.
pub fn select_input_validate(value: &Value, required: bool, custom_rule: &str) -> ValidateResult {
    if !custom_rule.is_empty() {
        return ValidateResult::error(custom_rule);
    }
    if required && is_empty_value(value) {
        return ValidateResult::error(REQUIRED_HELP);
    }
    ValidateResult::success()
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[derive(Debug, Clone)]
pub struct SelectInputComp {
    options: Vec<String>,
    value: Value,
    required: bool,
    custom_rule: String,
    /// Shown status; only refreshed when the value changes.
    validate_state: Option<ValidateResult>,
}

impl SelectInputComp {
    pub fn new(options: Vec<String>, required: bool, custom_rule: String) -> Self {
        Self {
            options,
            value: Value::String(String::new()),
            required,
            custom_rule,
            validate_state: None,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn custom_rule(&self) -> &str {
        &self.custom_rule
    }

    pub fn validate_state(&self) -> Option<&ValidateResult> {
        self.validate_state.as_ref()
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn set_custom_rule(&mut self, custom_rule: &str) {
        self.custom_rule = custom_rule.trim().to_string();
    }

    /// Applies a user or method change and refreshes the shown status.
    pub fn handle_change(&mut self, value: Value) {
        self.validate_state = Some(select_input_validate(
            &value,
            self.required,
            &self.custom_rule,
        ));
        self.value = value;
    }

    /// Always recomputed from the current value and rules.
    pub fn invalid(&self) -> bool {
        select_input_validate(&self.value, self.required, &self.custom_rule).status
            != ValidateStatus::Success
    }
}

impl ExposedComponent for SelectInputComp {
    fn display_name(&self) -> String {
        "Select input".to_string()
    }

    fn exposing_methods(&self) -> Vec<String> {
        vec!["setValue".to_string(), "clearValue".to_string()]
    }

    fn exposing_values(&self) -> Value {
        json!({
            "value": self.value(),
            "options": self.options,
            "required": self.required,
            "invalid": self.invalid(),
            "validateState": self.validate_state(),
        })
    }

    fn preview_text(&self) -> String {
        let shown = match self.value() {
            Value::String(text) if text.is_empty() => "(empty)".to_string(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        let mut preview = format!("[ {} v ]  options: {}", shown, self.options.join(", "));
        if let Some(ValidateResult {
            help: Some(help), ..
        }) = self.validate_state()
        {
            preview.push('\n');
            preview.push_str(help);
        }
        preview
    }

    fn dispatch(&mut self, action: CompAction) -> Option<ActionFuture> {
        match action {
            CompAction::Execute {
                method_name,
                params,
            } => match method_name.as_str() {
                "setValue" => {
                    let Some(value) = params.into_iter().next() else {
                        return Some(ready(Err(ActionError::MissingParam {
                            key: "value".to_string(),
                        })));
                    };
                    self.handle_change(value.clone());
                    Some(ready(Ok(value)))
                }
                "clearValue" => {
                    self.handle_change(Value::String(String::new()));
                    Some(ready(Ok(Value::Null)))
                }
                _ => None,
            },
        }
    }
}
