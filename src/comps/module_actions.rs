//! Built-in actions a module method can be bound to.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use log::info;
use serde_json::{Map, Value};

use crate::{
    action_template::render_template,
    method_list::{
        action::{ActionResult, MethodAction},
        params::Invocation,
    },
};

pub(crate) const MAX_MODULE_MESSAGES: usize = 50;

/// Module-owned state that bound actions write to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleState {
    pub temp: Map<String, Value>,
    pub messages: Vec<String>,
}

impl ModuleState {
    pub fn push_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > MAX_MODULE_MESSAGES {
            let overflow = self.messages.len() - MAX_MODULE_MESSAGES;
            self.messages.drain(..overflow);
        }
    }
}

/// Persistable choice of action for one method.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionConfig {
    ShowMessage { template: String },
    SetTempState { key: String },
    Delay { ms: u64 },
}

/// Entries of the action picker; `None` unbinds the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    None,
    ShowMessage,
    SetTempState,
    Delay,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::None,
        ActionKind::ShowMessage,
        ActionKind::SetTempState,
        ActionKind::Delay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "No action",
            Self::ShowMessage => "Show message",
            Self::SetTempState => "Set temporary state",
            Self::Delay => "Delay",
        }
    }

    pub fn to_code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::ShowMessage => 1,
            Self::SetTempState => 2,
            Self::Delay => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::ShowMessage),
            2 => Some(Self::SetTempState),
            3 => Some(Self::Delay),
            _ => None,
        }
    }

    pub fn of(config: Option<&ActionConfig>) -> Self {
        match config {
            None => Self::None,
            Some(ActionConfig::ShowMessage { .. }) => Self::ShowMessage,
            Some(ActionConfig::SetTempState { .. }) => Self::SetTempState,
            Some(ActionConfig::Delay { .. }) => Self::Delay,
        }
    }

    /// Builds a config of this kind from the picker's free-text argument.
    pub fn config_with_argument(self, argument: &str) -> Option<ActionConfig> {
        let argument = argument.trim();
        match self {
            Self::None => None,
            Self::ShowMessage => Some(ActionConfig::ShowMessage {
                template: argument.to_string(),
            }),
            Self::SetTempState => Some(ActionConfig::SetTempState {
                key: if argument.is_empty() {
                    "value".to_string()
                } else {
                    argument.to_string()
                },
            }),
            Self::Delay => Some(ActionConfig::Delay {
                ms: argument.parse().unwrap_or(0),
            }),
        }
    }
}

impl ActionConfig {
    /// Free-text argument shown next to the action picker.
    pub fn argument(&self) -> String {
        match self {
            Self::ShowMessage { template } => template.clone(),
            Self::SetTempState { key } => key.clone(),
            Self::Delay { ms } => ms.to_string(),
        }
    }
}

/// Binds `config` to the state of one module.
pub fn build_action(config: &ActionConfig, state: &Arc<Mutex<ModuleState>>) -> Arc<dyn MethodAction> {
    match config {
        ActionConfig::ShowMessage { template } => Arc::new(ShowMessageAction {
            template: template.clone(),
            state: state.clone(),
        }),
        ActionConfig::SetTempState { key } => Arc::new(SetTempStateAction {
            key: key.clone(),
            state: state.clone(),
        }),
        ActionConfig::Delay { ms } => Arc::new(DelayAction {
            duration: Duration::from_millis(*ms),
        }),
    }
}

struct ShowMessageAction {
    template: String,
    state: Arc<Mutex<ModuleState>>,
}

#[async_trait]
impl MethodAction for ShowMessageAction {
    fn display_name(&self) -> String {
        format!("Show message: {}", self.template)
    }

    async fn execute(&self, invocation: Invocation) -> ActionResult {
        let message = render_template(&self.template, &invocation);
        info!("Module message: {}", message);
        self.state
            .lock()
            .expect("module state lock poisoned")
            .push_message(message.clone());
        Ok(Value::String(message))
    }
}

struct SetTempStateAction {
    key: String,
    state: Arc<Mutex<ModuleState>>,
}

#[async_trait]
impl MethodAction for SetTempStateAction {
    fn display_name(&self) -> String {
        format!("Set temporary state: {}", self.key)
    }

    async fn execute(&self, invocation: Invocation) -> ActionResult {
        let value = invocation.args.first().cloned().unwrap_or(Value::Null);
        self.state
            .lock()
            .expect("module state lock poisoned")
            .temp
            .insert(self.key.clone(), value.clone());
        Ok(value)
    }
}

struct DelayAction {
    duration: Duration,
}

#[async_trait]
impl MethodAction for DelayAction {
    fn display_name(&self) -> String {
        format!("Delay {} ms", self.duration.as_millis())
    }

    async fn execute(&self, _invocation: Invocation) -> ActionResult {
        tokio::time::sleep(self.duration).await;
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::{build_action, ActionConfig, ActionKind, ModuleState, MAX_MODULE_MESSAGES};
    use crate::method_list::params::{bind_params, ParamSpec};

    #[test]
    fn test_action_kind_codes_round_trip_through_picker() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_code(kind.to_code()), Some(kind));
        }
        assert_eq!(ActionKind::from_code(9), None);
    }

    #[test]
    fn test_picker_argument_builds_matching_config() {
        assert_eq!(ActionKind::None.config_with_argument("x"), None);
        assert_eq!(
            ActionKind::SetTempState.config_with_argument(" "),
            Some(ActionConfig::SetTempState {
                key: "value".to_string()
            })
        );
        assert_eq!(
            ActionKind::Delay.config_with_argument("250"),
            Some(ActionConfig::Delay { ms: 250 })
        );
        let config = ActionKind::ShowMessage
            .config_with_argument("hi {0}")
            .expect("show message config");
        assert_eq!(ActionKind::of(Some(&config)), ActionKind::ShowMessage);
        assert_eq!(config.argument(), "hi {0}");
    }

    #[test]
    fn test_action_config_toml_uses_type_tag() {
        let config: ActionConfig =
            toml::from_str("type = \"set_temp_state\"\nkey = \"selected\"").expect("valid toml");
        assert_eq!(
            config,
            ActionConfig::SetTempState {
                key: "selected".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_show_message_renders_params_into_module_messages() {
        let state = Arc::new(Mutex::new(ModuleState::default()));
        let action = build_action(
            &ActionConfig::ShowMessage {
                template: "Hello {name}".to_string(),
            },
            &state,
        );
        let invocation =
            bind_params(&[ParamSpec::new("name")], vec![json!("ada")]).expect("binding succeeds");

        assert_eq!(action.execute(invocation).await, Ok(json!("Hello ada")));
        assert_eq!(
            state.lock().expect("module state lock poisoned").messages,
            vec!["Hello ada"]
        );
        assert_eq!(action.display_name(), "Show message: Hello {name}");
    }

    #[tokio::test]
    async fn test_set_temp_state_stores_first_argument() {
        let state = Arc::new(Mutex::new(ModuleState::default()));
        let action = build_action(
            &ActionConfig::SetTempState {
                key: "selected".to_string(),
            },
            &state,
        );
        let invocation = bind_params(&[], vec![json!({ "id": 4 })]).expect("binding succeeds");

        action.execute(invocation).await.expect("action succeeds");
        assert_eq!(
            state.lock().expect("module state lock poisoned").temp.get("selected"),
            Some(&json!({ "id": 4 }))
        );
    }

    #[tokio::test]
    async fn test_delay_resolves_to_null() {
        let action = build_action(
            &ActionConfig::Delay { ms: 1 },
            &Arc::new(Mutex::new(ModuleState::default())),
        );
        let invocation = bind_params(&[], Vec::new()).expect("binding succeeds");
        assert_eq!(action.execute(invocation).await, Ok(json!(null)));
    }

    #[test]
    fn test_module_messages_are_capped() {
        let mut state = ModuleState::default();
        for index in 0..(MAX_MODULE_MESSAGES + 5) {
            state.push_message(format!("m{index}"));
        }
        assert_eq!(state.messages.len(), MAX_MODULE_MESSAGES);
        assert_eq!(state.messages[0], "m5");
    }
}
