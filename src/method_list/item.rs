//! One named, parameterized, invocable method of a method list.

use std::{fmt, sync::Arc};

use log::debug;
use serde_json::Value;

use super::{
    action::{ready, ActionFuture, MethodAction},
    child_list::ListChild,
    params::{bind_params, ParamSpec},
};

pub(crate) const NO_ACTION_LABEL: &str = "No action";

/// Row shown in the method list (name on the left, action on the right).
#[derive(Debug, Clone, PartialEq)]
pub struct MethodItemView {
    pub name: String,
    pub action_label: String,
}

/// Editable state of one method as shown by the property popover.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodPropertyView {
    pub name: String,
    pub params: Vec<ParamSpec>,
    pub action_label: String,
}

/// Test-panel state: the method name and the live value of each parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodTestView {
    pub name: String,
    pub params: Vec<ParamSpec>,
}

pub struct MethodListItem {
    pub(crate) name: String,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) action: Option<Arc<dyn MethodAction>>,
}

impl MethodListItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            action: None,
        }
    }

    pub fn with_params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }

    pub fn with_action(mut self, action: Arc<dyn MethodAction>) -> Self {
        self.action = Some(action);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn action_label(&self) -> String {
        self.action
            .as_ref()
            .map(|action| action.display_name())
            .unwrap_or_else(|| NO_ACTION_LABEL.to_string())
    }

    pub fn test_view(&self) -> MethodTestView {
        MethodTestView {
            name: self.name.clone(),
            params: self.params.clone(),
        }
    }
}

impl ListChild for MethodListItem {
    type View = MethodItemView;
    type PropertyView = MethodPropertyView;

    fn view(&self) -> MethodItemView {
        MethodItemView {
            name: self.name.clone(),
            action_label: self.action_label(),
        }
    }

    fn property_view(&self) -> MethodPropertyView {
        MethodPropertyView {
            name: self.name.clone(),
            params: self.params.clone(),
            action_label: self.action_label(),
        }
    }

    fn params_data(&self) -> Vec<ParamSpec> {
        self.params.clone()
    }

    fn execute(&self, params: Vec<Value>) -> ActionFuture {
        let invocation = match bind_params(&self.params, params) {
            Ok(invocation) => invocation,
            Err(err) => return ready(Err(err)),
        };
        let Some(action) = self.action.clone() else {
            debug!("Method '{}' has no bound action", self.name);
            return ready(Ok(Value::Null));
        };
        Box::pin(async move { action.execute(invocation).await })
    }
}

impl fmt::Debug for MethodListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodListItem")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("action", &self.action_label())
            .finish()
    }
}
