//! Module container component: a method list plus the state its actions write.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use super::{
    distinct_names,
    module_actions::{build_action, ActionConfig, ActionKind, ModuleState},
    CompAction, ExposedComponent,
};
use crate::{
    config::ModuleMethodConfig,
    method_list::{
        action::ActionFuture, child_list::ListError, item::MethodListItem, MethodList,
    },
};

/// Property-panel row for one method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRowData {
    pub name: String,
    pub action_label: String,
    pub action_kind: ActionKind,
    pub action_argument: String,
    pub param_count: usize,
}

#[derive(Debug, Default)]
pub struct ModuleComp {
    methods: MethodList,
    /// Parallel to `methods`: the config each method's action was built from.
    action_configs: Vec<Option<ActionConfig>>,
    state: Arc<Mutex<ModuleState>>,
}

impl ModuleComp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: &[ModuleMethodConfig]) -> Self {
        let mut module = Self::new();
        for method in seed {
            let mut item = MethodListItem::new(method.name.clone()).with_params(method.params.clone());
            if let Some(config) = &method.action {
                item = item.with_action(build_action(config, &module.state));
            }
            module.methods.add_item(item);
            module.action_configs.push(method.action.clone());
        }
        module
    }

    pub fn methods(&self) -> &MethodList {
        &self.methods
    }

    pub fn state(&self) -> Arc<Mutex<ModuleState>> {
        self.state.clone()
    }

    pub fn add_method(&mut self) -> String {
        self.action_configs.push(None);
        self.methods.add()
    }

    pub fn delete_method(&mut self, index: usize) -> Result<(), ListError> {
        self.methods.delete(index)?;
        self.action_configs.remove(index);
        Ok(())
    }

    pub fn rename_method(&mut self, index: usize, name: &str) -> Result<(), ListError> {
        self.methods.rename(index, name)
    }

    pub fn set_method_action(
        &mut self,
        index: usize,
        config: Option<ActionConfig>,
    ) -> Result<(), ListError> {
        let action = config
            .as_ref()
            .map(|config| build_action(config, &self.state));
        self.methods.set_action(index, action)?;
        self.action_configs[index] = config;
        Ok(())
    }

    pub fn action_config(&self, index: usize) -> Option<&ActionConfig> {
        self.action_configs.get(index).and_then(Option::as_ref)
    }

    pub fn add_param(&mut self, index: usize) -> Result<String, ListError> {
        self.methods.add_param(index)
    }

    pub fn delete_param(&mut self, index: usize, param_index: usize) -> Result<(), ListError> {
        self.methods.delete_param(index, param_index).map(|_| ())
    }

    pub fn rename_param(
        &mut self,
        index: usize,
        param_index: usize,
        key: &str,
    ) -> Result<(), ListError> {
        self.methods.rename_param(index, param_index, key)
    }

    pub fn set_param_required(
        &mut self,
        index: usize,
        param_index: usize,
        required: bool,
    ) -> Result<(), ListError> {
        self.methods.set_param_required(index, param_index, required)
    }

    pub fn set_param_test_value(
        &mut self,
        index: usize,
        param_index: usize,
        raw: &str,
    ) -> Result<(), ListError> {
        self.methods.set_param_test_value(index, param_index, raw)
    }

    pub fn test_method(&self, index: usize) -> Result<Option<ActionFuture>, ListError> {
        self.methods.test_execute(index)
    }

    pub fn method_rows(&self) -> Vec<MethodRowData> {
        self.methods
            .property_views()
            .into_iter()
            .enumerate()
            .map(|(index, view)| {
                let config = self.action_config(index);
                MethodRowData {
                    name: view.name,
                    action_label: view.action_label,
                    action_kind: ActionKind::of(config),
                    action_argument: config.map(ActionConfig::argument).unwrap_or_default(),
                    param_count: view.params.len(),
                }
            })
            .collect()
    }
}

impl ExposedComponent for ModuleComp {
    fn display_name(&self) -> String {
        "Module".to_string()
    }

    fn exposing_methods(&self) -> Vec<String> {
        distinct_names(self.methods.names())
    }

    fn exposing_values(&self) -> Value {
        let state = self.state.lock().expect("module state lock poisoned");
        json!({
            "methods": self.methods.names(),
            "temp": state.temp,
            "messages": state.messages,
        })
    }

    fn preview_text(&self) -> String {
        if self.methods.is_empty() {
            return "Module has no methods.".to_string();
        }
        let mut lines = vec![format!("Module with {} methods", self.methods.len())];
        for view in self.methods.views() {
            lines.push(format!("  {} -> {}", view.name, view.action_label));
        }
        lines.join("\n")
    }

    fn dispatch(&mut self, action: CompAction) -> Option<ActionFuture> {
        match action {
            CompAction::Execute {
                method_name,
                params,
            } => self.methods.execute_by_name(&method_name, params),
        }
    }
}
