//! Components that can be mounted in the playground.

pub mod module_actions;
pub mod module_comp;
pub mod select_input;

use serde_json::Value;

use crate::method_list::action::ActionFuture;

/// Request sent from the playground to a mounted component.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompAction {
    Execute {
        #[serde(rename = "methodName")]
        method_name: String,
        params: Vec<Value>,
    },
}

/// What a component exposes to the playground.
pub trait ExposedComponent: Send {
    fn display_name(&self) -> String;

    /// Invocable method names, without duplicates, in display order.
    fn exposing_methods(&self) -> Vec<String>;

    fn exposing_values(&self) -> Value;

    /// Short text rendering of the component for the preview pane.
    fn preview_text(&self) -> String;

    /// Applies `action`. Work that outlives the call is returned as a future;
    /// `None` means nothing is left to run.
    fn dispatch(&mut self, action: CompAction) -> Option<ActionFuture>;
}

/// Removes repeated names, keeping the first occurrence of each.
pub(crate) fn distinct_names(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{distinct_names, CompAction};

    #[test]
    fn test_execute_action_serializes_as_tagged_request() {
        let action = CompAction::Execute {
            method_name: "setValue".to_string(),
            params: vec![json!(1)],
        };
        assert_eq!(
            serde_json::to_value(&action).expect("action serializes"),
            json!({ "type": "execute", "methodName": "setValue", "params": [1] })
        );
    }

    #[test]
    fn test_distinct_names_keeps_first_occurrence_order() {
        let names = vec!["b", "a", "b", "c", "a"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(distinct_names(names), vec!["b", "a", "c"]);
    }
}
