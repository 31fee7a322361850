//! Manual test console for a mounted component.
//!
//! The playground keeps a live handle on the component, so every snapshot it
//! produces reflects the component's state at the time of the call. Method
//! parameters are typed as JSON; triggering a method dispatches an `execute`
//! request and hands any resulting work to a spawner without waiting on it.

use std::sync::{Arc, Mutex};

use log::debug;
use serde_json::Value;

use crate::{
    comps::{CompAction, ExposedComponent},
    execution::TaskSpawner,
};

/// Array input is used as-is, any other JSON value becomes a one-element
/// list, and unparsable input yields no parameters.
pub fn parse_method_params(text: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(values)) => values,
        Ok(value) => vec![value],
        Err(_) => Vec::new(),
    }
}

pub struct Playground<C: ?Sized> {
    subject: Arc<Mutex<C>>,
    params: Vec<Value>,
}

impl<C: ExposedComponent + ?Sized> Playground<C> {
    pub fn new(subject: Arc<Mutex<C>>) -> Self {
        Self {
            subject,
            params: Vec::new(),
        }
    }

    /// Re-parses the params input; previous input has no influence.
    pub fn set_params_text(&mut self, text: &str) {
        self.params = parse_method_params(text);
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn title(&self) -> String {
        self.lock_subject().display_name()
    }

    pub fn method_names(&self) -> Vec<String> {
        self.lock_subject().exposing_methods()
    }

    pub fn data_snapshot(&self) -> Value {
        self.lock_subject().exposing_values()
    }

    pub fn preview_text(&self) -> String {
        self.lock_subject().preview_text()
    }

    /// Dispatches `execute` for `method_name` with the current params.
    /// Returns whether any work was handed to `spawner`.
    pub fn trigger(&self, method_name: &str, spawner: &dyn TaskSpawner) -> bool {
        let action = CompAction::Execute {
            method_name: method_name.to_string(),
            params: self.params.clone(),
        };
        debug!(
            "Playground dispatch: {}",
            serde_json::to_string(&action).unwrap_or_default()
        );
        let pending = self.lock_subject().dispatch(action);
        match pending {
            Some(task) => {
                spawner.spawn_detached(method_name, task);
                true
            }
            None => false,
        }
    }

    fn lock_subject(&self) -> std::sync::MutexGuard<'_, C> {
        self.subject.lock().expect("playground subject lock poisoned")
    }
}
