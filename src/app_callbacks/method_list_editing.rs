use log::{debug, warn};

use crate::{
    app_context::AppSharedState,
    comps::{module_actions::ActionKind, module_comp::ModuleComp},
    execution::TaskSpawner,
    method_list::child_list::ListError,
    protocol::{Message, PlaygroundMessage},
    AppWindow,
};

fn notify_subject_changed(shared_state: &AppSharedState) {
    let _ = shared_state
        .bus_sender
        .send(Message::Playground(PlaygroundMessage::SubjectChanged));
}

/// Runs `edit` against the module and announces the change when it succeeds.
fn edit_module<T>(
    shared_state: &AppSharedState,
    what: &str,
    edit: impl FnOnce(&mut ModuleComp) -> Result<T, ListError>,
) -> Option<T> {
    let result = {
        let mut module = shared_state
            .components
            .module
            .lock()
            .expect("module lock poisoned");
        edit(&mut module)
    };
    match result {
        Ok(value) => {
            notify_subject_changed(shared_state);
            Some(value)
        }
        Err(err) => {
            warn!("{} failed: {}", what, err);
            None
        }
    }
}

/// Selection after deleting `deleted`; later methods shift down by one.
fn selection_after_delete(selected: Option<usize>, deleted: usize) -> Option<usize> {
    match selected {
        Some(index) if index == deleted => None,
        Some(index) if index > deleted => Some(index - 1),
        other => other,
    }
}

pub(crate) fn register_method_list_editing_callbacks(ui: &AppWindow, shared_state: &AppSharedState) {
    let state = shared_state.clone();
    ui.on_add_method(move || {
        if let Some(name) = edit_module(&state, "Add method", |module| Ok(module.add_method())) {
            debug!("Added method '{}'", name);
        }
    });

    let state = shared_state.clone();
    ui.on_delete_method(move |index| {
        let index = index as usize;
        if edit_module(&state, "Delete method", |module| module.delete_method(index)).is_some() {
            let mut selected = state
                .selected_method
                .lock()
                .expect("selected method lock poisoned");
            *selected = selection_after_delete(*selected, index);
            debug!("Deleted method at {}", index);
        }
    });

    let state = shared_state.clone();
    ui.on_select_method(move |index| {
        {
            let mut selected = state
                .selected_method
                .lock()
                .expect("selected method lock poisoned");
            let index = index as usize;
            *selected = if *selected == Some(index) {
                None
            } else {
                Some(index)
            };
        }
        notify_subject_changed(&state);
    });

    let state = shared_state.clone();
    ui.on_rename_method(move |index, name| {
        let _ = edit_module(&state, "Rename method", |module| {
            module.rename_method(index as usize, name.as_str())
        });
    });

    let state = shared_state.clone();
    ui.on_set_method_action(move |index, kind_code, argument| {
        let Some(kind) = ActionKind::from_code(kind_code) else {
            warn!("Unknown action kind code {}", kind_code);
            return;
        };
        let config = kind.config_with_argument(argument.as_str());
        debug!("Method {} action set to {:?}", index, config);
        let _ = edit_module(&state, "Set method action", |module| {
            module.set_method_action(index as usize, config)
        });
    });

    let state = shared_state.clone();
    ui.on_add_param(move |index| {
        let _ = edit_module(&state, "Add parameter", |module| {
            module.add_param(index as usize)
        });
    });

    let state = shared_state.clone();
    ui.on_delete_param(move |index, param_index| {
        let _ = edit_module(&state, "Delete parameter", |module| {
            module.delete_param(index as usize, param_index as usize)
        });
    });

    let state = shared_state.clone();
    ui.on_rename_param(move |index, param_index, key| {
        let _ = edit_module(&state, "Rename parameter", |module| {
            module.rename_param(index as usize, param_index as usize, key.as_str())
        });
    });

    let state = shared_state.clone();
    ui.on_set_param_required(move |index, param_index, required| {
        let _ = edit_module(&state, "Set parameter required", |module| {
            module.set_param_required(index as usize, param_index as usize, required)
        });
    });

    // Test values do not show up in the data panel, so no refresh is broadcast.
    let state = shared_state.clone();
    ui.on_set_param_test_value(move |index, param_index, raw| {
        let mut module = state
            .components
            .module
            .lock()
            .expect("module lock poisoned");
        if let Err(err) =
            module.set_param_test_value(index as usize, param_index as usize, raw.as_str())
        {
            warn!("Set parameter test value failed: {}", err);
        }
    });

    let state = shared_state.clone();
    ui.on_test_method(move |index| {
        let index = index as usize;
        let pending = {
            let module = state
                .components
                .module
                .lock()
                .expect("module lock poisoned");
            module.methods().get(index).map(|item| item.name().to_string()).and_then(
                |name| module.test_method(index).map(|task| (name, task)),
            )
        };
        match pending {
            Ok((name, Some(task))) => state.execution.spawn_detached(&name, task),
            Ok((name, None)) => debug!("Test of '{}' had nothing to run", name),
            Err(err) => warn!("Test method failed: {}", err),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::selection_after_delete;

    #[test]
    fn test_selection_follows_deleted_method() {
        assert_eq!(selection_after_delete(Some(2), 2), None);
        assert_eq!(selection_after_delete(Some(3), 1), Some(2));
        assert_eq!(selection_after_delete(Some(0), 1), Some(0));
        assert_eq!(selection_after_delete(None, 0), None);
    }
}
