//! Snapshots of component state shaped for the window, and applying them.

use std::{
    rc::Rc,
    sync::{Arc, Mutex},
};

use slint::{ModelRc, SharedString, VecModel};

use super::data_view::render_data_tree;
use crate::{
    app_context::ComponentHandles,
    comps::{module_actions::ActionKind, ExposedComponent},
    config::PlaygroundSubject,
    playground::Playground,
    AppWindow, MethodRow, ParamRow,
};

/// Everything the window shows, captured off the UI thread.
#[derive(Debug, Clone, Default)]
pub(crate) struct PanelSnapshot {
    pub(crate) subject_title: String,
    pub(crate) subject_kind: i32,
    pub(crate) data_text: String,
    pub(crate) preview_text: String,
    pub(crate) method_names: Vec<String>,
    pub(crate) method_rows: Vec<MethodRow>,
    pub(crate) selected_method_index: i32,
    pub(crate) param_rows: Vec<ParamRow>,
    pub(crate) select_required: bool,
    pub(crate) select_custom_rule: String,
}

/// Reads the playground and the component property state in one pass.
/// Clears `selected_method` when it no longer points at a method.
pub(crate) fn capture_panels(
    subject: PlaygroundSubject,
    components: &ComponentHandles,
    playground: &Mutex<Playground<dyn ExposedComponent>>,
    selected_method: &Arc<Mutex<Option<usize>>>,
    collapse_depth: usize,
) -> PanelSnapshot {
    let mut snapshot = {
        let playground = playground.lock().expect("playground lock poisoned");
        PanelSnapshot {
            subject_title: playground.title(),
            subject_kind: subject.to_code(),
            data_text: render_data_tree(&playground.data_snapshot(), collapse_depth),
            preview_text: playground.preview_text(),
            method_names: playground.method_names(),
            selected_method_index: -1,
            ..PanelSnapshot::default()
        }
    };

    match subject {
        PlaygroundSubject::Module => {
            let module = components.module.lock().expect("module lock poisoned");
            snapshot.method_rows = module
                .method_rows()
                .into_iter()
                .map(|row| MethodRow {
                    name: row.name.into(),
                    action_label: row.action_label.into(),
                    action_kind: row.action_kind.to_code(),
                    action_argument: row.action_argument.into(),
                    param_count: row.param_count as i32,
                })
                .collect();

            let mut selected = selected_method.lock().expect("selected method lock poisoned");
            if selected.is_some_and(|index| index >= module.methods().len()) {
                *selected = None;
            }
            if let Some(index) = *selected {
                snapshot.selected_method_index = index as i32;
                if let Some(test_view) = module.methods().test_views().into_iter().nth(index) {
                    snapshot.param_rows = test_view
                        .params
                        .iter()
                        .map(|param| ParamRow {
                            key: param.key.as_str().into(),
                            required: param.required,
                            test_value: param.test_value.as_str().into(),
                        })
                        .collect();
                }
            }
        }
        PlaygroundSubject::SelectInput => {
            let select_input = components
                .select_input
                .lock()
                .expect("select input lock poisoned");
            snapshot.select_required = select_input.required();
            snapshot.select_custom_rule = select_input.custom_rule().to_string();
        }
    }
    snapshot
}

fn string_model(values: Vec<String>) -> ModelRc<SharedString> {
    let values: Vec<SharedString> = values.into_iter().map(SharedString::from).collect();
    ModelRc::from(Rc::new(VecModel::from(values)))
}

pub(crate) fn action_kind_labels() -> Vec<String> {
    ActionKind::ALL
        .iter()
        .map(|kind| kind.label().to_string())
        .collect()
}

pub(crate) fn apply_panels(ui: &AppWindow, snapshot: PanelSnapshot) {
    ui.set_subject_title(snapshot.subject_title.into());
    ui.set_subject_kind(snapshot.subject_kind);
    ui.set_data_text(snapshot.data_text.into());
    ui.set_preview_text(snapshot.preview_text.into());
    ui.set_method_names(string_model(snapshot.method_names));
    ui.set_method_rows(ModelRc::from(Rc::new(VecModel::from(snapshot.method_rows))));
    ui.set_selected_method_index(snapshot.selected_method_index);
    ui.set_param_rows(ModelRc::from(Rc::new(VecModel::from(snapshot.param_rows))));
    ui.set_select_required(snapshot.select_required);
    ui.set_select_custom_rule(snapshot.select_custom_rule.into());
}

pub(crate) fn apply_console_lines(ui: &AppWindow, lines: Vec<String>) {
    ui.set_console_lines(string_model(lines));
}

pub(crate) fn apply_static_choices(ui: &AppWindow) {
    ui.set_action_kind_labels(string_model(action_kind_labels()));
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::capture_panels;
    use crate::{
        app_context::ComponentHandles,
        comps::{
            module_actions::ActionConfig, module_comp::ModuleComp, select_input::SelectInputComp,
            ExposedComponent,
        },
        config::PlaygroundSubject,
        playground::Playground,
    };

    fn handles() -> ComponentHandles {
        ComponentHandles {
            module: Arc::new(Mutex::new(ModuleComp::new())),
            select_input: Arc::new(Mutex::new(SelectInputComp::new(
                vec!["a".to_string()],
                true,
                "pick one".to_string(),
            ))),
        }
    }

    #[test]
    fn test_module_capture_lists_rows_and_selected_params() {
        let components = handles();
        {
            let mut module = components.module.lock().expect("module lock poisoned");
            module.add_method();
            module.add_method();
            module.add_param(1).expect("method exists");
            module
                .set_method_action(1, Some(ActionConfig::Delay { ms: 10 }))
                .expect("method exists");
        }
        let subject: Arc<Mutex<dyn ExposedComponent>> = components.module.clone();
        let playground = Mutex::new(Playground::new(subject));
        let selected = Arc::new(Mutex::new(Some(1)));

        let snapshot = capture_panels(
            PlaygroundSubject::Module,
            &components,
            &playground,
            &selected,
            2,
        );

        assert_eq!(snapshot.subject_kind, 0);
        assert_eq!(snapshot.method_names, vec!["method", "method2"]);
        assert_eq!(snapshot.method_rows.len(), 2);
        assert_eq!(snapshot.method_rows[1].action_kind, 3);
        assert_eq!(snapshot.method_rows[1].param_count, 1);
        assert_eq!(snapshot.selected_method_index, 1);
        assert_eq!(snapshot.param_rows.len(), 1);
        assert_eq!(snapshot.param_rows[0].key.as_str(), "param");
        assert!(snapshot.data_text.contains("\"methods\""));
    }

    #[test]
    fn test_stale_selection_is_cleared() {
        let components = handles();
        let subject: Arc<Mutex<dyn ExposedComponent>> = components.module.clone();
        let playground = Mutex::new(Playground::new(subject));
        let selected = Arc::new(Mutex::new(Some(4)));

        let snapshot = capture_panels(
            PlaygroundSubject::Module,
            &components,
            &playground,
            &selected,
            2,
        );

        assert_eq!(snapshot.selected_method_index, -1);
        assert_eq!(*selected.lock().expect("selected lock poisoned"), None);
    }

    #[test]
    fn test_select_input_capture_reads_validation_settings() {
        let components = handles();
        let subject: Arc<Mutex<dyn ExposedComponent>> = components.select_input.clone();
        let playground = Mutex::new(Playground::new(subject));

        let snapshot = capture_panels(
            PlaygroundSubject::SelectInput,
            &components,
            &playground,
            &Arc::new(Mutex::new(None)),
            2,
        );

        assert_eq!(snapshot.subject_kind, 1);
        assert!(snapshot.select_required);
        assert_eq!(snapshot.select_custom_rule, "pick one");
        assert_eq!(snapshot.method_names, vec!["setValue", "clearValue"]);
        assert!(snapshot.method_rows.is_empty());
    }
}
