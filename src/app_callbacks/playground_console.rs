use log::debug;

use crate::{
    app_context::AppSharedState,
    protocol::{Message, PlaygroundMessage},
    AppWindow,
};

pub(crate) fn register_playground_console_callbacks(ui: &AppWindow, shared_state: &AppSharedState) {
    let state = shared_state.clone();
    ui.on_method_params_edited(move |text| {
        let count = {
            let mut playground = state.playground.lock().expect("playground lock poisoned");
            playground.set_params_text(text.as_str());
            playground.params().len()
        };
        let _ = state
            .bus_sender
            .send(Message::Playground(PlaygroundMessage::ParamsParsed { count }));
    });

    let state = shared_state.clone();
    ui.on_trigger_method(move |method_name| {
        let method_name = method_name.to_string();
        debug!("Console trigger requested: {}", method_name);
        let triggered = {
            let playground = state.playground.lock().expect("playground lock poisoned");
            playground.trigger(&method_name, state.execution.as_ref())
        };
        let message = if triggered {
            PlaygroundMessage::SubjectChanged
        } else {
            PlaygroundMessage::TriggerIgnored { method_name }
        };
        let _ = state.bus_sender.send(Message::Playground(message));
    });
}
