use log::debug;

use crate::{
    app_context::AppSharedState,
    protocol::{Message, PlaygroundMessage},
    AppWindow,
};

pub(crate) fn register_select_input_settings_callbacks(
    ui: &AppWindow,
    shared_state: &AppSharedState,
) {
    let state = shared_state.clone();
    ui.on_set_select_required(move |required| {
        debug!("Select input required set to {}", required);
        state
            .components
            .select_input
            .lock()
            .expect("select input lock poisoned")
            .set_required(required);
        let _ = state
            .bus_sender
            .send(Message::Playground(PlaygroundMessage::SubjectChanged));
    });

    let state = shared_state.clone();
    ui.on_set_select_custom_rule(move |rule| {
        debug!("Select input custom rule set to '{}'", rule);
        state
            .components
            .select_input
            .lock()
            .expect("select input lock poisoned")
            .set_custom_rule(rule.as_str());
        let _ = state
            .bus_sender
            .send(Message::Playground(PlaygroundMessage::SubjectChanged));
    });
}
