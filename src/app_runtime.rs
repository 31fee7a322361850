//! Application runtime bootstrap and top-level orchestration.

use std::{
    sync::{Arc, Mutex},
    thread,
};

use log::{error, info};
use slint::{ComponentHandle, LogicalSize};
use tokio::sync::broadcast;

use crate::{
    app_callbacks::{
        method_list_editing::register_method_list_editing_callbacks,
        playground_console::register_playground_console_callbacks,
        select_input_settings::register_select_input_settings_callbacks,
    },
    app_context::{AppSharedState, ComponentHandles, UiHandles},
    comps::{module_comp::ModuleComp, select_input::SelectInputComp, ExposedComponent},
    config::{Config, PlaygroundSubject},
    execution::ExecutionRuntime,
    panic_payload_to_string,
    playground::Playground,
    protocol::{Message, PlaygroundMessage},
    ui::panels::{apply_panels, apply_static_choices, capture_panels},
    ui_manager::UiManager,
    AppWindow,
};

/// Owns startup wiring and launches the running Slint application instance.
pub(crate) struct AppRuntime {
    ui: AppWindow,
    bus_sender: broadcast::Sender<Message>,
}

impl AppRuntime {
    /// Builds the runtime by mounting the configured component and wiring callbacks.
    pub(crate) fn build(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let configured_backend = std::env::var("SLINT_BACKEND").unwrap_or_else(|_| {
            info!("SLINT_BACKEND not set. Defaulting to winit-software");
            "winit-software".to_string()
        });
        slint::BackendSelector::new()
            .backend_name(configured_backend)
            .select()
            .map_err(|err| format!("Failed to initialize Slint backend: {}", err))?;

        let ui = AppWindow::new()?;
        ui.window().set_size(LogicalSize::new(
            config.ui.window_width as f32,
            config.ui.window_height as f32,
        ));

        let components = ComponentHandles {
            module: Arc::new(Mutex::new(ModuleComp::from_seed(&config.module.methods))),
            select_input: Arc::new(Mutex::new(SelectInputComp::new(
                config.select_input.options.clone(),
                config.select_input.required,
                config.select_input.custom_rule.clone(),
            ))),
        };
        let subject: Arc<Mutex<dyn ExposedComponent>> = match config.playground.subject {
            PlaygroundSubject::Module => components.module.clone(),
            PlaygroundSubject::SelectInput => components.select_input.clone(),
        };
        info!("Mounting {:?} in the playground", config.playground.subject);

        let (bus_sender, _) = broadcast::channel(1024);
        let execution = ExecutionRuntime::start(bus_sender.clone())?;
        let shared_state = AppSharedState {
            bus_sender: bus_sender.clone(),
            config: Arc::new(config),
            ui_handles: UiHandles {
                ui_handle: ui.as_weak(),
            },
            components,
            playground: Arc::new(Mutex::new(Playground::new(subject))),
            execution: Arc::new(execution),
            selected_method: Arc::new(Mutex::new(None)),
        };

        apply_static_choices(&ui);
        apply_panels(
            &ui,
            capture_panels(
                shared_state.config.playground.subject,
                &shared_state.components,
                &shared_state.playground,
                &shared_state.selected_method,
                shared_state.config.playground.data_collapse_depth,
            ),
        );

        register_method_list_editing_callbacks(&ui, &shared_state);
        register_playground_console_callbacks(&ui, &shared_state);
        register_select_input_settings_callbacks(&ui, &shared_state);

        let bus_receiver = bus_sender.subscribe();
        let ui_manager_state = shared_state.clone();
        thread::Builder::new()
            .name("ui-manager".to_string())
            .spawn(move || {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    UiManager::new(ui_manager_state, bus_receiver).run();
                }));
                if let Err(payload) = result {
                    error!(
                        "UiManager thread panicked: {}",
                        panic_payload_to_string(payload.as_ref())
                    );
                }
            })?;

        Ok(Self { ui, bus_sender })
    }

    /// Starts the UI event loop after all callbacks are registered.
    pub(crate) fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let _ = self
            .bus_sender
            .send(Message::Playground(PlaygroundMessage::SubjectChanged));
        self.ui.run()?;

        info!("Application exiting");
        Ok(())
    }
}
