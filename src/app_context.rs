use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::{
    comps::{module_comp::ModuleComp, select_input::SelectInputComp, ExposedComponent},
    config::Config,
    execution::ExecutionRuntime,
    playground::Playground,
    protocol::Message,
    AppWindow,
};

#[derive(Clone)]
pub(crate) struct UiHandles {
    pub(crate) ui_handle: slint::Weak<AppWindow>,
}

/// Components the bench can mount; only the configured one is shown.
#[derive(Clone)]
pub(crate) struct ComponentHandles {
    pub(crate) module: Arc<Mutex<ModuleComp>>,
    pub(crate) select_input: Arc<Mutex<SelectInputComp>>,
}

#[derive(Clone)]
pub(crate) struct AppSharedState {
    pub(crate) bus_sender: broadcast::Sender<Message>,
    pub(crate) config: Arc<Config>,
    pub(crate) ui_handles: UiHandles,
    pub(crate) components: ComponentHandles,
    pub(crate) playground: Arc<Mutex<Playground<dyn ExposedComponent>>>,
    pub(crate) execution: Arc<ExecutionRuntime>,
    /// Method whose popover (name/action/params) is open in the property panel.
    pub(crate) selected_method: Arc<Mutex<Option<usize>>>,
}
