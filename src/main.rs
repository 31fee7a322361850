mod action_template;
mod app_callbacks;
mod app_context;
mod app_runtime;
mod comps;
mod config;
mod config_persistence;
mod execution;
mod method_list;
mod name_generator;
mod playground;
mod protocol;
mod ui;
mod ui_manager;

use app_runtime::AppRuntime;
use config_persistence::{config_file_path, load_or_create_config};
use log::info;

slint::include_modules!();

fn panic_payload_to_string(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    "non-string panic payload".to_string()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Trace);
    clog.init();

    std::panic::set_hook(Box::new(|panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
    }));

    let config_file = config_file_path()?;
    let config = load_or_create_config(&config_file)?;
    log::set_max_level(config.logging.level.to_filter());
    info!("Loaded config from {}", config_file.display());

    AppRuntime::build(config)?.run()
}
