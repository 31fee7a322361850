//! UI callback registration modules grouped by feature area.

pub mod method_list_editing;
pub mod playground_console;
pub mod select_input_settings;
