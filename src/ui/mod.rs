//! UI-focused helper modules shared by callback/runtime wiring.

pub(crate) mod data_view;
pub(crate) mod panels;
