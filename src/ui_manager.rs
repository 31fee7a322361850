use std::collections::VecDeque;

use log::{debug, warn};
use tokio::sync::broadcast::Receiver;

use crate::{
    app_context::AppSharedState,
    protocol::{ExecutionMessage, Message, PlaygroundMessage},
    ui::panels::{apply_console_lines, apply_panels, capture_panels},
};

/// Bounded console transcript, oldest lines dropped first.
pub(crate) struct ConsoleLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl ConsoleLog {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub(crate) fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

/// Console line for a bus message, if it has one.
pub(crate) fn console_line(message: &Message) -> Option<String> {
    match message {
        Message::Playground(PlaygroundMessage::SubjectChanged) => None,
        Message::Playground(PlaygroundMessage::TriggerIgnored { method_name }) => {
            Some(format!("{method_name}: nothing to run"))
        }
        Message::Playground(PlaygroundMessage::ParamsParsed { count }) => {
            Some(format!("params: {count} parsed"))
        }
        Message::Execution(ExecutionMessage::Started { method_name, .. }) => {
            Some(format!("{method_name}: started"))
        }
        Message::Execution(ExecutionMessage::Finished {
            method_name,
            outcome,
            ..
        }) => Some(match outcome {
            Ok(value) => format!("{method_name}: returned {value}"),
            Err(err) => format!("{method_name}: failed: {err}"),
        }),
    }
}

fn refreshes_panels(message: &Message) -> bool {
    matches!(
        message,
        Message::Playground(PlaygroundMessage::SubjectChanged)
            | Message::Execution(ExecutionMessage::Finished { .. })
    )
}

// Mirrors component state and run events into the window
pub struct UiManager {
    shared_state: AppSharedState,
    bus_receiver: Receiver<Message>,
    console: ConsoleLog,
}

impl UiManager {
    pub(crate) fn new(shared_state: AppSharedState, bus_receiver: Receiver<Message>) -> Self {
        let console = ConsoleLog::new(shared_state.config.playground.console_history);
        Self {
            shared_state,
            bus_receiver,
            console,
        }
    }

    fn refresh_panels(&self) {
        let snapshot = capture_panels(
            self.shared_state.config.playground.subject,
            &self.shared_state.components,
            &self.shared_state.playground,
            &self.shared_state.selected_method,
            self.shared_state.config.playground.data_collapse_depth,
        );
        let _ = self
            .shared_state
            .ui_handles
            .ui_handle
            .upgrade_in_event_loop(move |ui| {
                apply_panels(&ui, snapshot);
            });
    }

    fn append_console(&mut self, line: String) {
        self.console.push(line);
        let lines = self.console.snapshot();
        let _ = self
            .shared_state
            .ui_handles
            .ui_handle
            .upgrade_in_event_loop(move |ui| {
                apply_console_lines(&ui, lines);
            });
    }

    pub fn run(&mut self) {
        loop {
            match self.bus_receiver.blocking_recv() {
                Ok(message) => {
                    if let Some(line) = console_line(&message) {
                        debug!("UiManager: {}", line);
                        self.append_console(line);
                    }
                    if refreshes_panels(&message) {
                        self.refresh_panels();
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        "UiManager lagged on bus, skipped {} message(s); refreshing",
                        skipped
                    );
                    self.refresh_panels();
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}
