//! Event-bus protocol shared by UI callbacks, the execution runtime, and the UI manager.

use serde_json::Value;

/// Top-level envelope for all bus traffic.
#[derive(Debug, Clone)]
pub enum Message {
    Playground(PlaygroundMessage),
    Execution(ExecutionMessage),
}

/// Changes to the mounted component or the console inputs.
#[derive(Debug, Clone)]
pub enum PlaygroundMessage {
    /// Component state or configuration changed; views should re-read it.
    SubjectChanged,
    /// A method button was pressed but the component had nothing to run.
    TriggerIgnored { method_name: String },
    /// The method-params input was re-parsed into this many parameters.
    ParamsParsed { count: usize },
}

/// Lifecycle of one detached method run.
#[derive(Debug, Clone)]
pub enum ExecutionMessage {
    Started {
        run_id: String,
        method_name: String,
    },
    Finished {
        run_id: String,
        method_name: String,
        /// Action result or the display text of its error.
        outcome: Result<Value, String>,
    },
}
