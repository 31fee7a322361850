//! Background runtime for fire-and-forget method invocations.

use std::thread;

use log::{debug, info, warn};
use tokio::sync::{broadcast, oneshot};
use uuid::Uuid;

use crate::{
    method_list::action::ActionFuture,
    protocol::{ExecutionMessage, Message},
};

/// Accepts invocation futures and runs them without the caller waiting.
pub trait TaskSpawner: Send + Sync {
    fn spawn_detached(&self, label: &str, task: ActionFuture);
}

/// Current-thread tokio runtime driven by a dedicated thread.
///
/// Runs are independent: nothing is deduplicated, queued behind another run,
/// or cancelled, and completions may arrive in any order.
pub struct ExecutionRuntime {
    handle: tokio::runtime::Handle,
    bus_sender: broadcast::Sender<Message>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ExecutionRuntime {
    pub fn start(bus_sender: broadcast::Sender<Message>) -> Result<Self, String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|err| format!("failed to build execution runtime: {err}"))?;
        let handle = runtime.handle().clone();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let thread = thread::Builder::new()
            .name("method-execution".to_string())
            .spawn(move || {
                runtime.block_on(async {
                    let _ = shutdown_rx.await;
                });
                debug!("Execution runtime stopped");
            })
            .map_err(|err| format!("failed to spawn execution thread: {err}"))?;
        info!("Execution runtime started");
        Ok(Self {
            handle,
            bus_sender,
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        })
    }
}

impl TaskSpawner for ExecutionRuntime {
    fn spawn_detached(&self, label: &str, task: ActionFuture) {
        let run_id = Uuid::new_v4().to_string();
        let method_name = label.to_string();
        debug!("Starting run {} of '{}'", run_id, method_name);
        let _ = self
            .bus_sender
            .send(Message::Execution(ExecutionMessage::Started {
                run_id: run_id.clone(),
                method_name: method_name.clone(),
            }));

        let bus_sender = self.bus_sender.clone();
        self.handle.spawn(async move {
            let outcome = task.await.map_err(|err| err.to_string());
            match &outcome {
                Ok(value) => debug!("Run {} of '{}' returned {}", run_id, method_name, value),
                Err(err) => warn!("Run {} of '{}' failed: {}", run_id, method_name, err),
            }
            let _ = bus_sender.send(Message::Execution(ExecutionMessage::Finished {
                run_id,
                method_name,
                outcome,
            }));
        });
    }
}

impl Drop for ExecutionRuntime {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use tokio::sync::broadcast;

    use super::{ExecutionRuntime, TaskSpawner};
    use crate::{
        method_list::action::{ready, ActionError},
        protocol::{ExecutionMessage, Message},
    };

    fn next_execution(receiver: &mut broadcast::Receiver<Message>) -> ExecutionMessage {
        match receiver.blocking_recv().expect("bus open") {
            Message::Execution(message) => message,
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_runs_report_start_and_outcome() {
        let (bus_sender, mut receiver) = broadcast::channel(16);
        let runtime = ExecutionRuntime::start(bus_sender).expect("runtime starts");

        runtime.spawn_detached("ok", ready(Ok(json!(1))));

        let ExecutionMessage::Started { run_id, method_name } = next_execution(&mut receiver)
        else {
            panic!("expected start first");
        };
        assert_eq!(method_name, "ok");
        let ExecutionMessage::Finished {
            run_id: finished_id,
            outcome,
            ..
        } = next_execution(&mut receiver)
        else {
            panic!("expected finish");
        };
        assert_eq!(finished_id, run_id);
        assert_eq!(outcome, Ok(json!(1)));
    }

    #[test]
    fn test_failures_are_reported_not_swallowed() {
        let (bus_sender, mut receiver) = broadcast::channel(16);
        let runtime = ExecutionRuntime::start(bus_sender).expect("runtime starts");

        runtime.spawn_detached("bad", ready(Err(ActionError::Failed("nope".to_string()))));

        let mut outcome = None;
        while outcome.is_none() {
            if let ExecutionMessage::Finished { outcome: done, .. } = next_execution(&mut receiver)
            {
                outcome = Some(done);
            }
        }
        assert_eq!(outcome, Some(Err("action failed: nope".to_string())));
    }

    #[test]
    fn test_slow_run_does_not_block_a_later_one() {
        let (bus_sender, mut receiver) = broadcast::channel(16);
        let runtime = ExecutionRuntime::start(bus_sender).expect("runtime starts");

        runtime.spawn_detached(
            "slow",
            Box::pin(async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(json!("slow"))
            }),
        );
        runtime.spawn_detached("fast", ready(Ok(json!("fast"))));

        let mut finished = Vec::new();
        while finished.len() < 2 {
            if let ExecutionMessage::Finished { method_name, .. } = next_execution(&mut receiver) {
                finished.push(method_name);
            }
        }
        assert_eq!(finished, vec!["fast", "slow"]);
    }
}
