//! Bound action capability invoked by method-list items.

use std::{future::Future, pin::Pin};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::params::Invocation;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("missing required parameter `{key}`")]
    MissingParam { key: String },
    #[error("action failed: {0}")]
    Failed(String),
}

pub type ActionResult = Result<Value, ActionError>;

/// Deferred result of one invocation. Owns everything it needs, so it can be
/// spawned onto another thread without borrowing the list that produced it.
pub type ActionFuture = Pin<Box<dyn Future<Output = ActionResult> + Send + 'static>>;

/// Opaque unit of work bound to a method. Items never look inside it.
#[async_trait]
pub trait MethodAction: Send + Sync {
    fn display_name(&self) -> String;

    async fn execute(&self, invocation: Invocation) -> ActionResult;
}

/// Wraps an already-known result as an `ActionFuture`.
pub fn ready(result: ActionResult) -> ActionFuture {
    Box::pin(std::future::ready(result))
}
