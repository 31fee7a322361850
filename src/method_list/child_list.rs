//! Generic ordered list of homogeneous sub-components.

use serde_json::Value;
use thiserror::Error;

use super::{action::ActionFuture, params::ParamSpec};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("index {index} is out of range for a list of {len} items")]
    OutOfRange { index: usize, len: usize },
    #[error("item names must not be empty")]
    EmptyName,
}

/// Capability every child of a `ChildList` offers to its container and views.
pub trait ListChild {
    type View;
    type PropertyView;

    fn view(&self) -> Self::View;

    fn property_view(&self) -> Self::PropertyView;

    fn params_data(&self) -> Vec<ParamSpec>;

    fn execute(&self, params: Vec<Value>) -> ActionFuture;
}

/// Insertion-ordered children; index order is display order.
#[derive(Debug)]
pub struct ChildList<C> {
    items: Vec<C>,
}

impl<C> Default for ChildList<C> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<C: ListChild> ChildList<C> {
    pub fn push(&mut self, child: C) {
        self.items.push(child);
    }

    /// Removes the child at `index`; the list is left untouched on error.
    pub fn delete(&mut self, index: usize) -> Result<C, ListError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&C, ListError> {
        self.check_index(index)?;
        Ok(&self.items[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut C, ListError> {
        self.check_index(index)?;
        Ok(&mut self.items[index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn views(&self) -> Vec<C::View> {
        self.items.iter().map(ListChild::view).collect()
    }

    pub fn property_views(&self) -> Vec<C::PropertyView> {
        self.items.iter().map(ListChild::property_view).collect()
    }

    fn check_index(&self, index: usize) -> Result<(), ListError> {
        if index >= self.items.len() {
            return Err(ListError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}
